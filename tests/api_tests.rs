use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spotify_now::api::SpotifyClient;
use spotify_now::error::SpotifyError;
use spotify_now::types::PlaybackSnapshot;

fn playing_body() -> serde_json::Value {
    json!({
        "is_playing": true,
        "progress_ms": 125000,
        "item": {
            "id": "11dFghVXANMlKmJXsNCbNl",
            "name": "Cut To The Feeling",
            "duration_ms": 200000,
            "artists": [
                { "name": "Carly Rae Jepsen" },
                { "name": "Nicolas Petitfrere" }
            ],
            "album": { "name": "Cut To The Feeling" },
            "external_urls": {
                "spotify": "https://open.spotify.com/track/11dFghVXANMlKmJXsNCbNl"
            }
        }
    })
}

#[tokio::test]
async fn test_no_content_means_nothing_playing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new("test-token", Some(&mock_server.uri())).unwrap();
    let result = client.currently_playing().await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_playing_track_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playing_body()))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new("test-token", Some(&mock_server.uri())).unwrap();
    let playing = client.currently_playing().await.unwrap().unwrap();
    let snapshot = PlaybackSnapshot::from_playing(&playing).unwrap();

    assert_eq!(snapshot.track_name, "Cut To The Feeling");
    assert_eq!(snapshot.artist_line(), "Carly Rae Jepsen, Nicolas Petitfrere");
    assert_eq!(snapshot.album, "Cut To The Feeling");
    assert_eq!(snapshot.progress_ms, 125000);
    assert_eq!(snapshot.duration_ms, 200000);
    assert_eq!(snapshot.track_id.as_deref(), Some("11dFghVXANMlKmJXsNCbNl"));
    assert_eq!(
        snapshot.spotify_url.as_deref(),
        Some("https://open.spotify.com/track/11dFghVXANMlKmJXsNCbNl")
    );
}

#[tokio::test]
async fn test_paused_response_yields_no_snapshot() {
    let mock_server = MockServer::start().await;

    let mut body = playing_body();
    body["is_playing"] = json!(false);

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new("test-token", Some(&mock_server.uri())).unwrap();
    let playing = client.currently_playing().await.unwrap().unwrap();

    assert!(PlaybackSnapshot::from_playing(&playing).is_none());
}

#[tokio::test]
async fn test_missing_item_yields_no_snapshot() {
    let mock_server = MockServer::start().await;

    // Ad breaks report is_playing without a track item.
    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_playing": true,
            "progress_ms": 10000,
            "item": null
        })))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new("test-token", Some(&mock_server.uri())).unwrap();
    let playing = client.currently_playing().await.unwrap().unwrap();

    assert!(PlaybackSnapshot::from_playing(&playing).is_none());
}

#[tokio::test]
async fn test_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new("expired-token", Some(&mock_server.uri())).unwrap();
    let result = client.currently_playing().await;

    assert!(matches!(result, Err(SpotifyError::AuthFailed(_))));
}

#[tokio::test]
async fn test_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "60"))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new("test-token", Some(&mock_server.uri())).unwrap();
    let result = client.currently_playing().await;

    match result {
        Err(SpotifyError::RateLimited { retry_after }) => assert_eq!(retry_after, Some(60)),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/player/currently-playing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = SpotifyClient::new("test-token", Some(&mock_server.uri())).unwrap();
    let result = client.currently_playing().await;

    assert!(matches!(result, Err(SpotifyError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_connection_error_is_network() {
    // Nothing listens here; the request must fail without panicking.
    let client = SpotifyClient::new("test-token", Some("http://127.0.0.1:1")).unwrap();
    let result = client.currently_playing().await;

    assert!(matches!(result, Err(SpotifyError::Network(_))));
}
