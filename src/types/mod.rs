use serde::{Deserialize, Serialize};

/// Wire shape of `GET /me/player/currently-playing`.
///
/// Spotify omits `item` for some content types (e.g. ad breaks) and the whole
/// body when nothing is active, so everything beyond the flags is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Album,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Point-in-time read of what is playing. Only constructed when a track is
/// actually playing; "nothing playing" is `None` at every call site.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackSnapshot {
    pub track_name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub progress_ms: u64,
    pub duration_ms: u64,
    pub track_id: Option<String>,
    pub spotify_url: Option<String>,
}

impl PlaybackSnapshot {
    /// Returns `None` unless the response says playing *and* carries an item.
    pub fn from_playing(playing: &CurrentlyPlaying) -> Option<Self> {
        if !playing.is_playing {
            return None;
        }
        let track = playing.item.as_ref()?;

        Some(Self {
            track_name: track.name.clone(),
            artists: track.artists.iter().map(|a| a.name.clone()).collect(),
            album: track.album.name.clone(),
            progress_ms: playing.progress_ms.unwrap_or(0),
            duration_ms: track.duration_ms,
            track_id: track.id.clone(),
            spotify_url: track.external_urls.spotify.clone(),
        })
    }

    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}
