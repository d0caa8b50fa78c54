use crate::cli::OutputFormat;
use crate::types::PlaybackSnapshot;
use colored::Colorize;

pub const NOTHING_PLAYING: &str = "Nothing is playing right now.";

/// Milliseconds to the `m:ss` display used in the progress line. Truncates
/// sub-second remainders: 125000 -> "2:05", 3000 -> "0:03".
pub fn format_track_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

pub fn format_now_playing(snapshot: &PlaybackSnapshot, format: &OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(snapshot).expect("serialization should not fail")
            );
        }
        OutputFormat::Text => {
            println!("{}", "Now playing".bold());
            println!("{}", "─".repeat(40).dimmed());
            println!("{}: {}", "Track".dimmed(), snapshot.track_name);
            println!("{}: {}", "Artist(s)".dimmed(), snapshot.artist_line());
            println!("{}: {}", "Album".dimmed(), snapshot.album);
            println!(
                "{}: {} / {}",
                "Progress".dimmed(),
                format_track_time(snapshot.progress_ms),
                format_track_time(snapshot.duration_ms)
            );
            if let Some(url) = &snapshot.spotify_url {
                println!("{}: {}", "URL".dimmed(), url);
            }
        }
    }
}
