mod client;

pub use client::SpotifyClient;
