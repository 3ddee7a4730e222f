//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here. A run authenticates once with
//! the client-credentials flow, which yields a [`Session`]. The session is then
//! passed explicitly to whatever needs network access; there is no global
//! client.
//!
//! ```text
//! Orchestrator (cli)
//!      ↓
//! SpotifyApi trait  ←  Session (reqwest, blocking)
//!      ↓
//! Spotify Web API / image CDN
//! ```
//!
//! ## Endpoints
//!
//! - `POST /api/token` - client-credentials token exchange
//! - `GET /playlists/{id}` - playlist name and the first page of items
//! - `GET {next}` - following pages of playlist items
//! - `GET /tracks/{id}` - a single track
//!
//! Artwork is downloaded from the URLs Spotify returns, without a token.
//!
//! All JSON is deserialized into the records in [`crate::types`] and checked
//! there, so callers only ever see complete [`Playlist`] and [`Track`] values.
//!
//! ## Blocking I/O
//!
//! Requests go through `reqwest::blocking` one after another. A run is a
//! straight line of calls and nothing is fetched in parallel.

pub mod auth;
pub mod playlist;

pub use auth::{Credentials, Session};

use crate::{
    errors::Result,
    types::{Playlist, Track},
};

/// The calls a run makes against Spotify.
///
/// [`Session`] is the real implementation. Collectors and the orchestrator
/// only depend on this trait.
pub trait SpotifyApi {
    /// Playlist name plus every track, across all pages, in playlist order.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Lookup`] if any page cannot be fetched or parsed
    /// - [`crate::Error::MissingField`] if the playlist has no name or tracks
    /// - [`crate::Error::MalformedTrack`] for the first unusable track
    fn playlist(&self, playlist_id: &str) -> Result<Playlist>;

    /// A single track.
    fn track(&self, track_id: &str) -> Result<Track>;

    /// Raw bytes of an artwork image, [`crate::Error::ArtworkFetch`] on
    /// failure.
    fn artwork(&self, url: &str) -> Result<Vec<u8>>;
}
