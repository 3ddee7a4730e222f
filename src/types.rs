use serde::Deserialize;

use crate::{
    errors::{Error, Result},
    utils,
};

/// Body of a successful client-credentials exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Access token held by a [`crate::spotify::Session`].
#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
}

impl From<TokenResponse> for Token {
    fn from(res: TokenResponse) -> Self {
        Token {
            access_token: res.access_token,
            expires_in: res.expires_in,
        }
    }
}

/// One page of a paginated Web API listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Absolute URL of the next page, `None` on the last one.
    pub next: Option<String>,
    pub total: Option<u64>,
}

/// Response of `GET /playlists/{id}`, carrying the first page of tracks.
///
/// Every field is optional on the wire. Missing ones are reported when the
/// record is turned into a [`Playlist`].
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistObject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub tracks: Option<Page<PlaylistItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// `null` for tracks that are no longer available.
    pub track: Option<TrackObject>,
}

/// Track as returned inside a playlist page or by `GET /tracks/{id}`.
/// Validated into a [`Track`] with `TryFrom`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub name: Option<String>,
    pub artists: Option<Vec<ArtistObject>>,
    pub album: Option<AlbumObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    /// Largest image first.
    pub images: Option<Vec<ImageObject>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageObject {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A playlist with every page of tracks fetched and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub name: String,
}

/// One size of an album cover. Dimensions are informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRef {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A playlist entry that has passed validation: it has a title, at least one
/// named artist and at least one artwork reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artists: Vec<Artist>,
    pub artwork: Vec<ArtworkRef>,
}

impl Track {
    /// Artist names joined by `,` in the order the provider lists them.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// URL of the largest album image. The provider orders images by size,
    /// widest first.
    pub fn artwork_url(&self) -> &str {
        // non-empty, checked in TryFrom<TrackObject>
        &self.artwork[0].url
    }

    /// File stem used when saving this track's artwork.
    pub fn file_stem(&self) -> String {
        utils::sanitize_file_name(&self.name, &self.artist_names())
    }
}

impl TryFrom<TrackObject> for Track {
    type Error = Error;

    fn try_from(obj: TrackObject) -> Result<Self> {
        let name = obj.name.ok_or(Error::MissingField {
            entity: "track",
            field: "name",
        })?;

        let malformed = |reason: &'static str| Error::MalformedTrack {
            track: name.clone(),
            reason,
        };

        let artists = obj
            .artists
            .ok_or_else(|| malformed("no artist list"))?
            .into_iter()
            .map(|a| match a.name {
                Some(n) if !n.is_empty() => Ok(Artist { name: n }),
                _ => Err(malformed("artist without a name")),
            })
            .collect::<Result<Vec<_>>>()?;
        if artists.is_empty() {
            return Err(malformed("no artists"));
        }

        let images = obj
            .album
            .ok_or_else(|| malformed("no album"))?
            .images
            .unwrap_or_default();
        let artwork = images
            .into_iter()
            .map(|img| match img.url {
                Some(url) if !url.is_empty() => Ok(ArtworkRef {
                    url,
                    width: img.width,
                    height: img.height,
                }),
                _ => Err(malformed("album image without a URL")),
            })
            .collect::<Result<Vec<_>>>()?;
        if artwork.is_empty() {
            return Err(malformed("album has no artwork"));
        }

        Ok(Track {
            name,
            artists,
            artwork,
        })
    }
}

impl TryFrom<PlaylistItem> for Track {
    type Error = Error;

    fn try_from(item: PlaylistItem) -> Result<Self> {
        match item.track {
            Some(t) => Track::try_from(t),
            None => Err(Error::MalformedTrack {
                track: String::from("<unavailable>"),
                reason: "playlist entry has no track",
            }),
        }
    }
}
