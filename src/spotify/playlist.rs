use serde::de::DeserializeOwned;

use crate::{
    errors::{Error, Result},
    types::{Page, Playlist, PlaylistItem, PlaylistObject, Track, TrackObject},
};

use super::{Session, SpotifyApi};

impl Session {
    fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        log::debug!("GET {}", url);
        self.client
            .get(url)
            .bearer_auth(&self.token.access_token)
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.json::<T>())
            .map_err(|source| Error::Lookup {
                what: what.to_string(),
                source,
            })
    }
}

impl SpotifyApi for Session {
    fn playlist(&self, playlist_id: &str) -> Result<Playlist> {
        let what = format!("playlist {}", playlist_id);
        let url = format!("{}/playlists/{}", self.api_url, playlist_id);
        let obj: PlaylistObject = self.get_json(&url, &what)?;

        let name = obj.name.ok_or(Error::MissingField {
            entity: "playlist",
            field: "name",
        })?;
        let mut page = obj.tracks.ok_or(Error::MissingField {
            entity: "playlist",
            field: "tracks",
        })?;

        let mut items: Vec<PlaylistItem> = Vec::new();
        loop {
            items.append(&mut page.items);
            match page.next.take() {
                Some(next) => {
                    log::debug!("Fetched {} of {:?} playlist items", items.len(), page.total);
                    page = self.get_json::<Page<PlaylistItem>>(&next, &what)?;
                }
                None => break,
            }
        }

        let tracks = items
            .into_iter()
            .map(Track::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Playlist {
            id: obj.id.unwrap_or_else(|| playlist_id.to_string()),
            name,
            tracks,
        })
    }

    fn track(&self, track_id: &str) -> Result<Track> {
        let url = format!("{}/tracks/{}", self.api_url, track_id);
        let obj: TrackObject = self.get_json(&url, &format!("track {}", track_id))?;
        Track::try_from(obj)
    }

    fn artwork(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Downloading artwork {}", url);
        self.client
            .get(url)
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.bytes())
            .map(|bytes| bytes.to_vec())
            .map_err(|source| Error::ArtworkFetch {
                url: url.to_string(),
                source,
            })
    }
}
