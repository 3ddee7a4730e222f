use std::path::{Path, PathBuf};

use crate::{
    artwork,
    errors::Result,
    info,
    spotify::{Credentials, Session, SpotifyApi},
    success,
};

/// Folder used by [`track_artwork`].
pub const TRACK_ARTWORK_DIR: &str = "album_artwork";

/// Authenticates and saves the artwork of a single track into
/// `<output_dir>/album_artwork`.
pub fn track_artwork(
    credentials: Credentials,
    track_id: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    info!("Connecting to Spotify...");
    let session = Session::connect(&credentials)?;
    save_track_artwork(&session, track_id, output_dir)
}

/// Steps of [`track_artwork`] that come after authentication.
pub fn save_track_artwork(
    api: &impl SpotifyApi,
    track_id: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let track = api.track(track_id)?;
    let folder = output_dir.join(TRACK_ARTWORK_DIR);
    artwork::ensure_folder(&folder)?;

    let path = artwork::save_artwork(api, &track, &folder)?;
    success!("Saved artwork of '{}' to {}", track.name, path.display());
    Ok(path)
}
