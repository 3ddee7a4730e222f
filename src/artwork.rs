//! Downloads album artwork and stores it as PNG files.
//!
//! Tracks from the same album share one artwork URL, so files are keyed by
//! URL: the first track that uses a URL names the file and later tracks with
//! the same URL are skipped. Distinct URLs always end up in distinct files;
//! when two tracks sanitize to the same name the later one gets a numeric
//! suffix (`<stem>_2.png`, `<stem>_3.png`, ...).

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    errors::{Error, Result},
    spotify::SpotifyApi,
    types::Track,
};

/// An artwork URL and the file it was saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkFile {
    pub url: String,
    pub path: PathBuf,
}

/// Creates `folder` and any missing parents.
pub fn ensure_folder(folder: &Path) -> Result<()> {
    std::fs::create_dir_all(folder).map_err(|source| Error::FolderCreation {
        path: folder.to_path_buf(),
        source,
    })
}

/// Saves one PNG per distinct artwork URL among `tracks` into `folder`.
///
/// # Arguments
///
/// * `api` - Session used to download the images
/// * `tracks` - Playlist tracks, in playlist order
/// * `folder` - Existing folder the PNG files are written to
///
/// # Returns
///
/// One [`ArtworkFile`] per distinct URL, in the order the URLs were first
/// seen. Every entry has its own file.
///
/// # Errors
///
/// The first download, decode or write failure stops the run and is
/// returned. Files already written stay on disk.
pub fn collect_artwork(
    api: &impl SpotifyApi,
    tracks: &[Track],
    folder: &Path,
) -> Result<Vec<ArtworkFile>> {
    let pb = ProgressBar::new(tracks.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("Generating artwork {pos}/{len} {bar:30.blue} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut seen: HashSet<&str> = HashSet::new();
    let mut taken: HashSet<PathBuf> = HashSet::new();
    let mut saved = Vec::new();

    for track in tracks {
        pb.set_message(track.name.clone());
        pb.inc(1);

        let url = track.artwork_url();
        if !seen.insert(url) {
            log::debug!("Artwork of '{}' already saved, skipping", track.name);
            continue;
        }

        let path = unique_path(folder, &track.file_stem(), &mut taken);
        if let Err(e) = save_artwork_to(api, track, &path) {
            pb.abandon();
            return Err(e);
        }
        saved.push(ArtworkFile {
            url: url.to_string(),
            path,
        });
    }

    pb.finish_and_clear();
    Ok(saved)
}

/// First of `<stem>.png`, `<stem>_2.png`, `<stem>_3.png`, ... not in `taken`.
/// The returned path is added to `taken`.
fn unique_path(folder: &Path, stem: &str, taken: &mut HashSet<PathBuf>) -> PathBuf {
    let mut path = folder.join(format!("{}.png", stem));
    let mut n = 2;
    while !taken.insert(path.clone()) {
        path = folder.join(format!("{}_{}.png", stem, n));
        n += 1;
    }
    if n > 2 {
        log::debug!("Name {} already used in this run, saving as {}", stem, path.display());
    }
    path
}

/// Downloads the artwork of a single track and writes it to
/// `<folder>/<file stem>.png`, re-encoded as PNG.
pub fn save_artwork(api: &impl SpotifyApi, track: &Track, folder: &Path) -> Result<PathBuf> {
    let path = folder.join(format!("{}.png", track.file_stem()));
    save_artwork_to(api, track, &path)?;
    Ok(path)
}

/// Downloads the artwork of `track` and writes it to `path` as PNG,
/// whatever format the provider served.
pub fn save_artwork_to(api: &impl SpotifyApi, track: &Track, path: &Path) -> Result<()> {
    let artwork = &track.artwork[0];
    let bytes = api.artwork(&artwork.url)?;
    let img = image::load_from_memory(&bytes).map_err(|source| Error::ArtworkDecode {
        url: artwork.url.clone(),
        source,
    })?;

    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::ArtworkWrite {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!(
        "Saved {} ({}x{} px, listed as {:?}x{:?})",
        path.display(),
        img.width(),
        img.height(),
        artwork.width,
        artwork.height
    );
    Ok(())
}
