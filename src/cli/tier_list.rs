use std::path::{Path, PathBuf};

use crate::{
    artwork,
    errors::Result,
    info, page,
    spotify::{Credentials, Session, SpotifyApi},
    success, utils, warning,
};

/// What to build and where, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TierListOptions {
    /// Bare playlist ID, preferred over `playlist_url` when non-empty.
    pub playlist_id: Option<String>,
    /// Share URL of the playlist.
    pub playlist_url: Option<String>,
    /// Custom page template. The built-in one is used when absent.
    pub template: Option<PathBuf>,
    /// Directory that receives the artwork folder and the page.
    pub output_dir: PathBuf,
    /// Open the page in the default browser once written.
    pub open: bool,
}

/// Authenticates and builds the tier list for one playlist. Returns the path
/// of the written page.
pub fn tier_list(credentials: Credentials, opts: &TierListOptions) -> Result<PathBuf> {
    let playlist_id =
        utils::resolve_playlist_id(opts.playlist_id.as_deref(), opts.playlist_url.as_deref())?;
    let template = page::load_template(opts.template.as_deref())?;

    info!("Connecting to Spotify...");
    let session = Session::connect(&credentials)?;
    build_tier_list(&session, &playlist_id, &opts.output_dir, &template, opts.open)
}

/// Steps of [`tier_list`] that come after authentication.
///
/// # Arguments
///
/// * `api` - Authenticated session, or any other [`SpotifyApi`]
/// * `playlist_id` - Resolved playlist ID
/// * `output_dir` - Directory that receives the artwork folder and the page
/// * `template` - Page template source
/// * `open` - Whether to launch the browser at the end
///
/// # Returns
///
/// Path of the written tier list page.
///
/// # Errors
///
/// Fails on the first lookup, artwork, folder or page error. A browser that
/// cannot be launched is only a warning.
pub fn build_tier_list(
    api: &impl SpotifyApi,
    playlist_id: &str,
    output_dir: &Path,
    template: &str,
    open: bool,
) -> Result<PathBuf> {
    let playlist = api.playlist(playlist_id)?;
    info!(
        "Playlist '{}' ({}) has {} tracks",
        playlist.name,
        playlist.id,
        playlist.tracks.len()
    );

    let folder = utils::sanitize_folder_name(&playlist.name);
    let folder_path = output_dir.join(&folder);
    artwork::ensure_folder(&folder_path)?;

    let saved = artwork::collect_artwork(api, &playlist.tracks, &folder_path)?;
    success!("Saved {} artwork images to {}", saved.len(), folder);

    let page_path = page::create_tier_list(&playlist.name, output_dir, &folder, template)?;
    success!("Tier list written to {}", page_path.display());

    if open {
        open_in_browser(&page_path);
    }
    Ok(page_path)
}

fn open_in_browser(page: &Path) {
    let target = std::path::absolute(page).unwrap_or_else(|_| page.to_path_buf());
    if webbrowser::open(&target.to_string_lossy()).is_err() {
        warning!(
            "Failed to open browser. Please open the following file manually:\n{}",
            target.display()
        )
    }
}
