//! Renders the tier list page from the saved artwork.

use std::path::{Path, PathBuf};

use minijinja::{Environment, context};

use crate::{
    errors::{Error, Result},
    info, utils,
};

/// Built-in page: tiers S to F and a pool of images that can be dragged
/// between them.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/tier_list.html");

// The `.html` suffix turns on HTML auto-escaping.
const TEMPLATE_NAME: &str = "tier_list.html";

/// A rendered page and the file name it should be saved under.
#[derive(Debug, Clone)]
pub struct TierListPage {
    pub file_name: String,
    pub html: String,
}

impl TierListPage {
    /// Fills `template` with the playlist name, folder and image names.
    ///
    /// # Arguments
    ///
    /// * `playlist_name` - Shown as the page title, also names the file
    /// * `folder` - How the page refers to the image folder, relative to the
    ///   page itself
    /// * `images` - File names inside `folder`, in display order
    /// * `template` - Template source; values are HTML-escaped
    ///
    /// # Errors
    ///
    /// [`Error::Template`] when the template does not parse or fails to
    /// render.
    pub fn render(
        playlist_name: &str,
        folder: &str,
        images: &[String],
        template: &str,
    ) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, template)?;
        let html = env.get_template(TEMPLATE_NAME)?.render(context! {
            playlist_name => playlist_name,
            folder => folder,
            images => images,
        })?;

        Ok(TierListPage {
            file_name: utils::tier_list_file_name(playlist_name),
            html,
        })
    }

    /// Writes the page into `dir` and returns the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.html).map_err(|source| Error::PageWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Names of the regular files in `folder`, in directory listing order.
pub fn list_images(folder: &Path) -> Result<Vec<String>> {
    let listing_err = |source| Error::FolderListing {
        path: folder.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(listing_err)? {
        let entry = entry.map_err(listing_err)?;
        if entry.file_type().map_err(listing_err)?.is_file() {
            images.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(images)
}

/// Reads a custom template, or returns the built-in one.
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).map_err(|source| Error::TemplateRead {
            path: p.to_path_buf(),
            source,
        }),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Builds the tier list for the images in `<out_dir>/<folder>` and writes it
/// to `out_dir`.
///
/// # Returns
///
/// Path of the written page, see [`utils::tier_list_file_name`].
///
/// # Errors
///
/// Listing, rendering and writing errors are returned as is.
pub fn create_tier_list(
    playlist_name: &str,
    out_dir: &Path,
    folder: &str,
    template: &str,
) -> Result<PathBuf> {
    let images = list_images(&out_dir.join(folder))?;
    let page = TierListPage::render(playlist_name, folder, &images, template)?;
    info!("Generating tier list: {}", page.file_name);
    page.write_to(out_dir)
}
