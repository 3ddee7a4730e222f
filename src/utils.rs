use std::ffi::OsString;

use crate::errors::{Error, Result};

/// Characters rejected by common filesystems. They are dropped from track
/// names before the safe-character pass.
pub const RESERVED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Returns the playlist ID from a direct ID or a share URL.
///
/// A non-empty `playlist_id` is returned unchanged, whatever the URL says.
/// Otherwise the ID is the last path segment of `playlist_url` before its
/// query string, e.g. `https://open.spotify.com/playlist/<ID>?si=...`.
///
/// # Errors
///
/// [`Error::InvalidIdentifier`] when there is no usable ID and the URL is
/// absent or has no segment before a `?`.
pub fn resolve_playlist_id(
    playlist_id: Option<&str>,
    playlist_url: Option<&str>,
) -> Result<String> {
    if let Some(id) = playlist_id.filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    playlist_url
        .and_then(id_from_url)
        .map(str::to_string)
        .ok_or(Error::InvalidIdentifier)
}

/// Path segment right before the `?` of a URL. `None` if the URL has no
/// query string or the segment is empty.
pub fn id_from_url(url: &str) -> Option<&str> {
    let (path, _query) = url.split_once('?')?;
    let (_, segment) = path.rsplit_once('/')?;
    if segment.is_empty() {
        None
    } else {
        Some(segment)
    }
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Replaces every run of characters outside `[A-Za-z0-9_.-]` with one `_`.
pub fn replace_unsafe_chars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if is_safe_char(c) {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Folder name for a playlist: lowercased, then made filesystem-safe.
pub fn sanitize_folder_name(playlist_name: &str) -> String {
    replace_unsafe_chars(&playlist_name.to_lowercase())
}

/// Strips [`RESERVED_CHARS`] and then applies [`replace_unsafe_chars`].
/// Case is preserved.
pub fn sanitize_file_stem(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !RESERVED_CHARS.contains(c)).collect();
    replace_unsafe_chars(&stripped)
}

/// File stem for a track's artwork, built from `"<title> - <artists>"`.
pub fn sanitize_file_name(track_name: &str, artists: &str) -> String {
    sanitize_file_stem(&format!("{} - {}", track_name, artists))
}

/// Name of the generated page: spaces become `_`, plus a fixed suffix.
pub fn tier_list_file_name(playlist_name: &str) -> String {
    format!("{}_Tier_List.html", playlist_name.replace(' ', "_"))
}

/// Rewrites the multi-character short flags `-pid` and `-url` to their long
/// forms, which clap can parse. Arguments after `--` are left alone.
pub fn expand_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            for (short, long) in [("-pid", "--playlistid"), ("-url", "--playlisturl")] {
                if s == short {
                    return OsString::from(long);
                }
                if let Some(value) = s.strip_prefix(short).and_then(|v| v.strip_prefix('=')) {
                    return OsString::from(format!("{}={}", long, value));
                }
            }
            arg
        })
        .collect()
}
