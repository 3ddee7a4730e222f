//! Configuration for the tier list generator.
//!
//! Values come from command-line flags first and fall back to environment
//! variables. The environment may be seeded from a `.env` file in the
//! platform-specific local data directory:
//!
//! - Linux: `~/.local/share/tierlistify/.env`
//! - macOS: `~/Library/Application Support/tierlistify/.env`
//! - Windows: `%LOCALAPPDATA%/tierlistify/.env`
//!
//! A template of that file is copied next to it at build time.

use std::{env, path::PathBuf};

pub const APP_DIR: &str = "tierlistify";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Path of the optional `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(".env");
    path
}

/// Loads environment variables from the `.env` file in the local data
/// directory, if there is one.
///
/// Variables already present in the process environment are not overridden.
///
/// # Errors
///
/// Returns an error message if the file exists but cannot be read or parsed.
/// A missing file is not an error.
pub fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if !path.is_file() {
        log::debug!("No env file at {}", path.display());
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    log::debug!("Loaded env file {}", path.display());
    Ok(())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the Spotify API client ID from `SPOTIFY_API_AUTH_CLIENT_ID`.
pub fn spotify_client_id() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret from `SPOTIFY_API_AUTH_CLIENT_SECRET`.
///
/// The secret should never be logged.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    non_empty_var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the token endpoint used for the client-credentials exchange.
pub fn spotify_apitoken_url() -> String {
    non_empty_var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}
