//! Spotify Playlist Tier List Library
//!
//! Fetches a playlist from the Spotify Web API, saves one PNG per distinct
//! album artwork into a folder named after the playlist and renders a static
//! drag-and-drop tier list page from those images.
//!
//! # Modules
//!
//! - `artwork` - artwork download, dedup by URL and PNG output
//! - `cli` - the end-to-end runs behind the command line
//! - `config` - environment variables and `.env` loading
//! - `errors` - error taxonomy and `Result` alias
//! - `page` - tier list rendering
//! - `spotify` - Spotify Web API session
//! - `types` - API records and the validated domain records
//! - `utils` - identifier resolution and name sanitizing

pub mod artwork;
pub mod cli;
pub mod config;
pub mod errors;
pub mod page;
pub mod spotify;
pub mod types;
pub mod utils;

pub use errors::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Connecting to Spotify...");
/// info!("Playlist has {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program
/// with status 1.
///
/// Only the binary's top level uses this. Library code returns errors.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
