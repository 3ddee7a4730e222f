//! Error types for every step of a tier list run.
//!
//! Nothing below `main` terminates the process. Each operation hands its
//! failure back as an [`Error`] and the binary decides how to report it and
//! which exit status to use.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// The two credentials needed for the client-credentials flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    ClientId,
    Secret,
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Credential::ClientId => "client id",
            Credential::Secret => "secret key",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Missing {0} for Spotify API. Set up an app at https://developer.spotify.com/dashboard to get a client ID and secret key."
    )]
    MissingCredential(Credential),

    #[error("Invalid playlist URL or ID")]
    InvalidIdentifier,

    #[error("Authentication with Spotify failed: {0}")]
    Authentication(#[source] reqwest::Error),

    #[error("Failed to look up {what}: {source}")]
    Lookup {
        what: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Spotify response is missing {entity}.{field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Track '{track}' cannot be used: {reason}")]
    MalformedTrack { track: String, reason: &'static str },

    #[error("Cannot create folder {}: {source}", .path.display())]
    FolderCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to download artwork {url}: {source}")]
    ArtworkFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode artwork {url}: {source}")]
    ArtworkDecode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save artwork to {}: {source}", .path.display())]
    ArtworkWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot list images in {}: {source}", .path.display())]
    FolderListing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read template {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render tier list: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Cannot write tier list to {}: {source}", .path.display())]
    PageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
