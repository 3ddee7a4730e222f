//! # CLI Module
//!
//! The two things a user can ask for, as straight-line sequences over the
//! other modules:
//!
//! - [`tier_list`] - artwork of a whole playlist plus the tier list page
//! - [`track_artwork`] - artwork of a single track
//!
//! ```text
//! flags → credentials → playlist id → Session::connect
//!       → playlist lookup → artwork folder → artwork::collect_artwork
//!       → page::create_tier_list → browser
//! ```
//!
//! Credentials and the playlist identifier are validated before the first
//! network call. Any failure is returned to `main`, which reports it and exits
//! with status 1. No step is retried.

mod tier_list;
mod track;

pub use tier_list::TierListOptions;
pub use tier_list::build_tier_list;
pub use tier_list::tier_list;
pub use track::TRACK_ARTWORK_DIR;
pub use track::save_track_artwork;
pub use track::track_artwork;
