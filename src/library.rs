//! Track catalog: on-demand directory listings filtered to audio files.
//!
//! Listings are ephemeral; nothing is cached between queries, so the
//! catalog always reflects the directory as it is right now.

mod model;
mod scan;

pub use model::Track;
pub use scan::{list_tracks, pick_random};
