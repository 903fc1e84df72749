//! Configuration schema, loading and persistence.
//!
//! The one setting the program mutates itself is the music directory;
//! everything else is a user-edited knob read at startup.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
