//! Playback session: the state machine deciding what plays next.
//!
//! The session owns the loop flag, volume and playback phase, and drives
//! the blocking interaction loop around the engine.

mod model;

pub use model::{Playback, Session, SessionError, SessionState};
