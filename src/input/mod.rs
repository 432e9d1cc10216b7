//! Input handling
//!
//! Polls macroquad keyboard and mouse state into the session's
//! `InputSource` contract. Mouse actions accumulate between ticks until the
//! session clears them.

mod state;

pub use state::*;
