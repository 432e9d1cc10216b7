//! Primal: a top-down survival sandbox.
//!
//! The simulation lives in [`game`] and has no windowing dependencies, so the
//! binary and the `xtask` tooling share it.

pub mod config;
pub mod game;
