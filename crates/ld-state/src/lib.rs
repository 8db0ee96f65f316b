//! ld-state: Settings persistence
//!
//! Loads the draw settings once at startup, falls back to defaults when the
//! stored entry is missing or unusable, and overwrites it on every update.

mod backend;
mod store;

pub use backend::*;
pub use store::*;
