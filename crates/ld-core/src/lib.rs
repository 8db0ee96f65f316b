//! ld-core: Shared types for the lucky draw ceremony
//!
//! Settings, winner records, the error taxonomy and the text exports
//! (CSV table, clipboard summary) that every other crate builds on.

pub mod error;
pub mod export;
pub mod settings;
pub mod winner;

pub use error::*;
pub use export::*;
pub use settings::*;
pub use winner::*;
