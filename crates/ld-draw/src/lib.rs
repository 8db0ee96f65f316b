//! # ld-draw: Lucky draw engine
//!
//! Picks winning tickets and runs the ceremony around them.
//!
//! ## Architecture
//!
//! ```text
//! SettingsStore (ld-state)
//!     │
//!     v
//! select_ticket ── stratified segment, duplicate avoidance, fallback
//!     │
//!     v
//! DrawStateManager ── idle → countdown → drawing → winner-display
//!     │
//!     v
//! CeremonyController ── curtain → ready → suspense → reveal → thank-you
//!     │
//!     v
//! Presentation (journal events + state accessors)
//! ```

pub mod ceremony;
pub mod manager;
pub mod picker;
pub mod selector;

pub use ceremony::*;
pub use manager::*;
pub use picker::*;
pub use selector::*;
