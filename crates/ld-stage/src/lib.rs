//! # ld-stage: Ceremony stage system
//!
//! Presentation vocabulary shared by the draw engine and whatever renders
//! it. Nothing here picks tickets; it only names the moments of a ceremony
//! and says when they happen.
//!
//! ## Pieces
//!
//! - `Scene` / `DrawStatus`: the two top-level state values
//! - `PhaseType` / `SuspenseStyle` / `PhaseStep`: animated presentation styles
//! - `CeremonyTiming`: delay profiles (normal, rehearsal, instant)
//! - `TimerQueue`: cancelable, pausable timers on a host-driven clock
//! - `PhaseTimeline`: per-phase step scripts driven by a `TimerQueue`
//! - `AdvanceInput` / `AdvanceDebouncer`: the collapsed "advance" signal
//! - `CeremonyEvent`: journal entries consumed by the presentation layer

pub mod event;
pub mod input;
pub mod phase;
pub mod scene;
pub mod scheduler;
pub mod timeline;
pub mod timing;

pub use event::*;
pub use input::*;
pub use phase::*;
pub use scene::*;
pub use scheduler::*;
pub use timeline::*;
pub use timing::*;
