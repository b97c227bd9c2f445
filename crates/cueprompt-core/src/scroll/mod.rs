//! Continuous scrolling for the prompter surfaces.
//!
//! - `speed` - control-value to pixels/sec mapping and derived estimates
//! - `engine` - per-surface time-interpolated position integrator
//! - `position` - percentage-based snapshot store keyed by paragraph
//! - `sync` - cross-surface mirroring with echo suppression

pub mod engine;
pub mod position;
pub mod speed;
pub mod sync;

pub use engine::ScrollEngine;
pub use position::{ScrollPositionStore, ScrollSnapshot};
pub use sync::DisplaySyncCoordinator;
