pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod prompter;
pub mod scheduler;
pub mod scroll;
pub mod segment;
pub mod surface;

pub use config::{AppConfig, PlaybackConfig, ScrollConfig, TimeControlMode};
pub use error::{Error, Result};
pub use event::PrompterEvent;
pub use prompter::Prompter;
pub use surface::{DisplaySurface, SurfaceId};
