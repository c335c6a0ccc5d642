//! progress-hud-core: the state behind a progress/status overlay
//!
//! This crate owns no pixels. It provides:
//! - The HUD visibility state machine with grace, minimum-show and delayed-hide timing
//! - A scheduler abstraction with virtual-clock and tokio implementations
//! - Per-container lookup of the topmost HUD
//! - Mode to indicator selection
//! - A progress channel for marshalling worker updates onto the control thread
//!
//! A presentation layer implements [`Presenter`] and renders what it is told.

pub mod config;
pub mod container;
pub mod error;
pub mod hud;
pub mod indicator;
pub mod mode;
pub mod progress;
pub mod scheduler;

// Re-export commonly used types
pub use config::HudConfig;
pub use container::{Child, Container, ContainerId, HudRegistry};
pub use error::{HudError, Result};
pub use hud::{
    AnimationType, BackgroundStyle, Hud, HudDelegate, HudId, HudSnapshot, Layout, Phase, Presenter,
    Transition,
};
pub use indicator::{select_indicator, CustomView, Indicator, IndicatorChange, IndicatorKind};
pub use mode::HudMode;
pub use progress::{progress_channel, ProgressReceiver, ProgressSender, ProgressUpdate};
pub use scheduler::{ManualScheduler, Scheduler, TimerToken, TokioScheduler};
