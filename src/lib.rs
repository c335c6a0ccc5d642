//! progress-hud: a progress/status overlay with a timing policy
//!
//! Re-exports [`progress_hud_core`]. A [`Hud`] is attached to a [`Container`],
//! shown and hidden through its grace, minimum-show and delayed-hide windows,
//! and fed from background work through a [`progress_channel`].
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use progress_hud::{Container, HudRegistry, ManualScheduler, Phase};
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let registry = HudRegistry::new(scheduler.clone());
//! let container = Container::new("window");
//!
//! let hud = registry.show_hud(&container, false);
//! assert_eq!(hud.phase(), Phase::Visible);
//!
//! registry.hide_hud(&container, false);
//! scheduler.advance(Duration::ZERO);
//! assert_eq!(hud.phase(), Phase::Hidden);
//! assert!(container.find_hud().is_none());
//! ```

pub use progress_hud_core::*;
