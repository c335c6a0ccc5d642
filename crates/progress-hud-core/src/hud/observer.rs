//! Delegate and presentation-layer callbacks

use std::time::Duration;

use super::{Hud, Phase, Transition};
use crate::indicator::Indicator;

/// Observer told when a hide has completed
pub trait HudDelegate {
    fn hud_was_hidden(&self, hud: &Hud);
}

impl<F> HudDelegate for F
where
    F: Fn(&Hud),
{
    fn hud_was_hidden(&self, hud: &Hud) {
        self(hud)
    }
}

/// Presentation layer contract
///
/// The HUD owns no pixels. A presenter renders whatever the HUD reports and
/// talks back only through the public `Hud` API. No internal borrow is held
/// while these run, so implementations may read or drive the HUD.
pub trait Presenter {
    /// Public phase changed
    fn phase_changed(&self, _hud: &Hud, _from: Phase, _to: Phase) {}

    /// Bezel starts appearing or disappearing
    fn transition(
        &self,
        _hud: &Hud,
        _transition: Transition,
        _animated: bool,
        _duration: Duration,
    ) {
    }

    /// Indicator was retuned or recreated
    fn indicator_changed(&self, _hud: &Hud, _indicator: &Indicator) {}

    /// New progress value in a determinate mode
    fn progress_changed(&self, _hud: &Hud, _progress: f32) {}

    /// Label, details or button text changed
    fn content_changed(&self, _hud: &Hud) {}
}
