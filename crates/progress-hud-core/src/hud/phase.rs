//! Visibility phases

/// Public position of a HUD in its visibility cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Hidden,
    /// Waiting out the grace time
    PendingShow,
    Visible,
    /// Held on screen by the minimum show time, or fading out
    PendingHide,
}

impl Phase {
    /// Whether the bezel is on screen in this phase
    pub fn is_on_screen(&self) -> bool {
        matches!(self, Phase::Visible | Phase::PendingHide)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Hidden => "hidden",
            Phase::PendingShow => "pending-show",
            Phase::Visible => "visible",
            Phase::PendingHide => "pending-hide",
        }
    }
}

/// Internal stage; splits `PendingHide` by what it is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Hidden,
    Grace,
    Visible,
    MinShow,
    FadingOut,
}

impl Stage {
    pub(crate) fn phase(self) -> Phase {
        match self {
            Stage::Hidden => Phase::Hidden,
            Stage::Grace => Phase::PendingShow,
            Stage::Visible => Phase::Visible,
            Stage::MinShow | Stage::FadingOut => Phase::PendingHide,
        }
    }
}

/// Direction of an on-screen transition handed to the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    In,
    Out,
}
