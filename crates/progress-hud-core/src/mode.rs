//! Display modes for the HUD indicator

use serde::{Deserialize, Serialize};

use crate::indicator::IndicatorKind;

/// Indicator style the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudMode {
    /// Spinning activity indicator
    #[default]
    Indeterminate,
    /// Pie-style progress ring
    Determinate,
    /// Horizontal progress bar
    DeterminateBar,
    /// Ring drawn as an annulus
    AnnularDeterminate,
    /// Caller-supplied custom view
    CustomContent,
    /// Labels only, no indicator
    TextOnly,
}

impl HudMode {
    pub const ALL: [HudMode; 6] = [
        HudMode::Indeterminate,
        HudMode::Determinate,
        HudMode::DeterminateBar,
        HudMode::AnnularDeterminate,
        HudMode::CustomContent,
        HudMode::TextOnly,
    ];

    /// Whether the progress value is rendered in this mode
    pub fn is_determinate(&self) -> bool {
        matches!(
            self,
            HudMode::Determinate | HudMode::DeterminateBar | HudMode::AnnularDeterminate
        )
    }

    /// Indicator this mode asks for, before custom view availability is considered
    pub fn indicator_kind(&self) -> IndicatorKind {
        match self {
            HudMode::Indeterminate => IndicatorKind::Spinner,
            HudMode::Determinate | HudMode::AnnularDeterminate => IndicatorKind::Ring,
            HudMode::DeterminateBar => IndicatorKind::Bar,
            HudMode::CustomContent => IndicatorKind::CustomContent,
            HudMode::TextOnly => IndicatorKind::None,
        }
    }

    /// Get mode name
    pub fn name(&self) -> &'static str {
        match self {
            HudMode::Indeterminate => "INDETERMINATE",
            HudMode::Determinate => "DETERMINATE",
            HudMode::DeterminateBar => "BAR",
            HudMode::AnnularDeterminate => "ANNULAR",
            HudMode::CustomContent => "CUSTOM",
            HudMode::TextOnly => "TEXT",
        }
    }

    /// The mode after this one, wrapping around
    pub fn next(&self) -> HudMode {
        let index = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode() {
        assert_eq!(HudMode::default(), HudMode::Indeterminate);
    }

    #[test]
    fn test_determinate_modes() {
        let determinate: Vec<_> = HudMode::ALL.iter().filter(|m| m.is_determinate()).collect();
        assert_eq!(
            determinate,
            vec![&HudMode::Determinate, &HudMode::DeterminateBar, &HudMode::AnnularDeterminate]
        );
    }

    #[test]
    fn test_ring_shared_by_pie_and_annular() {
        assert_eq!(HudMode::Determinate.indicator_kind(), IndicatorKind::Ring);
        assert_eq!(HudMode::AnnularDeterminate.indicator_kind(), IndicatorKind::Ring);
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(HudMode::TextOnly.next(), HudMode::Indeterminate);
        assert_eq!(HudMode::Indeterminate.next(), HudMode::Determinate);
    }
}
