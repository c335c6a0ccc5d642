//! Indicator selection
//!
//! The HUD tracks which indicator is live as an explicit [`IndicatorKind`]
//! instead of inspecting concrete widgets. Indicators are only recreated
//! when the kind actually changes.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::mode::HudMode;

/// Opaque caller-owned view shown in [`HudMode::CustomContent`]
pub type CustomView = Rc<dyn Any>;

/// Kinds of indicator a HUD can display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    Spinner,
    Ring,
    Bar,
    CustomContent,
    None,
}

impl IndicatorKind {
    /// Indicator for `mode`; custom content without a view shows nothing
    pub fn for_mode(mode: HudMode, has_custom_view: bool) -> Self {
        match mode.indicator_kind() {
            IndicatorKind::CustomContent if !has_custom_view => IndicatorKind::None,
            kind => kind,
        }
    }
}

/// Outcome of [`select_indicator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorChange {
    /// Current indicator already matches
    Keep,
    /// Same ring, only the annular flag flips
    Retune { annular: bool },
    /// Indicator must be recreated
    Replace { kind: IndicatorKind, annular: bool },
}

/// Decide how the indicator must change to display `mode`
pub fn select_indicator(
    current: &Indicator,
    mode: HudMode,
    custom_view: Option<&CustomView>,
) -> IndicatorChange {
    let kind = IndicatorKind::for_mode(mode, custom_view.is_some());
    let annular = mode == HudMode::AnnularDeterminate;

    if kind != current.kind {
        return IndicatorChange::Replace { kind, annular };
    }

    match kind {
        IndicatorKind::Ring if current.annular != annular => IndicatorChange::Retune { annular },
        IndicatorKind::CustomContent if !same_view(current.custom.as_ref(), custom_view) => {
            IndicatorChange::Replace { kind, annular }
        }
        _ => IndicatorChange::Keep,
    }
}

fn same_view(a: Option<&CustomView>, b: Option<&CustomView>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ()),
        (None, None) => true,
        _ => false,
    }
}

/// The indicator currently attached to a HUD
#[derive(Clone)]
pub struct Indicator {
    kind: IndicatorKind,
    annular: bool,
    generation: u64,
    custom: Option<CustomView>,
}

impl Indicator {
    pub(crate) fn new(mode: HudMode) -> Self {
        Self {
            kind: IndicatorKind::for_mode(mode, false),
            annular: mode == HudMode::AnnularDeterminate,
            generation: 0,
            custom: None,
        }
    }

    pub fn kind(&self) -> IndicatorKind {
        self.kind
    }

    /// Ring drawn as an annulus
    pub fn is_annular(&self) -> bool {
        self.annular
    }

    /// Bumped every time the indicator is recreated
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn custom_view(&self) -> Option<&CustomView> {
        self.custom.as_ref()
    }

    /// Realise `change`. Returns true if anything visible changed.
    pub(crate) fn apply(
        &mut self,
        change: IndicatorChange,
        custom_view: Option<&CustomView>,
    ) -> bool {
        match change {
            IndicatorChange::Keep => false,
            IndicatorChange::Retune { annular } => {
                self.annular = annular;
                true
            }
            IndicatorChange::Replace { kind, annular } => {
                self.kind = kind;
                self.annular = annular;
                self.generation += 1;
                self.custom = match kind {
                    IndicatorKind::CustomContent => custom_view.cloned(),
                    _ => None,
                };
                true
            }
        }
    }
}

impl fmt::Debug for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indicator")
            .field("kind", &self.kind)
            .field("annular", &self.annular)
            .field("generation", &self.generation)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}
