//! Marshalling updates from background work onto the control thread
//!
//! A [`Hud`] may only be touched by the thread that owns it. Workers hold a
//! [`ProgressSender`], which is `Send + Clone`, and the control thread applies
//! what arrives through the matching [`ProgressReceiver`].

use tokio::sync::mpsc;

use crate::hud::Hud;
use crate::mode::HudMode;

/// A change requested by background work
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    Progress(f32),
    Label(String),
    Details(String),
    Mode(HudMode),
    Hide { animated: bool },
}

/// Worker-side half of a progress channel
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: mpsc::UnboundedSender<ProgressUpdate>,
}

impl ProgressSender {
    /// Queue an update. Returns false once the receiver is gone.
    pub fn send(&self, update: ProgressUpdate) -> bool {
        self.tx.send(update).is_ok()
    }

    pub fn progress(&self, value: f32) -> bool {
        self.send(ProgressUpdate::Progress(value))
    }

    pub fn label(&self, text: impl Into<String>) -> bool {
        self.send(ProgressUpdate::Label(text.into()))
    }

    pub fn details(&self, text: impl Into<String>) -> bool {
        self.send(ProgressUpdate::Details(text.into()))
    }

    pub fn mode(&self, mode: HudMode) -> bool {
        self.send(ProgressUpdate::Mode(mode))
    }

    pub fn hide(&self, animated: bool) -> bool {
        self.send(ProgressUpdate::Hide { animated })
    }
}

/// Control-thread half of a progress channel
pub struct ProgressReceiver {
    rx: mpsc::UnboundedReceiver<ProgressUpdate>,
}

impl ProgressReceiver {
    /// Apply every update queued so far. Returns how many were applied.
    pub fn drain(&mut self, hud: &Hud) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.rx.try_recv() {
            hud.apply_update(update);
            applied += 1;
        }
        applied
    }

    /// Apply updates as they arrive until every sender is dropped.
    ///
    /// Run it as a local task on the control thread.
    pub async fn forward(mut self, hud: Hud) {
        while let Some(update) = self.rx.recv().await {
            hud.apply_update(update);
        }
        tracing::trace!(hud = %hud.id(), "progress channel closed");
    }
}

/// Create a connected sender/receiver pair
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx }, ProgressReceiver { rx })
}

impl Hud {
    /// Apply one marshalled update
    pub fn apply_update(&self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::Progress(value) => self.set_progress(value),
            ProgressUpdate::Label(text) => self.set_label(text),
            ProgressUpdate::Details(text) => self.set_details(text),
            ProgressUpdate::Mode(mode) => self.set_mode(mode),
            ProgressUpdate::Hide { animated } => self.hide(animated),
        }
    }
}
