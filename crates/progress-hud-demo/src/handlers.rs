//! Key handling for the HUD demo

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::DemoState;

pub const DELAYED_HIDE: Duration = Duration::from_secs(2);
pub const WORK_STEPS: u32 = 20;
pub const WORK_STEP: Duration = Duration::from_millis(150);

/// Handle a key press. Returns false to quit.
pub fn handle_key(key: KeyEvent, state: &mut DemoState) -> bool {
    if key.kind != KeyEventKind::Press {
        return true;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return false,
        KeyCode::Char('s') | KeyCode::Char('S') => {
            state.show();
        }
        KeyCode::Char('h') | KeyCode::Char('H') => state.hide(),
        KeyCode::Char('d') | KeyCode::Char('D') => state.hide_later(DELAYED_HIDE),
        KeyCode::Char('m') | KeyCode::Char('M') => state.cycle_mode(),
        KeyCode::Char('p') | KeyCode::Char('P') => state.bump_progress(),
        KeyCode::Char('w') | KeyCode::Char('W') => {
            state.start_work(WORK_STEPS, WORK_STEP);
        }
        KeyCode::Char('v') | KeyCode::Char('V') => state.add_view(),
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use progress_hud_core::{HudConfig, HudMode, ManualScheduler, Phase};
    use std::rc::Rc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> (Rc<ManualScheduler>, DemoState) {
        let scheduler = Rc::new(ManualScheduler::new());
        let state = DemoState::new(scheduler.clone(), HudConfig::default());
        (scheduler, state)
    }

    #[test]
    fn test_quit_keys() {
        let (_, mut state) = state();
        assert!(!handle_key(press(KeyCode::Char('q')), &mut state));
        assert!(!handle_key(press(KeyCode::Esc), &mut state));
        assert!(!handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut state
        ));
    }

    #[test]
    fn test_show_then_hide() {
        let (scheduler, mut state) = state();
        assert!(handle_key(press(KeyCode::Char('s')), &mut state));
        let hud = state.topmost().unwrap();
        assert_eq!(hud.phase(), Phase::Visible);

        assert!(handle_key(press(KeyCode::Char('h')), &mut state));
        scheduler.advance(Duration::from_secs(1));
        assert!(state.topmost().is_none());
    }

    #[test]
    fn test_mode_and_progress_keys() {
        let (_, mut state) = state();
        handle_key(press(KeyCode::Char('s')), &mut state);
        handle_key(press(KeyCode::Char('m')), &mut state);
        handle_key(press(KeyCode::Char('p')), &mut state);
        handle_key(press(KeyCode::Char('p')), &mut state);

        let hud = state.topmost().unwrap();
        assert_eq!(hud.mode(), HudMode::Determinate);
        assert!((hud.progress() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_release_is_ignored() {
        let (_, mut state) = state();
        let mut key = press(KeyCode::Char('s'));
        key.kind = KeyEventKind::Release;
        assert!(handle_key(key, &mut state));
        assert!(state.topmost().is_none());
    }

    #[test]
    fn test_add_view() {
        let (_, mut state) = state();
        handle_key(press(KeyCode::Char('v')), &mut state);
        assert_eq!(state.container.len(), 2);
    }
}
