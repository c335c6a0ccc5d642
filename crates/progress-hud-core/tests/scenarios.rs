//! End-to-end HUD scenarios driven by a virtual clock

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use progress_hud_core::{
    Container, Hud, HudConfig, HudMode, HudRegistry, IndicatorKind, ManualScheduler, Phase,
    Scheduler,
};

fn setup(config: HudConfig) -> (Rc<ManualScheduler>, HudRegistry, Container) {
    let scheduler = Rc::new(ManualScheduler::new());
    let registry = HudRegistry::with_config(scheduler.clone(), config);
    (scheduler, registry, Container::new("main"))
}

fn count_hides(hud: &Hud) -> Rc<Cell<u32>> {
    let hidden = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hidden);
    hud.set_delegate(move |_: &Hud| counter.set(counter.get() + 1));
    hidden
}

#[test]
fn show_then_immediate_hide_detaches() {
    let (scheduler, registry, container) = setup(HudConfig::default());

    let hud = registry.show_hud(&container, true);
    let hidden = count_hides(&hud);
    assert!(registry.hide_hud(&container, true));

    scheduler.advance(Duration::from_secs(1));
    assert_eq!(hidden.get(), 1);
    assert!(!container.contains(&hud));
    assert!(HudRegistry::find_hud(&container).is_none());
}

#[test]
fn grace_window_swallows_short_operations() {
    let config = HudConfig {
        grace_time_ms: 400,
        ..HudConfig::default()
    };
    let (scheduler, registry, container) = setup(config);

    let hud = registry.show_hud(&container, true);
    let hidden = count_hides(&hud);
    scheduler.advance(Duration::from_millis(150));
    registry.hide_hud(&container, true);

    scheduler.advance(Duration::from_secs(2));
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(hud.show_started_at(), None);
    assert_eq!(hidden.get(), 1);
    assert!(container.is_empty());
}

#[test]
fn minimum_show_time_is_honoured() {
    let config = HudConfig {
        min_show_time_ms: 1000,
        animation_ms: 0,
        ..HudConfig::default()
    };
    let (scheduler, registry, container) = setup(config);

    let hud = registry.show_hud(&container, true);
    let shown_at = hud.show_started_at().unwrap();
    scheduler.advance(Duration::from_millis(250));
    registry.hide_hud(&container, true);

    scheduler.advance(Duration::from_millis(749));
    assert_eq!(hud.phase(), Phase::PendingHide);

    scheduler.advance(Duration::from_millis(1));
    assert_eq!(hud.phase(), Phase::Hidden);
    assert_eq!(scheduler.now() - shown_at, Duration::from_millis(1000));
}

#[test]
fn delayed_hide_overridden_by_direct_hide() {
    let (scheduler, registry, container) = setup(HudConfig::default());

    let hud = registry.show_hud(&container, true);
    let hidden = count_hides(&hud);
    hud.hide_after_delay(true, Duration::from_secs(3));

    scheduler.advance(Duration::from_secs(1));
    hud.hide(true);
    scheduler.advance(Duration::from_secs(5));

    assert_eq!(hidden.get(), 1);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn ring_survives_annular_switch() {
    let (_, registry, container) = setup(HudConfig::default());
    let hud = registry.show_hud(&container, false);

    hud.set_mode(HudMode::Determinate);
    hud.set_progress(0.37);
    let generation = hud.indicator().generation();
    hud.set_mode(HudMode::AnnularDeterminate);

    assert_eq!(hud.indicator().kind(), IndicatorKind::Ring);
    assert_eq!(hud.indicator().generation(), generation);
    assert_eq!(hud.progress(), 0.37);
}

#[test]
fn nested_huds_resolve_latest_first() {
    let (scheduler, registry, container) = setup(HudConfig::default());

    let outer = registry.show_hud(&container, false);
    let inner = registry.show_hud(&container, false);
    assert_eq!(HudRegistry::find_hud(&container), Some(inner.clone()));

    registry.hide_hud(&container, false);
    assert_eq!(inner.phase(), Phase::Hidden);
    assert_eq!(HudRegistry::find_hud(&container), Some(outer.clone()));

    registry.hide_hud(&container, false);
    scheduler.advance(Duration::from_secs(1));
    assert!(container.is_empty());
}
