//! Tests for hiding the thumb after an idle period.

use crate::options::ScrollbarOptions;

use super::Harness;

fn scroll(harness: &Harness, scroll_top: f64) {
    harness.platform.scroll_to(&harness.scroller, scroll_top);
    harness.platform.run_frame();
}

#[test]
fn test_thumb_hides_after_idle_delay() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::new().autohide(300));
    assert!(!harness.widget.is_autohidden());

    scroll(&harness, 50.0);
    assert_eq!(harness.platform.pending_timers(), 1);
    harness.platform.advance(299);
    assert!(!harness.widget.is_autohidden());
    harness.platform.advance(1);
    assert!(harness.widget.is_autohidden());
    assert_eq!(harness.track_style("opacity").as_deref(), Some("0"));
}

#[test]
fn test_scroll_shows_thumb_immediately() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::new().autohide(300));
    scroll(&harness, 50.0);
    harness.platform.advance(300);
    assert!(harness.widget.is_autohidden());

    let renders = harness.renders.get();
    scroll(&harness, 60.0);
    assert!(!harness.widget.is_autohidden());
    assert_eq!(harness.renders.get(), renders + 1);
    assert_eq!(harness.track_style("opacity"), None);
}

#[test]
fn test_scroll_restarts_idle_delay() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::new().autohide(300));

    scroll(&harness, 50.0);
    harness.platform.advance(250);
    scroll(&harness, 70.0);
    assert_eq!(harness.platform.pending_timers(), 1);

    harness.platform.advance(299);
    assert!(!harness.widget.is_autohidden());
    harness.platform.advance(1);
    assert!(harness.widget.is_autohidden());
}

#[test]
fn test_no_timer_without_autohide() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::default());
    scroll(&harness, 50.0);
    assert_eq!(harness.platform.pending_timers(), 0);
    assert!(!harness.widget.is_autohidden());
}

#[test]
fn test_turning_autohide_off_shows_thumb() {
    let options = ScrollbarOptions::new().autohide(300);
    let harness = Harness::mount(200.0, 800.0, options.clone());
    scroll(&harness, 50.0);
    harness.platform.advance(300);
    assert!(harness.widget.is_autohidden());

    harness.widget.set_options(options.autohide(0));
    assert!(!harness.widget.is_autohidden());
    assert_eq!(harness.platform.pending_timers(), 0);
}

#[test]
fn test_changed_delay_applies_to_next_scroll() {
    let options = ScrollbarOptions::new().autohide(300);
    let harness = Harness::mount(200.0, 800.0, options.clone());
    harness.widget.set_options(options.autohide(100));

    scroll(&harness, 50.0);
    harness.platform.advance(100);
    assert!(harness.widget.is_autohidden());
}
