//! Tests for thumb dragging.

use crate::options::ScrollbarOptions;
use crate::platform::EventKind;

use super::Harness;

fn mounted() -> Harness {
    Harness::mount(200.0, 800.0, ScrollbarOptions::default())
}

#[test]
fn test_drag_scrolls_by_inverse_ratio() {
    let harness = mounted();

    harness.widget.begin_drag(100.0);
    assert!(harness.widget.is_dragging());

    harness.platform.pointer_move(110.0);
    harness.platform.run_frame();
    assert_eq!(harness.scroller.scroll_top(), 40.0);
}

#[test]
fn test_drag_moves_coalesce_to_latest() {
    let harness = mounted();
    harness.widget.begin_drag(100.0);

    harness.platform.pointer_move(105.0);
    harness.platform.pointer_move(115.0);
    harness.platform.pointer_move(120.0);
    assert_eq!(harness.platform.pending_frames(), 1);

    harness.platform.run_frame();
    assert_eq!(harness.scroller.scroll_top(), 80.0);
}

#[test]
fn test_drag_accumulates_across_frames() {
    let harness = mounted();
    harness.widget.begin_drag(100.0);

    harness.platform.pointer_move(110.0);
    harness.platform.run_frame();
    harness.platform.pointer_move(105.0);
    harness.platform.run_frame();
    assert_eq!(harness.scroller.scroll_top(), 20.0);
}

#[test]
fn test_dragging_enlarges_thumb() {
    let harness = mounted();
    assert_eq!(harness.track_style("width"), None);

    harness.widget.begin_drag(0.0);
    assert_eq!(harness.track_style("right").as_deref(), Some("1px"));
    assert_eq!(harness.track_style("width").as_deref(), Some("10px"));
}

#[test]
fn test_pointer_up_ends_drag() {
    let harness = mounted();
    harness.widget.begin_drag(100.0);
    assert_eq!(harness.platform.listener_count(EventKind::PointerMove), 1);
    assert_eq!(harness.platform.listener_count(EventKind::PointerUp), 1);

    harness.platform.pointer_up(100.0);
    assert!(!harness.widget.is_dragging());
    assert_eq!(harness.platform.listener_count(EventKind::PointerMove), 0);
    assert_eq!(harness.platform.listener_count(EventKind::PointerUp), 0);

    harness.platform.pointer_move(150.0);
    harness.platform.run_frame();
    assert_eq!(harness.scroller.scroll_top(), 0.0);
}

#[test]
fn test_move_pending_at_pointer_up_still_applies() {
    let harness = mounted();
    harness.widget.begin_drag(100.0);

    harness.platform.pointer_move(130.0);
    harness.platform.pointer_up(130.0);
    harness.platform.run_frame();
    assert_eq!(harness.scroller.scroll_top(), 120.0);
}

#[test]
fn test_second_drag_replaces_listeners() {
    let harness = mounted();
    harness.widget.begin_drag(100.0);
    harness.widget.begin_drag(100.0);
    assert_eq!(harness.platform.listener_count(EventKind::PointerMove), 1);
    assert_eq!(harness.platform.listener_count(EventKind::PointerUp), 1);
}

#[test]
fn test_drag_ignored_when_disabled() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::new().disabled(true));
    harness.widget.begin_drag(100.0);

    assert!(!harness.widget.is_dragging());
    assert_eq!(harness.platform.listener_count(EventKind::PointerMove), 0);
}
