//! Tests for node acquisition, option changes and teardown.

use std::cell::Cell;
use std::rc::Rc;

use crate::headless::HeadlessPlatform;
use crate::options::ScrollbarOptions;
use crate::platform::EventKind;
use crate::probe::ScrollbarWidth;
use crate::widgets::ScrollSync;

use super::Harness;

#[test]
fn test_zero_height_nodes_wait_for_layout() {
    let harness = Harness::unsettled(0.0, 0.0, ScrollbarOptions::default());
    assert_eq!(harness.platform.listener_count(EventKind::Scroll), 0);
    assert_eq!(harness.platform.pending_frames(), 0);

    harness.platform.resize_node(&harness.scroller, 200.0, 800.0);
    harness.platform.resize_node(&harness.track, 200.0, 200.0);
    harness.widget.commit();
    assert_eq!(harness.platform.listener_count(EventKind::Scroll), 1);
    assert_eq!(harness.platform.pending_frames(), 1);

    harness.settle();
    assert_eq!(harness.widget.scroll_ratio(), 0.25);
}

#[test]
fn test_resize_acquires_sized_nodes() {
    let harness = Harness::unsettled(0.0, 0.0, ScrollbarOptions::default());
    assert_eq!(harness.platform.listener_count(EventKind::Resize), 1);

    harness.platform.resize_node(&harness.scroller, 200.0, 400.0);
    harness.platform.resize_node(&harness.track, 200.0, 200.0);
    harness.platform.resize_window();
    assert_eq!(harness.platform.listener_count(EventKind::Scroll), 1);

    harness.settle();
    assert_eq!(harness.widget.scroll_ratio(), 0.5);
}

#[test]
fn test_scroller_swap_moves_listener() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::default());
    let replacement = harness.platform.create_node(200.0, 400.0);

    harness.widget.set_scroller_node(Some(replacement.clone()));
    assert_eq!(harness.platform.listener_count(EventKind::Scroll), 1);
    harness.settle();
    assert_eq!(harness.widget.scroll_ratio(), 0.5);

    // The old panel no longer drives the thumb
    harness.platform.scroll_to(&harness.scroller, 300.0);
    harness.platform.run_frame();
    assert_eq!(harness.platform.pending_frames(), 0);
}

#[test]
fn test_disable_detaches_scroll_and_hides_track() {
    let options = ScrollbarOptions::default();
    let harness = Harness::mount(200.0, 800.0, options.clone());
    assert_eq!(harness.platform.listener_count(EventKind::Scroll), 1);

    harness.widget.set_options(options.clone().disabled(true));
    assert!(harness.widget.is_disabled());
    assert_eq!(harness.platform.listener_count(EventKind::Scroll), 0);
    assert_eq!(harness.track_style("display").as_deref(), Some("none"));
    harness.render();

    // Native scrolling is unaffected, the thumb is not moved
    harness.platform.scroll_to(&harness.scroller, 300.0);
    harness.platform.run_frame();
    assert_eq!(harness.scroller.scroll_top(), 300.0);
    assert_eq!(harness.track.translate_y(), None);

    harness.widget.set_options(options);
    assert_eq!(harness.platform.listener_count(EventKind::Scroll), 1);
    assert_eq!(harness.track_style("display"), None);
    harness.settle();
    assert_eq!(harness.track.client_height(), 50.0);
    assert_eq!(harness.widget.snapshot().track_height, 62.0);
}

#[test]
fn test_unchanged_options_do_not_notify() {
    let options = ScrollbarOptions::new().autohide(300);
    let harness = Harness::mount(200.0, 800.0, options.clone());
    let renders = harness.renders.get();

    harness.widget.set_options(options.clone());
    assert_eq!(harness.renders.get(), renders);

    harness.widget.set_options(options.class_name("side"));
    assert_eq!(harness.renders.get(), renders + 1);
    assert_eq!(harness.widget.options().class_name, "side");
}

#[test]
fn test_unmount_mid_drag_releases_everything() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::new().autohide(300));
    harness.platform.scroll_to(&harness.scroller, 40.0);
    harness.platform.run_frame();
    harness.widget.begin_drag(100.0);
    harness.platform.pointer_move(110.0);
    harness.platform.scroll_to(&harness.scroller, 50.0);

    harness.widget.unmount();
    for kind in [
        EventKind::Scroll,
        EventKind::Resize,
        EventKind::PointerMove,
        EventKind::PointerUp,
    ] {
        assert_eq!(harness.platform.listener_count(kind), 0, "{kind:?} listener left");
    }
    assert_eq!(harness.platform.pending_timers(), 0);
    assert!(!harness.widget.is_dragging());

    harness.platform.run_frame();
    harness.platform.pointer_move(200.0);
    harness.platform.run_frame();
    assert_eq!(harness.scroller.scroll_top(), 50.0);
    assert_eq!(harness.platform.pending_frames(), 0);
}

#[test]
fn test_drop_unmounts() {
    let platform = Rc::new(HeadlessPlatform::new());
    let scroller = platform.create_node(200.0, 800.0);
    let track = platform.create_node(200.0, 200.0);
    let widget = ScrollSync::with_scrollbar_width(
        Rc::clone(&platform),
        ScrollbarOptions::default(),
        ScrollbarWidth::from_measurement(15.0),
    );
    widget.set_scroller_node(Some(scroller));
    widget.set_track_node(Some(track));
    widget.commit();
    widget.begin_drag(0.0);
    assert_eq!(platform.pending_frames(), 1);

    drop(widget);
    assert_eq!(platform.listener_count(EventKind::Scroll), 0);
    assert_eq!(platform.listener_count(EventKind::PointerMove), 0);
    assert_eq!(platform.pending_frames(), 0);
}

#[test]
fn test_notifications_reach_replaced_callback() {
    let harness = Harness::mount(200.0, 800.0, ScrollbarOptions::default());
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    harness
        .widget
        .set_on_change(crate::callback::SideEffect::new(move || counter.set(counter.get() + 1)));

    harness.widget.begin_drag(0.0);
    harness.platform.pointer_up(0.0);
    assert_eq!(calls.get(), 2);
}
