//! Scripted headless session.
//!
//! Mounts a widget on the in-memory host and walks it through the
//! interactions a user would perform: scrolling, dragging the thumb,
//! idling and resizing the window. Each step is logged and reported.

use std::cell::Cell;
use std::rc::Rc;

use scrollsync_ui::headless::{HeadlessNode, HeadlessPlatform};
use scrollsync_ui::{
    DomEvent, EventHandler, EventKind, ListenerId, Platform, ScrollSync, ScrollbarOptions,
    ScrollbarWidth, Target, ViewNode,
};
use web_time::Instant;

/// Visible height of the demo panel
const PANEL_HEIGHT: f64 = 300.0;
/// Height of the demo content
const CONTENT_HEIGHT: f64 = 1200.0;
/// Native scrollbar width assumed by the demo host
const DEMO_SCROLLBAR_WIDTH: f64 = 15.0;
/// Upper bound on frames run while waiting for the widget to settle
const MAX_SETTLE_FRAMES: usize = 8;

/// What the host observed after one scripted step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub label: &'static str,
    pub scroll_ratio: f64,
    pub scroll_top: f64,
    pub thumb_offset: Option<f64>,
    pub dragging: bool,
    pub autohidden: bool,
    /// Change notifications received so far
    pub renders: u32,
}

/// A widget mounted on the headless host, re-rendered on every change.
///
/// Dropping the session unmounts it.
pub struct DemoSession {
    platform: Rc<HeadlessPlatform>,
    scroller: HeadlessNode,
    track: HeadlessNode,
    widget: Rc<ScrollSync<HeadlessPlatform>>,
    renders: Rc<Cell<u32>>,
    /// Pointer-down listener on the track, until unmount
    track_down: Cell<Option<ListenerId>>,
}

impl DemoSession {
    pub fn mount(options: ScrollbarOptions, panel_height: f64, content_height: f64) -> Self {
        let platform = Rc::new(HeadlessPlatform::new());
        let scroller = platform.create_node(panel_height, content_height);
        let track = platform.create_node(panel_height, panel_height);
        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);
        let widget = Rc::new(
            ScrollSync::with_scrollbar_width(
                Rc::clone(&platform),
                options,
                ScrollbarWidth::from_measurement(DEMO_SCROLLBAR_WIDTH),
            )
            .on_change(move || counter.set(counter.get() + 1)),
        );

        let weak = Rc::downgrade(&widget);
        let on_track_down: EventHandler = Rc::new(move |event: &DomEvent| {
            if let Some(widget) = weak.upgrade() {
                widget.begin_drag(event.page_y);
            }
        });
        let track_down = platform.add_listener(
            &Target::Node(track.clone()),
            EventKind::PointerDown,
            on_track_down,
            false,
        );

        let session = Self {
            platform,
            scroller,
            track,
            widget,
            renders,
            track_down: Cell::new(Some(track_down)),
        };
        session.render();
        session.widget.set_scroller_node(Some(session.scroller.clone()));
        session.widget.set_track_node(Some(session.track.clone()));
        session.widget.commit();
        session.settle();
        session
    }

    pub fn platform(&self) -> &Rc<HeadlessPlatform> {
        &self.platform
    }

    pub fn widget(&self) -> &ScrollSync<HeadlessPlatform> {
        &self.widget
    }

    pub fn view(&self) -> ViewNode {
        self.widget.view(ViewNode::Slot)
    }

    /// Lay out the current view and commit it.
    pub fn render(&self) -> ViewNode {
        let view = self.view();
        self.platform
            .layout_track(&view, &self.track, self.scroller.client_height());
        self.widget.commit();
        view
    }

    /// Run frames until the widget stops scheduling work.
    pub fn settle(&self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            self.platform.run_frame();
            self.render();
            if self.platform.pending_frames() == 0 {
                return;
            }
        }
        log::warn!("📜 Widget still busy after {} frames", MAX_SETTLE_FRAMES);
    }

    pub fn scroll_to(&self, scroll_top: f64) {
        self.platform.scroll_to(&self.scroller, scroll_top);
        self.settle();
    }

    /// Drag the thumb from `from_y` to `to_y` in one pointer move.
    pub fn drag(&self, from_y: f64, to_y: f64) {
        self.platform.pointer_down(&self.track, from_y);
        self.platform.pointer_move(to_y);
        self.settle();
        self.platform.pointer_up(to_y);
        self.settle();
    }

    pub fn idle(&self, ms: u64) {
        self.platform.advance(ms);
        self.settle();
    }

    pub fn resize(&self, panel_height: f64) {
        self.platform
            .resize_node(&self.scroller, panel_height, self.scroller.scroll_height());
        self.platform.resize_window();
        self.settle();
    }

    /// Detach the track listener and unmount the widget.
    pub fn unmount(&self) {
        if let Some(id) = self.track_down.take() {
            self.platform.remove_listener(id);
            self.widget.unmount();
        }
    }

    pub fn report(&self, label: &'static str) -> StepReport {
        let report = StepReport {
            label,
            scroll_ratio: self.widget.scroll_ratio(),
            scroll_top: self.scroller.scroll_top(),
            thumb_offset: self.track.translate_y(),
            dragging: self.widget.is_dragging(),
            autohidden: self.widget.is_autohidden(),
            renders: self.renders.get(),
        };
        log::info!(
            "📜 {:<8} ratio={:.3} scrollTop={:>6.1} thumb={:?} autohidden={}",
            report.label,
            report.scroll_ratio,
            report.scroll_top,
            report.thumb_offset,
            report.autohidden
        );
        report
    }
}

/// Run the scripted session with `options` and return one report per step.
pub fn run(options: ScrollbarOptions) -> Vec<StepReport> {
    let started = Instant::now();
    let idle_ms = options.autohide.delay_ms().map_or(0, u64::from);
    let session = DemoSession::mount(options, PANEL_HEIGHT, CONTENT_HEIGHT);
    log::debug!("📜 Markup: {}", session.render().to_html());

    let mut reports = vec![session.report("mount")];

    session.scroll_to(450.0);
    reports.push(session.report("scroll"));

    session.drag(100.0, 130.0);
    reports.push(session.report("drag"));

    session.idle(idle_ms);
    reports.push(session.report("idle"));

    session.resize(CONTENT_HEIGHT / 2.0);
    reports.push(session.report("resize"));

    session.unmount();
    log::info!(
        "📜 Unmounted after {:?}, {} listeners left",
        started.elapsed(),
        [
            EventKind::Scroll,
            EventKind::Resize,
            EventKind::PointerDown,
            EventKind::PointerMove,
            EventKind::PointerUp,
        ]
        .into_iter()
        .map(|kind| session.platform().listener_count(kind))
        .sum::<usize>()
    );

    reports
}

impl Drop for DemoSession {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_session() {
        let reports = run(ScrollbarOptions::new().autohide(200));
        let step = |label: &str| reports.iter().find(|r| r.label == label).cloned().unwrap();

        assert_eq!(step("mount").scroll_ratio, 0.25);

        let scroll = step("scroll");
        assert_eq!(scroll.scroll_top, 450.0);
        // Thumb is 75px tall plus the 12px margin: 450 / 900 * (300 - 87)
        assert_eq!(scroll.thumb_offset, Some(106.5));

        let drag = step("drag");
        assert_eq!(drag.scroll_top, 570.0);
        assert!(!drag.dragging);

        assert!(step("idle").autohidden);
        assert_eq!(step("resize").scroll_ratio, 0.5);
    }

    #[test]
    fn test_session_without_autohide_never_hides() {
        let reports = run(ScrollbarOptions::default());
        assert!(reports.iter().all(|report| !report.autohidden));
    }

    #[test]
    fn test_dropped_session_detaches_everything() {
        let session = DemoSession::mount(ScrollbarOptions::default(), PANEL_HEIGHT, CONTENT_HEIGHT);
        let platform = Rc::clone(session.platform());
        let track = session.track.clone();
        platform.pointer_down(&track, 100.0);
        assert_eq!(platform.listener_count(EventKind::PointerDown), 1);
        assert_eq!(platform.listener_count(EventKind::PointerMove), 1);

        drop(session);
        assert_eq!(platform.listener_count(EventKind::PointerDown), 0);
        assert_eq!(platform.listener_count(EventKind::PointerMove), 0);
        assert_eq!(platform.listener_count(EventKind::Scroll), 0);

        // A stray press on the old track reaches nothing
        platform.pointer_down(&track, 120.0);
        assert_eq!(platform.listener_count(EventKind::PointerMove), 0);
    }
}
