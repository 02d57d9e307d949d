//! Behavioural tests for the scroll widget on the headless host.
//!
//! Each test mounts a widget the way a host would: render, hand over the
//! scroller and track nodes, commit, then drive frames, timers and pointer
//! events through [`HeadlessPlatform`].

mod autohide_tests;
mod drag_tests;
mod lifecycle_tests;

use std::cell::Cell;
use std::rc::Rc;

use crate::headless::{HeadlessNode, HeadlessPlatform};
use crate::options::ScrollbarOptions;
use crate::probe::ScrollbarWidth;
use crate::view::ViewNode;
use crate::widgets::ScrollSync;

/// Native scrollbar width used by every harness.
const TEST_SCROLLBAR_WIDTH: f64 = 15.0;

/// A mounted widget plus the host-side nodes it is bound to.
struct Harness {
    platform: Rc<HeadlessPlatform>,
    scroller: HeadlessNode,
    track: HeadlessNode,
    widget: ScrollSync<HeadlessPlatform>,
    /// Number of change notifications received
    renders: Rc<Cell<u32>>,
}

impl Harness {
    /// Mount over a panel of `client_height` showing `scroll_height` of
    /// content and let the first measurement settle.
    fn mount(client_height: f64, scroll_height: f64, options: ScrollbarOptions) -> Self {
        let harness = Self::unsettled(client_height, scroll_height, options);
        harness.settle();
        harness
    }

    /// Mount without running any frame.
    fn unsettled(client_height: f64, scroll_height: f64, options: ScrollbarOptions) -> Self {
        let platform = Rc::new(HeadlessPlatform::new());
        let scroller = platform.create_node(client_height, scroll_height);
        let track = platform.create_node(client_height, client_height);
        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);
        let widget = ScrollSync::with_scrollbar_width(
            Rc::clone(&platform),
            options,
            ScrollbarWidth::from_measurement(TEST_SCROLLBAR_WIDTH),
        )
        .on_change(move || counter.set(counter.get() + 1));

        let harness = Self {
            platform,
            scroller,
            track,
            widget,
            renders,
        };
        harness.layout();
        harness.widget.set_scroller_node(Some(harness.scroller.clone()));
        harness.widget.set_track_node(Some(harness.track.clone()));
        harness.widget.commit();
        harness
    }

    fn view(&self) -> ViewNode {
        self.widget.view(ViewNode::text("content"))
    }

    /// Apply the current view to the track node without committing.
    fn layout(&self) -> ViewNode {
        let view = self.view();
        self.platform
            .layout_track(&view, &self.track, self.scroller.client_height());
        view
    }

    /// Re-render and commit, as a host does after a change notification.
    fn render(&self) -> ViewNode {
        let view = self.layout();
        self.widget.commit();
        view
    }

    /// Run frames, re-rendering after each, until no frame is pending.
    fn settle(&self) {
        for _ in 0..8 {
            self.platform.run_frame();
            self.render();
            if self.platform.pending_frames() == 0 {
                break;
            }
        }
    }

    fn track_style(&self, property: &str) -> Option<String> {
        let view = self.view();
        view.find_role(crate::view::NodeRole::Track)
            .and_then(|track| track.style_value(property))
            .map(str::to_string)
    }
}
