//! Deterministic in-memory host
//!
//! `HeadlessPlatform` simulates the parts of a browser the widget depends on:
//! element metrics, native scroll events, animation frames, timers and
//! listeners, all driven by explicit calls and a manual millisecond clock.
//! It backs the test suite and the native demo binary.
//!
//! Event ordering follows the browser's rendering step: scroll events queued
//! since the last frame are dispatched first, then the animation-frame
//! callbacks that were pending when the frame started.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::platform::{
    DomEvent, EventHandler, EventKind, FrameId, ListenerId, NodeMetrics, Platform, Target, TimerId,
};
use crate::view::{NodeRole, ViewNode};

struct NodeData {
    id: u32,
    client_height: Cell<f64>,
    scroll_height: Cell<f64>,
    scroll_top: Cell<f64>,
    translate_y: Cell<Option<f64>>,
}

/// A simulated element.
#[derive(Clone)]
pub struct HeadlessNode(Rc<NodeData>);

impl HeadlessNode {
    pub fn id(&self) -> u32 {
        self.0.id
    }

    pub fn client_height(&self) -> f64 {
        self.0.client_height.get()
    }

    pub fn scroll_height(&self) -> f64 {
        self.0.scroll_height.get()
    }

    pub fn scroll_top(&self) -> f64 {
        self.0.scroll_top.get()
    }

    /// Last `translateY` applied to this node.
    pub fn translate_y(&self) -> Option<f64> {
        self.0.translate_y.get()
    }

    fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.client_height()).max(0.0)
    }
}

impl PartialEq for HeadlessNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HeadlessNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessNode")
            .field("id", &self.0.id)
            .field("client_height", &self.client_height())
            .field("scroll_height", &self.scroll_height())
            .field("scroll_top", &self.scroll_top())
            .finish()
    }
}

struct PendingTimer {
    id: TimerId,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

struct Registered {
    id: ListenerId,
    target: Target<HeadlessNode>,
    kind: EventKind,
    handler: EventHandler,
    once: bool,
}

#[derive(Default)]
struct HostState {
    now_ms: u64,
    next_id: u32,
    frames: Vec<(FrameId, Box<dyn FnOnce()>)>,
    timers: Vec<PendingTimer>,
    listeners: Vec<Registered>,
    scrolled: Vec<HeadlessNode>,
}

impl HostState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct HeadlessPlatform {
    state: RefCell<HostState>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element with the given visible and total heights.
    pub fn create_node(&self, client_height: f64, scroll_height: f64) -> HeadlessNode {
        let id = self.state.borrow_mut().next_id();
        HeadlessNode(Rc::new(NodeData {
            id,
            client_height: Cell::new(client_height),
            scroll_height: Cell::new(scroll_height.max(client_height)),
            scroll_top: Cell::new(0.0),
            translate_y: Cell::new(None),
        }))
    }

    /// Change an element's size, clamping its scroll position like a
    /// browser re-layout would.
    pub fn resize_node(&self, node: &HeadlessNode, client_height: f64, scroll_height: f64) {
        node.0.client_height.set(client_height);
        node.0.scroll_height.set(scroll_height.max(client_height));
        let clamped = node.scroll_top().min(node.max_scroll());
        if clamped != node.scroll_top() {
            self.set_scroll_top(node, clamped);
        }
    }

    /// Native user scroll (wheel or keyboard) to `scroll_top`.
    pub fn scroll_to(&self, node: &HeadlessNode, scroll_top: f64) {
        self.set_scroll_top(node, scroll_top);
    }

    /// Size `track` from the track element of a rendered `view`.
    ///
    /// `display: none` collapses it; otherwise its height is the percentage
    /// style applied to `container_height`.
    pub fn layout_track(&self, view: &ViewNode, track: &HeadlessNode, container_height: f64) {
        let Some(element) = view.find_role(NodeRole::Track) else {
            return;
        };
        let height = if element.style_value("display") == Some("none") {
            0.0
        } else {
            element
                .style_value("height")
                .and_then(|value| value.strip_suffix('%'))
                .and_then(|percent| percent.parse::<f64>().ok())
                .map(|percent| container_height * percent / 100.0)
                .unwrap_or(container_height)
        };
        self.resize_node(track, height, height);
    }

    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Run one rendering step: queued scroll events, then the animation
    /// frames that were pending when the step started.
    pub fn run_frame(&self) {
        let scrolled = std::mem::take(&mut self.state.borrow_mut().scrolled);
        for node in scrolled {
            self.dispatch(&Target::Node(node), EventKind::Scroll, DomEvent::default());
        }

        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        for (_, callback) in frames {
            callback();
        }
    }

    /// Advance the clock by `ms`, firing due timers in deadline order.
    pub fn advance(&self, ms: u64) {
        let target = self.state.borrow().now_ms + ms;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(_, timer)| (timer.due_ms, timer.id))
                    .map(|(index, _)| index);
                let callback = due.map(|index| {
                    let timer = state.timers.remove(index);
                    state.now_ms = state.now_ms.max(timer.due_ms);
                    timer.callback
                });
                callback
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.state.borrow_mut().now_ms = target;
    }

    /// Deliver an event to every listener registered for it.
    pub fn dispatch(&self, target: &Target<HeadlessNode>, kind: EventKind, event: DomEvent) {
        let handlers: Vec<EventHandler> = {
            let mut state = self.state.borrow_mut();
            let handlers = state
                .listeners
                .iter()
                .filter(|listener| listener.kind == kind && &listener.target == target)
                .map(|listener| Rc::clone(&listener.handler))
                .collect();
            state
                .listeners
                .retain(|listener| !(listener.once && listener.kind == kind && &listener.target == target));
            handlers
        };
        for handler in handlers {
            handler(&event);
        }
    }

    pub fn resize_window(&self) {
        self.dispatch(&Target::Window, EventKind::Resize, DomEvent::default());
    }

    pub fn pointer_down(&self, node: &HeadlessNode, page_y: f64) {
        self.dispatch(&Target::Node(node.clone()), EventKind::PointerDown, DomEvent::pointer(page_y));
    }

    pub fn pointer_move(&self, page_y: f64) {
        self.dispatch(&Target::Window, EventKind::PointerMove, DomEvent::pointer(page_y));
    }

    pub fn pointer_up(&self, page_y: f64) {
        self.dispatch(&Target::Window, EventKind::PointerUp, DomEvent::pointer(page_y));
    }

    /// Number of live listeners of `kind`, on any target.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }
}

impl Platform for HeadlessPlatform {
    type Node = HeadlessNode;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> FrameId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.frames.push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        self.state.borrow_mut().frames.retain(|(frame, _)| *frame != id);
    }

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay_ms: u32) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let due_ms = state.now_ms + u64::from(delay_ms);
        state.timers.push(PendingTimer {
            id,
            due_ms,
            callback,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.state.borrow_mut().timers.retain(|timer| timer.id != id);
    }

    fn add_listener(
        &self,
        target: &Target<HeadlessNode>,
        kind: EventKind,
        handler: EventHandler,
        once: bool,
    ) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.listeners.push(Registered {
            id,
            target: target.clone(),
            kind,
            handler,
            once,
        });
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.state.borrow_mut().listeners.retain(|listener| listener.id != id);
    }

    fn metrics(&self, node: &HeadlessNode) -> NodeMetrics {
        NodeMetrics {
            client_height: node.client_height(),
            scroll_height: node.scroll_height(),
            scroll_top: node.scroll_top(),
        }
    }

    fn set_scroll_top(&self, node: &HeadlessNode, scroll_top: f64) {
        let clamped = scroll_top.clamp(0.0, node.max_scroll());
        if clamped == node.scroll_top() {
            return;
        }
        node.0.scroll_top.set(clamped);
        let mut state = self.state.borrow_mut();
        if !state.scrolled.contains(node) {
            state.scrolled.push(node.clone());
        }
    }

    fn set_translate_y(&self, node: &HeadlessNode, offset: f64) {
        node.0.translate_y.set(Some(offset));
    }
}
