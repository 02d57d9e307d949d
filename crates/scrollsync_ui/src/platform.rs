//! Platform capability interface
//!
//! The widget never touches a concrete surface directly. Everything it needs
//! from the host (animation frames, timers, event listeners and element
//! metrics) goes through [`Platform`], which is implemented by the browser
//! backend in the root crate and by [`crate::headless::HeadlessPlatform`].

use std::fmt;
use std::rc::Rc;

/// Handle of a queued animation-frame callback.
pub type FrameId = u32;

/// Handle of a pending timeout.
pub type TimerId = u32;

/// Handle of an attached event listener.
pub type ListenerId = u32;

/// Events the widget listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Native scroll of an element
    Scroll,
    /// Window resize
    Resize,
    /// Pointer button pressed on an element
    PointerDown,
    /// Pointer moved anywhere in the window
    PointerMove,
    /// Pointer button released anywhere in the window
    PointerUp,
}

impl EventKind {
    /// DOM event name for this kind.
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::PointerDown => "mousedown",
            EventKind::PointerMove => "mousemove",
            EventKind::PointerUp => "mouseup",
        }
    }
}

/// Payload delivered to listeners.
///
/// Only the vertical page coordinate is carried; scroll and resize events
/// report `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DomEvent {
    pub page_y: f64,
}

impl DomEvent {
    pub fn pointer(page_y: f64) -> Self {
        Self { page_y }
    }
}

/// Something a listener can be attached to.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<N> {
    Window,
    Node(N),
}

/// Shared listener callback.
pub type EventHandler = Rc<dyn Fn(&DomEvent)>;

/// Live measurements of a node, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeMetrics {
    pub client_height: f64,
    pub scroll_height: f64,
    pub scroll_top: f64,
}

/// Host capabilities consumed by the widget and its helpers.
///
/// Implementations must never invoke a callback synchronously from inside
/// one of these methods; frames, timers and listeners always run later from
/// the host's own event loop.
pub trait Platform: 'static {
    /// Host element handle
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> FrameId;

    fn cancel_frame(&self, id: FrameId);

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay_ms: u32) -> TimerId;

    fn clear_timeout(&self, id: TimerId);

    /// Attach `handler` to `target`. A `once` listener is removed by the host
    /// after its first invocation.
    fn add_listener(
        &self,
        target: &Target<Self::Node>,
        kind: EventKind,
        handler: EventHandler,
        once: bool,
    ) -> ListenerId;

    /// Detach a listener. Unknown or already-removed ids are ignored.
    fn remove_listener(&self, id: ListenerId);

    fn metrics(&self, node: &Self::Node) -> NodeMetrics;

    fn set_scroll_top(&self, node: &Self::Node, scroll_top: f64);

    /// Apply `transform: translateY(offset px)` to the node.
    fn set_translate_y(&self, node: &Self::Node, offset: f64);
}
