//! Scroll container with a synthetic scrollbar.
//!
//! The content panel keeps scrolling natively while its real scrollbar is
//! pushed behind the layout edge. A separate track element plays the
//! scrollbar: its height is the visible fraction of the content and its
//! offset follows the panel's scroll position.
//!
//! The widget is driven by its host:
//! - [`ScrollSync::view`] describes the markup for the current state,
//! - [`ScrollSync::set_node`] hands back the created scroller/track elements,
//! - [`ScrollSync::commit`] runs after every render commit,
//! - [`ScrollSync::begin_drag`] is wired to pointer-down on the track.
//!
//! Everything else (scroll, resize, pointer move/up) arrives through
//! listeners the widget attaches itself on the [`Platform`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::callback::SideEffect;
use crate::constants::{HEIGHT_CLASS, INNER_CLASS, TRACKER_CLASS, WRAPPER_CLASS};
use crate::debounce::Debounced;
use crate::frame::FrameChannel;
use crate::listener::EventListener;
use crate::node::DeferredNode;
use crate::options::{HeightMode, ScrollbarOptions};
use crate::platform::{DomEvent, EventHandler, EventKind, ListenerId, Platform, Target};
use crate::probe::{scrollbar_width, ScrollbarWidth};
use crate::state::{is_full_ratio, DragAnchor, MeasureSnapshot};
use crate::style::{StyleInputs, TrackStyle, WidgetStyle};
use crate::view::{div, NodeRole, ViewNode};
use crate::wrap::wrap_if;

struct SyncState<P: Platform> {
    platform: Rc<P>,
    options: ScrollbarOptions,
    width: ScrollbarWidth,

    scroll_ratio: f64,
    autohide: bool,
    dragging: bool,
    disabled: bool,

    scroller: DeferredNode<P::Node>,
    track: DeferredNode<P::Node>,
    /// Node pair the last measurement was scheduled for
    measured: Option<(P::Node, P::Node)>,
    snapshot: MeasureSnapshot,
    /// The ratio changed, so the track is re-rendered at a new height and
    /// the snapshot's track height is stale until measured again
    track_stale: bool,

    drag_anchor: Option<DragAnchor>,
    drag_listeners: Vec<ListenerId>,

    measure_frame: FrameChannel<P>,
    thumb_frame: FrameChannel<P>,
    drag_frame: FrameChannel<P>,
    autohide_timer: Debounced<P>,
    scroll_listener: EventListener<P>,
    resize_listener: EventListener<P>,

    on_change: SideEffect,
}

impl<P: Platform> SyncState<P> {
    fn set_ratio(&mut self, ratio: f64) -> bool {
        if self.scroll_ratio == ratio {
            return false;
        }
        log::debug!("📜 Scroll ratio {:.3} -> {:.3}", self.scroll_ratio, ratio);
        self.scroll_ratio = ratio;
        true
    }

    fn set_autohide(&mut self, autohide: bool) -> bool {
        std::mem::replace(&mut self.autohide, autohide) != autohide
    }

    fn set_dragging(&mut self, dragging: bool) -> bool {
        std::mem::replace(&mut self.dragging, dragging) != dragging
    }

    fn set_disabled(&mut self, disabled: bool) -> bool {
        std::mem::replace(&mut self.disabled, disabled) != disabled
    }

    fn style_inputs(&self) -> StyleInputs {
        StyleInputs {
            scroll_ratio: self.scroll_ratio,
            dragging: self.dragging,
            autohide: self.autohide,
            disabled: self.disabled,
        }
    }

    fn remove_drag_listeners(&mut self) {
        for id in self.drag_listeners.drain(..) {
            self.platform.remove_listener(id);
        }
    }

    /// Re-run the non-zero-height check on both candidates.
    fn refresh_nodes(&mut self) -> bool {
        let platform = Rc::clone(&self.platform);
        let accept = |node: &P::Node| platform.metrics(node).client_height > 0.0;
        let scroller = self.scroller.refresh(accept);
        let track = self.track.refresh(accept);
        scroller || track
    }
}

/// Shared handle used by the widget and, weakly, by its callbacks.
struct Shared<P: Platform>(Rc<RefCell<SyncState<P>>>);

impl<P: Platform> Shared<P> {
    fn downgrade(&self) -> Weak<RefCell<SyncState<P>>> {
        Rc::downgrade(&self.0)
    }

    fn upgrade(weak: &Weak<RefCell<SyncState<P>>>) -> Option<Self> {
        weak.upgrade().map(Self)
    }

    fn notify(&self) {
        let on_change = self.0.borrow().on_change.clone();
        on_change.emit();
    }

    /// Mutate the state and notify the host if `f` reports a visible change.
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut SyncState<P>) -> bool,
    {
        let changed = {
            let mut state = self.0.borrow_mut();
            f(&mut *state)
        };
        if changed {
            self.notify();
        }
    }

    fn set_node(&self, role: NodeRole, candidate: Option<P::Node>) {
        let changed = {
            let mut state = self.0.borrow_mut();
            let platform = Rc::clone(&state.platform);
            let accept = |node: &P::Node| platform.metrics(node).client_height > 0.0;
            match role {
                NodeRole::Scroller => state.scroller.set(candidate, accept),
                NodeRole::Track => state.track.set(candidate, accept),
            }
        };
        if changed {
            log::debug!("📜 {:?} node changed", role);
            self.sync_effects();
        }
    }

    /// Bring listeners and measurement in line with the current nodes and
    /// disabled flag.
    fn sync_effects(&self) {
        let weak = self.downgrade();
        let remeasure = {
            let mut guard = self.0.borrow_mut();
            let state = &mut *guard;

            let resize_weak = weak.clone();
            let on_resize: EventHandler = Rc::new(move |_: &DomEvent| {
                if let Some(shared) = Shared::upgrade(&resize_weak) {
                    shared.on_resize();
                }
            });
            state
                .resize_listener
                .attach(Some(Target::Window), EventKind::Resize, on_resize, 0);

            let scroll_target = if state.disabled {
                None
            } else {
                state.scroller.get().cloned().map(Target::Node)
            };
            let on_scroll: EventHandler = Rc::new(move |_: &DomEvent| {
                if let Some(shared) = Shared::upgrade(&weak) {
                    shared.on_scroll();
                }
            });
            state
                .scroll_listener
                .attach(scroll_target, EventKind::Scroll, on_scroll, 0);

            let pair = match (state.scroller.get(), state.track.get()) {
                (Some(scroller), Some(track)) => Some((scroller.clone(), track.clone())),
                _ => None,
            };
            if pair != state.measured {
                state.measured = pair;
                state.measured.is_some()
            } else {
                false
            }
        };
        if remeasure {
            self.update_scrollbar();
        }
    }

    fn update_scrollbar(&self) {
        let state = self.0.borrow();
        if state.scroller.get().is_none() || state.track.get().is_none() {
            return;
        }
        let weak = self.downgrade();
        state.measure_frame.schedule(move || {
            if let Some(shared) = Shared::upgrade(&weak) {
                shared.measure();
            }
        });
    }

    fn measure(&self) {
        self.update(|state| {
            let (Some(scroller), Some(track)) = (state.scroller.get(), state.track.get()) else {
                return false;
            };
            let scroller_metrics = state.platform.metrics(scroller);
            if scroller_metrics.client_height <= 0.0 {
                log::trace!("📜 Panel collapsed, keeping last measurement");
                return false;
            }
            let snapshot = MeasureSnapshot::capture(scroller_metrics, state.platform.metrics(track));
            state.snapshot = snapshot;
            log::trace!(
                "📜 Measured client={:.1} scroll={:.1} track={:.1}",
                snapshot.client_height,
                snapshot.scroll_height,
                snapshot.track_height
            );
            match snapshot.scroll_ratio() {
                Some(ratio) if state.set_ratio(ratio) => {
                    state.track_stale = true;
                    true
                }
                _ => false,
            }
        });
    }

    fn on_resize(&self) {
        let nodes_changed = self.0.borrow_mut().refresh_nodes();
        if nodes_changed {
            self.sync_effects();
        }
        self.update_scrollbar();
    }

    fn on_scroll(&self) {
        let weak = self.downgrade();
        let changed = {
            let mut state = self.0.borrow_mut();
            if is_full_ratio(state.scroll_ratio) || state.track.get().is_none() {
                return;
            }

            let mut changed = false;
            if state.options.autohide.is_enabled() {
                changed = state.set_autohide(false);
                state.autohide_timer.trigger(());
            }
            state.thumb_frame.schedule(move || {
                if let Some(shared) = Shared::upgrade(&weak) {
                    shared.position_thumb();
                }
            });
            changed
        };
        if changed {
            self.notify();
        }
    }

    fn position_thumb(&self) {
        let state = self.0.borrow();
        let (Some(scroller), Some(track)) = (state.scroller.get(), state.track.get()) else {
            return;
        };
        let scroll_top = state.platform.metrics(scroller).scroll_top;
        if let Some(offset) = state.snapshot.thumb_offset(scroll_top) {
            log::trace!("📜 Thumb at {:.1}px (scrollTop {:.1})", offset, scroll_top);
            state.platform.set_translate_y(track, offset);
        }
    }

    fn hide_idle_thumb(&self) {
        self.update(|state| state.set_autohide(true));
    }

    fn begin_drag(&self, page_y: f64) {
        let weak = self.downgrade();
        let changed = {
            let mut guard = self.0.borrow_mut();
            let state = &mut *guard;
            if state.disabled {
                return;
            }
            let Some(scroller) = state.scroller.get() else {
                return;
            };
            let scroll_top = state.platform.metrics(scroller).scroll_top;

            state.remove_drag_listeners();
            state.drag_anchor = Some(DragAnchor::start(page_y, scroll_top, state.scroll_ratio));

            let move_weak = weak.clone();
            let on_move: EventHandler = Rc::new(move |event: &DomEvent| {
                if let Some(shared) = Shared::upgrade(&move_weak) {
                    shared.drag_to(event.page_y);
                }
            });
            let on_up: EventHandler = Rc::new(move |_: &DomEvent| {
                if let Some(shared) = Shared::upgrade(&weak) {
                    shared.end_drag();
                }
            });
            let move_id = state
                .platform
                .add_listener(&Target::Window, EventKind::PointerMove, on_move, false);
            let up_id = state
                .platform
                .add_listener(&Target::Window, EventKind::PointerUp, on_up, true);
            state.drag_listeners = vec![move_id, up_id];

            log::debug!("📜 Thumb drag started at y={:.1}, scrollTop={:.1}", page_y, scroll_top);
            state.set_dragging(true)
        };
        if changed {
            self.notify();
        }
    }

    fn drag_to(&self, page_y: f64) {
        let weak = self.downgrade();
        self.0.borrow().drag_frame.schedule(move || {
            if let Some(shared) = Shared::upgrade(&weak) {
                shared.apply_drag(page_y);
            }
        });
    }

    fn apply_drag(&self, page_y: f64) {
        let mut guard = self.0.borrow_mut();
        let state = &mut *guard;
        let (Some(scroller), Some(anchor)) = (state.scroller.get(), state.drag_anchor.as_mut()) else {
            return;
        };
        let scroll_top = anchor.advance(page_y);
        log::trace!("📜 Drag to y={:.1}, scrollTop={:.1}", page_y, scroll_top);
        state.platform.set_scroll_top(scroller, scroll_top);
    }

    fn end_drag(&self) {
        self.update(|state| {
            state.remove_drag_listeners();
            log::debug!("📜 Thumb drag ended");
            state.set_dragging(false)
        });
    }

    fn set_options(&self, options: ScrollbarOptions) {
        {
            let mut state = self.0.borrow_mut();
            if state.options == options {
                return;
            }
            match options.autohide.delay_ms() {
                Some(delay) => state.autohide_timer.set_delay(delay),
                None => {
                    state.autohide_timer.cancel();
                    state.set_autohide(false);
                }
            }
            if state.set_disabled(options.disabled) {
                log::debug!("📜 Scrollbar {}", if options.disabled { "disabled" } else { "enabled" });
            }
            state.options = options;
        }
        self.sync_effects();
        self.notify();
    }

    fn unmount(&self) {
        let mut state = self.0.borrow_mut();
        state.scroll_listener.detach();
        state.resize_listener.detach();
        state.remove_drag_listeners();
        state.measure_frame.cancel();
        state.thumb_frame.cancel();
        state.drag_frame.cancel();
        state.autohide_timer.cancel();
        state.drag_anchor = None;
        state.dragging = false;
        state.autohide = false;
        state.scroller.clear();
        state.track.clear();
        state.measured = None;
        state.track_stale = false;
        log::debug!("📜 ScrollSync unmounted");
    }
}

/// Synthetic scrollbar bound to a natively scrolling content panel.
///
/// Dropping the widget unmounts it: listeners are detached and pending
/// frames and timers are cancelled.
pub struct ScrollSync<P: Platform> {
    shared: Shared<P>,
}

impl<P: Platform> ScrollSync<P> {
    /// Create a widget using the process-wide native scrollbar width.
    pub fn new(platform: Rc<P>, options: ScrollbarOptions) -> Self {
        Self::with_scrollbar_width(platform, options, scrollbar_width())
    }

    /// Create a widget with an explicit native scrollbar width.
    pub fn with_scrollbar_width(platform: Rc<P>, options: ScrollbarOptions, width: ScrollbarWidth) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<SyncState<P>>>| {
            let idle_weak = weak.clone();
            let autohide_timer = Debounced::new(
                Rc::clone(&platform),
                move |()| {
                    if let Some(shared) = Shared::upgrade(&idle_weak) {
                        shared.hide_idle_thumb();
                    }
                },
                options.autohide.delay_ms().unwrap_or(0),
            );
            RefCell::new(SyncState {
                measure_frame: FrameChannel::new(Rc::clone(&platform), "measure"),
                thumb_frame: FrameChannel::new(Rc::clone(&platform), "thumb"),
                drag_frame: FrameChannel::new(Rc::clone(&platform), "drag"),
                scroll_listener: EventListener::new(Rc::clone(&platform)),
                resize_listener: EventListener::new(Rc::clone(&platform)),
                autohide_timer,
                platform,
                disabled: options.disabled,
                options,
                width,
                scroll_ratio: 1.0,
                autohide: false,
                dragging: false,
                scroller: DeferredNode::new(),
                track: DeferredNode::new(),
                measured: None,
                snapshot: MeasureSnapshot::default(),
                track_stale: false,
                drag_anchor: None,
                drag_listeners: Vec::new(),
                on_change: SideEffect::none(),
            })
        });
        Self {
            shared: Shared(inner),
        }
    }

    /// Set the callback invoked whenever the rendered output would change.
    pub fn on_change<F>(self, f: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.set_on_change(SideEffect::new(f));
        self
    }

    /// Replace the change callback on a widget that is already mounted.
    pub fn set_on_change(&self, on_change: SideEffect) {
        self.shared.0.borrow_mut().on_change = on_change;
    }

    /// Describe the markup for the current state around `children`.
    pub fn view(&self, children: ViewNode) -> ViewNode {
        let state = self.shared.0.borrow();
        let style = WidgetStyle::compute(state.width, &state.style_inputs());

        let fixed_height = match &state.options.height {
            HeightMode::Fixed(css) => Some(css.clone()),
            HeightMode::Content => None,
        };
        let height_wrapper = div()
            .class(HEIGHT_CLASS)
            .style(vec![("height", fixed_height.clone().unwrap_or_default())]);
        let content = wrap_if(fixed_height.is_some(), height_wrapper, children);

        div()
            .class(state.options.class_name.clone())
            .child(
                div().class(WRAPPER_CLASS).style(style.wrapper).child(
                    div()
                        .class(INNER_CLASS)
                        .role(NodeRole::Scroller)
                        .style(style.scroller)
                        .child(content),
                ),
            )
            .child(
                div()
                    .class(TRACKER_CLASS)
                    .role(NodeRole::Track)
                    .style(style.track.declarations()),
            )
            .into()
    }

    /// Hand over (or withdraw) the element created for `role`.
    pub fn set_node(&self, role: NodeRole, node: Option<P::Node>) {
        self.shared.set_node(role, node);
    }

    /// Hand over the natively scrolling content panel.
    pub fn set_scroller_node(&self, node: Option<P::Node>) {
        self.set_node(NodeRole::Scroller, node);
    }

    /// Hand over the track/thumb element.
    pub fn set_track_node(&self, node: Option<P::Node>) {
        self.set_node(NodeRole::Track, node);
    }

    /// Run after each render commit: re-checks nodes that were still
    /// zero-sized and keeps listeners in sync.
    pub fn commit(&self) {
        let track_stale = {
            let mut state = self.shared.0.borrow_mut();
            state.refresh_nodes();
            std::mem::take(&mut state.track_stale)
        };
        self.shared.sync_effects();
        if track_stale {
            self.shared.update_scrollbar();
        }
    }

    /// Schedule a measurement of the content panel and track.
    pub fn update_scrollbar(&self) {
        self.shared.update_scrollbar();
    }

    /// Pointer-down on the thumb at page coordinate `page_y`.
    pub fn begin_drag(&self, page_y: f64) {
        self.shared.begin_drag(page_y);
    }

    /// Apply new options; notifies when they differ from the current ones.
    pub fn set_options(&self, options: ScrollbarOptions) {
        self.shared.set_options(options);
    }

    /// Detach every listener and cancel pending frames and timers.
    pub fn unmount(&self) {
        self.shared.unmount();
    }

    /// Options currently in effect.
    pub fn options(&self) -> ScrollbarOptions {
        self.shared.0.borrow().options.clone()
    }

    /// Visible fraction of the content, `1.0` until first measured.
    pub fn scroll_ratio(&self) -> f64 {
        self.shared.0.borrow().scroll_ratio
    }

    /// True between pointer-down on the thumb and pointer-up.
    pub fn is_dragging(&self) -> bool {
        self.shared.0.borrow().dragging
    }

    /// True while the idle thumb is faded out.
    pub fn is_autohidden(&self) -> bool {
        self.shared.0.borrow().autohide
    }

    /// Mirrors the `disabled` option as last synchronized.
    pub fn is_disabled(&self) -> bool {
        self.shared.0.borrow().disabled
    }

    /// Last measurement of the panel and track.
    pub fn snapshot(&self) -> MeasureSnapshot {
        self.shared.0.borrow().snapshot
    }

    /// Native scrollbar width used for the layout offsets.
    pub fn scrollbar_width(&self) -> ScrollbarWidth {
        self.shared.0.borrow().width
    }

    /// Track style for the current state.
    pub fn track_style(&self) -> TrackStyle {
        TrackStyle::compute(&self.shared.0.borrow().style_inputs())
    }
}

impl<P: Platform> Drop for ScrollSync<P> {
    fn drop(&mut self) {
        self.shared.unmount();
    }
}
