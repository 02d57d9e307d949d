use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use scrollsync_ui::{
    DomEvent, EventHandler, EventKind, FrameId, ListenerId, NodeMetrics, Platform, Target, TimerId,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlElement, MouseEvent, Window};

use super::error::WebError;

/// A scheduled frame or timeout and the closure the browser will call.
struct Scheduled {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

struct Attached {
    target: EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(Event)>,
}

/// Closures handed to the browser, kept alive until they fire or are
/// cancelled.
#[derive(Default)]
struct Registry {
    next_id: Cell<u32>,
    frames: RefCell<HashMap<FrameId, Scheduled>>,
    timers: RefCell<HashMap<TimerId, Scheduled>>,
    listeners: RefCell<HashMap<ListenerId, Attached>>,
}

impl Registry {
    fn next_id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// [`Platform`] backed by the browser window.
pub struct WebPlatform {
    window: Window,
    registry: Rc<Registry>,
}

impl WebPlatform {
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        Ok(Self {
            window,
            registry: Rc::new(Registry::default()),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn event_target(&self, target: &Target<HtmlElement>) -> EventTarget {
        match target {
            Target::Window => self.window.clone().into(),
            Target::Node(node) => node.clone().into(),
        }
    }
}

fn to_dom_event(event: &Event) -> DomEvent {
    event
        .dyn_ref::<MouseEvent>()
        .map_or_else(DomEvent::default, |mouse| DomEvent::pointer(f64::from(mouse.page_y())))
}

impl Platform for WebPlatform {
    type Node = HtmlElement;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> FrameId {
        let id = self.registry.next_id();
        let registry = Rc::downgrade(&self.registry);
        let closure: Closure<dyn FnMut()> = Closure::once(move || {
            if let Some(registry) = registry.upgrade() {
                registry.frames.borrow_mut().remove(&id);
            }
            callback();
        });
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                self.registry.frames.borrow_mut().insert(
                    id,
                    Scheduled {
                        handle,
                        _closure: closure,
                    },
                );
            }
            Err(e) => log::warn!("📜 requestAnimationFrame failed: {:?}", e),
        }
        id
    }

    fn cancel_frame(&self, id: FrameId) {
        let scheduled = self.registry.frames.borrow_mut().remove(&id);
        if let Some(scheduled) = scheduled {
            if let Err(e) = self.window.cancel_animation_frame(scheduled.handle) {
                log::warn!("📜 cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay_ms: u32) -> TimerId {
        let id = self.registry.next_id();
        let registry = Rc::downgrade(&self.registry);
        let closure: Closure<dyn FnMut()> = Closure::once(move || {
            if let Some(registry) = registry.upgrade() {
                registry.timers.borrow_mut().remove(&id);
            }
            callback();
        });
        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(handle) => {
                self.registry.timers.borrow_mut().insert(
                    id,
                    Scheduled {
                        handle,
                        _closure: closure,
                    },
                );
            }
            Err(e) => log::warn!("📜 setTimeout failed: {:?}", e),
        }
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        let scheduled = self.registry.timers.borrow_mut().remove(&id);
        if let Some(scheduled) = scheduled {
            self.window.clear_timeout_with_handle(scheduled.handle);
        }
    }

    fn add_listener(
        &self,
        target: &Target<HtmlElement>,
        kind: EventKind,
        handler: EventHandler,
        once: bool,
    ) -> ListenerId {
        let id = self.registry.next_id();
        let event_target = self.event_target(target);
        let registry = Rc::downgrade(&self.registry);
        let closure: Closure<dyn FnMut(Event)> = Closure::new(move |event: Event| {
            // The browser already dropped a `once` listener
            if once {
                if let Some(registry) = registry.upgrade() {
                    registry.listeners.borrow_mut().remove(&id);
                }
            }
            handler(&to_dom_event(&event));
        });

        let options = AddEventListenerOptions::new();
        options.set_once(once);
        match event_target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.dom_name(),
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(()) => {
                self.registry.listeners.borrow_mut().insert(
                    id,
                    Attached {
                        target: event_target,
                        kind,
                        closure,
                    },
                );
            }
            Err(e) => log::warn!("📜 addEventListener({}) failed: {:?}", kind.dom_name(), e),
        }
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let attached = self.registry.listeners.borrow_mut().remove(&id);
        if let Some(attached) = attached {
            if let Err(e) = attached.target.remove_event_listener_with_callback(
                attached.kind.dom_name(),
                attached.closure.as_ref().unchecked_ref(),
            ) {
                log::warn!(
                    "📜 removeEventListener({}) failed: {:?}",
                    attached.kind.dom_name(),
                    e
                );
            }
        }
    }

    fn metrics(&self, node: &HtmlElement) -> NodeMetrics {
        NodeMetrics {
            client_height: f64::from(node.client_height()),
            scroll_height: f64::from(node.scroll_height()),
            scroll_top: f64::from(node.scroll_top()),
        }
    }

    fn set_scroll_top(&self, node: &HtmlElement, scroll_top: f64) {
        node.set_scroll_top(scroll_top.round() as i32);
    }

    fn set_translate_y(&self, node: &HtmlElement, offset: f64) {
        if let Err(e) = node
            .style()
            .set_property("transform", &format!("translateY({}px)", offset))
        {
            log::warn!("📜 Failed to move thumb: {:?}", e);
        }
    }
}
