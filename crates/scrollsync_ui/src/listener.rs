//! Declarative event-listener attachment
//!
//! An [`EventListener`] describes "this handler should be attached to this
//! target for this event". Calling [`EventListener::attach`] again with the
//! same target and event keeps the existing registration; a different target
//! or event detaches the old one first. An absent target detaches. Dropping
//! the listener detaches it.

use std::rc::Rc;

use crate::debounce::Debounced;
use crate::platform::{DomEvent, EventHandler, EventKind, ListenerId, Platform, Target};

struct Registration<P: Platform> {
    target: Target<P::Node>,
    kind: EventKind,
    id: ListenerId,
    debounce: Option<Rc<Debounced<P, DomEvent>>>,
}

pub struct EventListener<P: Platform> {
    platform: Rc<P>,
    current: Option<Registration<P>>,
}

impl<P: Platform> EventListener<P> {
    pub fn new(platform: Rc<P>) -> Self {
        Self {
            platform,
            current: None,
        }
    }

    /// Attach `handler` to `target` for `kind`, optionally debounced by
    /// `debounce_ms` (0 attaches the handler directly).
    pub fn attach(
        &mut self,
        target: Option<Target<P::Node>>,
        kind: EventKind,
        handler: EventHandler,
        debounce_ms: u32,
    ) {
        let Some(target) = target else {
            self.detach();
            return;
        };

        if let Some(current) = &self.current {
            if current.target == target && current.kind == kind {
                return;
            }
        }
        self.detach();

        let (handler, debounce) = if debounce_ms > 0 {
            let inner = Rc::clone(&handler);
            let debounced = Rc::new(Debounced::new(
                Rc::clone(&self.platform),
                move |event: DomEvent| inner(&event),
                debounce_ms,
            ));
            let trigger = Rc::clone(&debounced);
            let wrapped: EventHandler = Rc::new(move |event: &DomEvent| trigger.trigger(*event));
            (wrapped, Some(debounced))
        } else {
            (handler, None)
        };

        let id = self.platform.add_listener(&target, kind, handler, false);
        log::debug!("Attached {} listener {}", kind.dom_name(), id);
        self.current = Some(Registration {
            target,
            kind,
            id,
            debounce,
        });
    }

    pub fn detach(&mut self) {
        if let Some(registration) = self.current.take() {
            self.platform.remove_listener(registration.id);
            if let Some(debounce) = registration.debounce {
                debounce.cancel();
            }
            log::debug!(
                "Detached {} listener {}",
                registration.kind.dom_name(),
                registration.id
            );
        }
    }

    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }
}

impl<P: Platform> Drop for EventListener<P> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessPlatform;
    use std::cell::Cell;

    fn counting_handler() -> (EventHandler, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        (Rc::new(move |_: &DomEvent| counter.set(counter.get() + 1)), count)
    }

    #[test]
    fn test_same_target_keeps_registration() {
        let platform = Rc::new(HeadlessPlatform::new());
        let mut listener = EventListener::new(Rc::clone(&platform));
        let (handler, count) = counting_handler();

        listener.attach(Some(Target::Window), EventKind::Resize, Rc::clone(&handler), 0);
        listener.attach(Some(Target::Window), EventKind::Resize, handler, 0);
        assert_eq!(platform.listener_count(EventKind::Resize), 1);

        platform.resize_window();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_target_change_reattaches() {
        let platform = Rc::new(HeadlessPlatform::new());
        let first = platform.create_node(100.0, 400.0);
        let second = platform.create_node(100.0, 400.0);
        let mut listener = EventListener::new(Rc::clone(&platform));
        let (handler, count) = counting_handler();

        listener.attach(Some(Target::Node(first.clone())), EventKind::Scroll, Rc::clone(&handler), 0);
        listener.attach(Some(Target::Node(second.clone())), EventKind::Scroll, handler, 0);
        assert_eq!(platform.listener_count(EventKind::Scroll), 1);

        platform.scroll_to(&first, 50.0);
        platform.run_frame();
        assert_eq!(count.get(), 0);

        platform.scroll_to(&second, 50.0);
        platform.run_frame();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_absent_target_detaches() {
        let platform = Rc::new(HeadlessPlatform::new());
        let mut listener = EventListener::new(Rc::clone(&platform));
        let (handler, _) = counting_handler();

        listener.attach(Some(Target::Window), EventKind::Resize, Rc::clone(&handler), 0);
        listener.attach(None, EventKind::Resize, handler, 0);
        assert!(!listener.is_attached());
        assert_eq!(platform.listener_count(EventKind::Resize), 0);
    }

    #[test]
    fn test_debounced_handler_fires_once() {
        let platform = Rc::new(HeadlessPlatform::new());
        let mut listener = EventListener::new(Rc::clone(&platform));
        let (handler, count) = counting_handler();

        listener.attach(Some(Target::Window), EventKind::Resize, handler, 100);
        platform.resize_window();
        platform.advance(50);
        platform.resize_window();
        platform.advance(99);
        assert_eq!(count.get(), 0);

        platform.advance(1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_detaches() {
        let platform = Rc::new(HeadlessPlatform::new());
        let (handler, _) = counting_handler();
        {
            let mut listener = EventListener::new(Rc::clone(&platform));
            listener.attach(Some(Target::Window), EventKind::Resize, handler, 0);
            assert_eq!(platform.listener_count(EventKind::Resize), 1);
        }
        assert_eq!(platform.listener_count(EventKind::Resize), 0);
    }
}
