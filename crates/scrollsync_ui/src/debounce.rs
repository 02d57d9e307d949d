//! Debounced trigger
//!
//! Calling [`Debounced::trigger`] schedules the callback after `delay_ms` of
//! inactivity; every trigger cancels the previously scheduled call. Only the
//! arguments of the latest trigger reach the callback.

use std::cell::Cell;
use std::rc::Rc;

use crate::platform::{Platform, TimerId};

pub struct Debounced<P: Platform, A: 'static = ()> {
    platform: Rc<P>,
    callback: Rc<dyn Fn(A)>,
    delay_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<P: Platform, A: 'static> Debounced<P, A> {
    /// A delay of 0 still goes through the timer queue, it just fires on the
    /// next timer turn.
    pub fn new<F>(platform: Rc<P>, callback: F, delay_ms: u32) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            platform,
            callback: Rc::new(callback),
            delay_ms,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn trigger(&self, args: A) {
        self.cancel();
        let slot = Rc::clone(&self.pending);
        let callback = Rc::clone(&self.callback);
        let id = self.platform.set_timeout(
            Box::new(move || {
                slot.set(None);
                callback(args);
            }),
            self.delay_ms,
        );
        self.pending.set(Some(id));
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.platform.clear_timeout(id);
        }
    }

    /// Change the delay used by later triggers. A pending call keeps its
    /// original deadline.
    pub fn set_delay(&mut self, delay_ms: u32) {
        self.delay_ms = delay_ms;
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl<P: Platform, A: 'static> Drop for Debounced<P, A> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessPlatform;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<(u64, u32)>>>, Rc<HeadlessPlatform>) {
        (Rc::new(RefCell::new(Vec::new())), Rc::new(HeadlessPlatform::new()))
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let (calls, platform) = recorder();
        let log = Rc::clone(&calls);
        let clock = Rc::clone(&platform);
        let debounced = Debounced::new(
            Rc::clone(&platform),
            move |value: u32| log.borrow_mut().push((clock.now_ms(), value)),
            100,
        );

        debounced.trigger(1);
        platform.advance(60);
        debounced.trigger(2);
        platform.advance(60);
        assert!(calls.borrow().is_empty());

        platform.advance(40);
        assert_eq!(*calls.borrow(), vec![(160, 2)]);
        assert!(!debounced.is_pending());
    }

    #[test]
    fn test_zero_delay_fires_on_next_turn() {
        let (calls, platform) = recorder();
        let log = Rc::clone(&calls);
        let debounced = Debounced::new(
            Rc::clone(&platform),
            move |value: u32| log.borrow_mut().push((0, value)),
            0,
        );

        debounced.trigger(7);
        assert!(calls.borrow().is_empty());
        platform.advance(0);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_cancel_and_drop_clear_timer() {
        let (calls, platform) = recorder();
        let log = Rc::clone(&calls);
        let debounced = Debounced::new(
            Rc::clone(&platform),
            move |value: u32| log.borrow_mut().push((0, value)),
            50,
        );

        debounced.trigger(1);
        debounced.cancel();
        debounced.trigger(2);
        drop(debounced);

        platform.advance(100);
        assert!(calls.borrow().is_empty());
        assert_eq!(platform.pending_timers(), 0);
    }
}
