//! Side-effect callbacks handed to the widget by its host.
//!
//! # Examples
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use scrollsync_ui::SideEffect;
//!
//! let renders = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&renders);
//! let on_change = SideEffect::new(move || counter.set(counter.get() + 1));
//!
//! on_change.emit();
//! on_change.clone().emit();
//! assert_eq!(renders.get(), 2);
//! ```

use std::fmt;
use std::rc::Rc;

/// A side-effect callback that doesn't return a message.
///
/// Cloning shares the same closure, so a clone can be taken out of a
/// `RefCell` borrow and emitted after the borrow is released.
#[derive(Clone, Default)]
pub struct SideEffect {
    f: Option<Rc<dyn Fn()>>,
}

impl SideEffect {
    /// Create a new side-effect callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            f: Some(Rc::new(f)),
        }
    }

    /// Create an empty side-effect callback.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the side-effect callback, if it exists.
    pub fn emit(&self) {
        if let Some(ref f) = self.f {
            f();
        }
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl fmt::Debug for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffect")
            .field("set", &self.is_some())
            .finish()
    }
}
