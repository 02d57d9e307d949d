//! Coalescing animation-frame channels
//!
//! Each logical operation (measurement, scroll-driven thumb move, drag-driven
//! scroll) owns its own [`FrameChannel`]. Scheduling on a channel cancels
//! that channel's previous pending frame, so at most one update per operation
//! runs per rendered frame. Channels never cancel each other.

use std::cell::Cell;
use std::rc::Rc;

use crate::platform::{FrameId, Platform};

/// One "latest pending frame" slot.
pub struct FrameChannel<P: Platform> {
    platform: Rc<P>,
    pending: Rc<Cell<Option<FrameId>>>,
    name: &'static str,
}

impl<P: Platform> FrameChannel<P> {
    pub fn new(platform: Rc<P>, name: &'static str) -> Self {
        Self {
            platform,
            pending: Rc::new(Cell::new(None)),
            name,
        }
    }

    /// Queue `f` for the next frame, replacing whatever this channel had
    /// queued before.
    pub fn schedule<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        let slot = Rc::clone(&self.pending);
        let id = self.platform.request_frame(Box::new(move || {
            slot.set(None);
            f();
        }));
        log::trace!("{} frame {} queued", self.name, id);
        self.pending.set(Some(id));
    }

    /// Drop the pending frame, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            log::trace!("{} frame {} cancelled", self.name, id);
            self.platform.cancel_frame(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl<P: Platform> Drop for FrameChannel<P> {
    fn drop(&mut self) {
        self.cancel();
    }
}
