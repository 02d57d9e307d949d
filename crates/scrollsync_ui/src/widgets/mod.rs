//! Widget implementations

mod scroll_sync;

pub use scroll_sync::ScrollSync;
