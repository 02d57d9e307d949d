//! scrollsync_ui - A synthetic scrollbar kept in sync with native scrolling
//!
//! The content panel scrolls natively; its real scrollbar is hidden behind
//! the layout edge and replaced by a styleable track whose size and position
//! mirror the panel. The widget is host-independent: it talks to the browser
//! (or the in-memory [`headless`] host) through the [`Platform`] trait.

mod callback;
mod constants;
mod debounce;
mod frame;
mod listener;
mod node;
mod options;
mod platform;
mod probe;
mod state;
mod style;
mod view;
mod widgets;
mod wrap;

pub mod headless;

#[cfg(test)]
mod tests;

pub use callback::SideEffect;
pub use constants::*;
pub use debounce::Debounced;
pub use frame::FrameChannel;
pub use listener::EventListener;
pub use node::{DeferredNode, NodeState};
pub use options::{Autohide, HeightMode, ScrollbarOptions};
pub use platform::{
    DomEvent, EventHandler, EventKind, FrameId, ListenerId, NodeMetrics, Platform, Target, TimerId,
};
pub use probe::{init_scrollbar_width, scrollbar_width, FixedProbe, ScrollbarProbe, ScrollbarWidth};
pub use state::{DragAnchor, MeasureSnapshot};
pub use style::{base_stylesheet, OffsetStyle, StyleInputs, TrackStyle, WidgetStyle};
pub use view::{div, Declarations, ElementNode, NodeRole, ViewNode};
pub use widgets::ScrollSync;
pub use wrap::wrap_if;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::options::{Autohide, HeightMode, ScrollbarOptions};
    pub use crate::platform::{DomEvent, EventKind, Platform, Target};
    pub use crate::view::{div, NodeRole, ViewNode};
    pub use crate::widgets::ScrollSync;
}
