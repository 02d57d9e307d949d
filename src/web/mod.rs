//! Browser backend
//!
//! Implements the widget's [`scrollsync_ui::Platform`] on top of `web-sys`,
//! renders its view tree into real elements and exposes the mounted widget
//! to JavaScript as `CustomScrollbar`.

mod error;
mod mount;
mod platform;
mod probe;
mod render;

pub use error::WebError;
pub use mount::CustomScrollbar;
pub use platform::WebPlatform;
pub use probe::DomProbe;
