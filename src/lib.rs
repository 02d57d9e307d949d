//! ScrollSync - A synthetic scrollbar kept in sync with native scrolling
//!
//! The widget itself lives in `scrollsync_ui`. This crate adds the
//! application layer: persisted configuration, a scripted headless demo and,
//! on WASM, the browser backend exposed to JavaScript.

mod config;
pub mod demo;

pub use config::{AppConfig, CONFIG_VERSION, ConfigError, LogLevel};

// Browser backend
#[cfg(target_arch = "wasm32")]
mod web;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(target_arch = "wasm32")]
pub use web::{CustomScrollbar, DomProbe, WebError, WebPlatform};
