//! Widget options.
//!
//! Options deserialize from the same camelCase keys a JS caller would pass
//! (`className`, `disabled`, `height`, `shouldRender`, `autohide`), so a JSON
//! object can be handed straight to the browser mount API.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLASS_NAME, HEIGHT_CONTENT};

/// Height of the content wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HeightMode {
    /// Size to content (no wrapper)
    #[default]
    Content,
    /// Fixed CSS height, e.g. `"300px"` or `"50vh"`
    Fixed(String),
}

impl HeightMode {
    pub fn is_content(&self) -> bool {
        matches!(self, HeightMode::Content)
    }
}

impl From<String> for HeightMode {
    fn from(value: String) -> Self {
        if value == HEIGHT_CONTENT {
            HeightMode::Content
        } else {
            HeightMode::Fixed(value)
        }
    }
}

impl From<HeightMode> for String {
    fn from(mode: HeightMode) -> Self {
        match mode {
            HeightMode::Content => HEIGHT_CONTENT.to_string(),
            HeightMode::Fixed(css) => css,
        }
    }
}

/// Idle delay before the thumb hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AutohideRepr", into = "AutohideRepr")]
pub enum Autohide {
    #[default]
    Off,
    After(u32),
}

impl Autohide {
    /// Delay in milliseconds, `None` when autohide is inactive (off or 0ms).
    pub fn delay_ms(&self) -> Option<u32> {
        match *self {
            Autohide::After(ms) if ms > 0 => Some(ms),
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.delay_ms().is_some()
    }
}

/// Wire form: `false` or a number of milliseconds.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AutohideRepr {
    Flag(bool),
    Millis(u32),
}

impl From<AutohideRepr> for Autohide {
    fn from(repr: AutohideRepr) -> Self {
        match repr {
            // `true` carries no delay
            AutohideRepr::Flag(_) => Autohide::Off,
            AutohideRepr::Millis(0) => Autohide::Off,
            AutohideRepr::Millis(ms) => Autohide::After(ms),
        }
    }
}

impl From<Autohide> for AutohideRepr {
    fn from(autohide: Autohide) -> Self {
        match autohide {
            Autohide::Off => AutohideRepr::Flag(false),
            Autohide::After(ms) => AutohideRepr::Millis(ms),
        }
    }
}

/// Configuration of a [`crate::ScrollSync`] widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollbarOptions {
    /// Class of the root element
    pub class_name: String,
    /// Hide the synthetic scrollbar and ignore thumb drags
    pub disabled: bool,
    /// Content wrapper height
    pub height: HeightMode,
    /// Reserved; carried for API compatibility and not consulted
    pub should_render: bool,
    /// Idle delay before hiding the thumb
    pub autohide: Autohide,
}

impl Default for ScrollbarOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            disabled: false,
            height: HeightMode::Content,
            should_render: true,
            autohide: Autohide::Off,
        }
    }
}

impl ScrollbarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root class name.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set a fixed CSS height for the content wrapper.
    pub fn height(mut self, css: impl Into<String>) -> Self {
        self.height = HeightMode::from(css.into());
        self
    }

    /// Hide the thumb after `ms` milliseconds without scrolling (0 disables).
    pub fn autohide(mut self, ms: u32) -> Self {
        self.autohide = if ms == 0 {
            Autohide::Off
        } else {
            Autohide::After(ms)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_js_props() {
        let options: ScrollbarOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ScrollbarOptions::default());
        assert_eq!(options.class_name, "scrollbar");
        assert!(options.should_render);
        assert!(options.height.is_content());
        assert_eq!(options.autohide.delay_ms(), None);
    }

    #[test]
    fn test_parse_camel_case_props() {
        let json = r#"{"className":"side","disabled":true,"height":"300px","autohide":300}"#;
        let options: ScrollbarOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.class_name, "side");
        assert!(options.disabled);
        assert_eq!(options.height, HeightMode::Fixed("300px".to_string()));
        assert_eq!(options.autohide.delay_ms(), Some(300));
    }

    #[test]
    fn test_autohide_false_and_zero_disable() {
        let off: ScrollbarOptions = serde_json::from_str(r#"{"autohide":false}"#).unwrap();
        assert!(!off.autohide.is_enabled());

        let zero: ScrollbarOptions = serde_json::from_str(r#"{"autohide":0}"#).unwrap();
        assert!(!zero.autohide.is_enabled());

        assert!(!ScrollbarOptions::new().autohide(0).autohide.is_enabled());
    }

    #[test]
    fn test_serialize_uses_js_shapes() {
        let options = ScrollbarOptions::new().height("50vh").autohide(250);
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["height"], "50vh");
        assert_eq!(value["autohide"], 250);

        let value = serde_json::to_value(ScrollbarOptions::default()).unwrap();
        assert_eq!(value["height"], "content");
        assert_eq!(value["autohide"], false);
    }
}
