//! Centralized constants for scrollsync_ui
//!
//! All magic numbers shared between the widget, its style records and the
//! hosts are defined here.

// =============================================================================
// Native Scrollbar
// =============================================================================

/// Width used for layout offsets when the native scrollbar measures 0px
/// (overlay scrollbars, e.g. macOS "Automatically based on mouse").
pub const FALLBACK_SCROLLBAR_WIDTH: f64 = 20.0;

// =============================================================================
// Track & Thumb
// =============================================================================

/// Added to the track's client height so the thumb keeps a margin at the top
/// and bottom of its travel.
pub const TRACK_MARGIN: f64 = 12.0;

/// Thumb width at rest
pub const THUMB_WIDTH: f64 = 6.0;

/// Thumb right offset at rest
pub const THUMB_RIGHT: f64 = 2.0;

/// Thumb width while dragging (wider hit target)
pub const DRAG_THUMB_WIDTH: f64 = 10.0;

/// Thumb right offset while dragging
pub const DRAG_THUMB_RIGHT: f64 = 1.0;

/// Ratio reported before the first measurement and when content fits
pub const FULL_RATIO: f64 = 1.0;

// =============================================================================
// Options
// =============================================================================

/// Default root class name
pub const DEFAULT_CLASS_NAME: &str = "scrollbar";

/// Height keyword meaning "size to content"
pub const HEIGHT_CONTENT: &str = "content";

// =============================================================================
// Class Names
// =============================================================================

/// Class of the element shifting the content left by the scrollbar width
pub const WRAPPER_CLASS: &str = "wrapper";

/// Class of the natively scrolling content panel
pub const INNER_CLASS: &str = "inner";

/// Class of the fixed-height container used when `height` is not "content"
pub const HEIGHT_CLASS: &str = "fixed-height";

/// Class of the synthetic track/thumb
pub const TRACKER_CLASS: &str = "tracker";

// =============================================================================
// Base Stylesheet
// =============================================================================

/// Attribute marking the widget root, whatever its class name
pub const ROOT_ATTRIBUTE: &str = "data-scrollsync";

/// Id of the `<style>` element holding the base stylesheet
pub const STYLESHEET_ID: &str = "scrollsync-base-styles";
