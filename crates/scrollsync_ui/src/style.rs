//! Style records for the widget's three layers.
//!
//! Every visibility and geometry rule lives here as a pure function of the
//! widget state; the widget only assembles [`WidgetStyle`] and hands the
//! declarations to the view tree.

use crate::constants::{
    DRAG_THUMB_RIGHT, DRAG_THUMB_WIDTH, INNER_CLASS, ROOT_ATTRIBUTE, THUMB_RIGHT, THUMB_WIDTH,
    TRACKER_CLASS, WRAPPER_CLASS,
};
use crate::probe::ScrollbarWidth;
use crate::state::is_full_ratio;
use crate::view::Declarations;

/// Widget state the styles depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleInputs {
    pub scroll_ratio: f64,
    pub dragging: bool,
    pub autohide: bool,
    pub disabled: bool,
}

/// Geometry and visibility of the track/thumb element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    /// Thumb height as a percentage of the container
    pub height_percent: f64,
    /// Right offset while dragging
    pub right: Option<f64>,
    /// Enlarged width while dragging
    pub width: Option<f64>,
    /// `opacity: 0`
    pub transparent: bool,
    /// `display: none`
    pub hidden: bool,
}

impl TrackStyle {
    pub fn compute(inputs: &StyleInputs) -> Self {
        let visible = !inputs.autohide && (!inputs.disabled || is_full_ratio(inputs.scroll_ratio));
        Self {
            height_percent: inputs.scroll_ratio * 100.0,
            right: inputs.dragging.then_some(DRAG_THUMB_RIGHT),
            width: inputs.dragging.then_some(DRAG_THUMB_WIDTH),
            transparent: !visible,
            hidden: inputs.disabled,
        }
    }

    pub fn declarations(&self) -> Declarations {
        let mut declarations = Vec::with_capacity(5);
        if let Some(right) = self.right {
            declarations.push(("right", px(right)));
        }
        if let Some(width) = self.width {
            declarations.push(("width", px(width)));
        }
        declarations.push(("height", format!("{}%", self.height_percent)));
        if self.transparent {
            declarations.push(("opacity", "0".to_string()));
        }
        if self.hidden {
            declarations.push(("display", "none".to_string()));
        }
        declarations
    }
}

/// Shift applied to hide the native scrollbar behind the layout edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetStyle {
    width: ScrollbarWidth,
}

impl OffsetStyle {
    pub fn new(width: ScrollbarWidth) -> Self {
        Self { width }
    }

    /// Outer wrapper: pulls the content left by the scrollbar width.
    pub fn wrapper(&self) -> Declarations {
        vec![("margin-left", px(-self.width.effective))]
    }

    /// Inner scroller: pushes the native scrollbar past the right edge and
    /// pads the content back into view.
    pub fn scroller(&self) -> Declarations {
        vec![
            ("right", px(-self.width.effective)),
            ("padding", format!("0 {} 0 0", px(self.width.effective))),
            ("width", format!("calc(100% + {})", px(self.width.native))),
        ]
    }
}

/// All inline styles of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetStyle {
    pub wrapper: Declarations,
    pub scroller: Declarations,
    pub track: TrackStyle,
}

impl WidgetStyle {
    pub fn compute(width: ScrollbarWidth, inputs: &StyleInputs) -> Self {
        let offset = OffsetStyle::new(width);
        Self {
            wrapper: offset.wrapper(),
            scroller: offset.scroller(),
            track: TrackStyle::compute(inputs),
        }
    }
}

/// Layout rules shared by every mounted widget.
///
/// The inline declarations only carry what depends on widget state. Hosts
/// that render real markup install this once per document: it clips the
/// root, makes the inner panel the scroll container and pins the track to
/// the root's right edge so its percentage height resolves.
pub fn base_stylesheet() -> String {
    let root = format!("[{ROOT_ATTRIBUTE}]");
    format!(
        "{root} {{ position: relative; overflow: hidden; height: 100%; }}\n\
         {root} > .{WRAPPER_CLASS} {{ height: 100%; overflow: hidden; }}\n\
         {root} .{INNER_CLASS} {{ position: relative; overflow-y: scroll; height: 100%; }}\n\
         {root} > .{TRACKER_CLASS} {{ position: absolute; top: 0; right: {right}; width: {width}; \
         border-radius: {radius}; background: rgba(0, 0, 0, 0.4); cursor: pointer; \
         transition: opacity 0.2s, width 0.1s; }}\n",
        right = px(THUMB_RIGHT),
        width = px(THUMB_WIDTH),
        radius = px(THUMB_WIDTH / 2.0),
    )
}

fn px(value: f64) -> String {
    format!("{value}px")
}
