//! Plain state records held by the scroll widget

use crate::constants::{FULL_RATIO, TRACK_MARGIN};
use crate::platform::NodeMetrics;

/// Last measurement of the content panel and track.
///
/// Held across renders without triggering one; the scroll handler reads it
/// instead of re-measuring on every scroll tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasureSnapshot {
    /// Visible height of the content panel
    pub client_height: f64,
    /// Total scrollable height of the content panel
    pub scroll_height: f64,
    /// Rendered track height plus [`TRACK_MARGIN`]
    pub track_height: f64,
}

impl MeasureSnapshot {
    pub fn capture(scroller: NodeMetrics, track: NodeMetrics) -> Self {
        Self {
            client_height: scroller.client_height,
            scroll_height: scroller.scroll_height,
            track_height: track.client_height + TRACK_MARGIN,
        }
    }

    /// Visible fraction of the content, `None` for an empty or collapsed
    /// panel.
    pub fn scroll_ratio(&self) -> Option<f64> {
        if self.client_height > 0.0 && self.scroll_height > 0.0 {
            Some((self.client_height / self.scroll_height).min(FULL_RATIO))
        } else {
            None
        }
    }

    /// Thumb offset for the given scroll position.
    ///
    /// Returns `None` when there is nothing to scroll.
    pub fn thumb_offset(&self, scroll_top: f64) -> Option<f64> {
        let max_scroll = self.scroll_height - self.client_height;
        if max_scroll <= 0.0 {
            return None;
        }
        let progress = scroll_top / max_scroll;
        Some(progress * (self.client_height - self.track_height))
    }
}

/// Returns true when the ratio means "content fits".
pub fn is_full_ratio(ratio: f64) -> bool {
    ratio >= FULL_RATIO
}

/// Pointer anchor of a thumb drag.
///
/// Only the drag's own pointer deltas are tracked from the `scroll_top`
/// captured at drag start; scrolling from other sources during the drag is
/// not folded back in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    /// Pointer Y at the last applied frame (page coordinates)
    pub last_page_y: f64,
    /// Scroll position written at the last applied frame
    pub last_scroll_top: f64,
    /// Scroll ratio when the drag started
    pub ratio: f64,
}

impl DragAnchor {
    pub fn start(page_y: f64, scroll_top: f64, ratio: f64) -> Self {
        Self {
            last_page_y: page_y,
            last_scroll_top: scroll_top,
            ratio,
        }
    }

    /// Move the anchor to `page_y` and return the new scroll position.
    ///
    /// A thumb move of 1px scrolls the content by `1 / ratio` px.
    pub fn advance(&mut self, page_y: f64) -> f64 {
        let delta = page_y - self.last_page_y;
        if self.ratio > 0.0 {
            self.last_scroll_top += delta / self.ratio;
        }
        self.last_page_y = page_y;
        self.last_scroll_top
    }
}
