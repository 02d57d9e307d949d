//! Native scrollbar width probe
//!
//! The native scrollbar is pushed behind the layout edge by offsetting the
//! content by its width, so the width has to be known before the first render.
//! It is measured once per process through a [`ScrollbarProbe`] and cached;
//! later probes are ignored.

use std::sync::OnceLock;

use web_time::Instant;

use crate::constants::FALLBACK_SCROLLBAR_WIDTH;

/// Measures the width taken by the native scrollbar.
pub trait ScrollbarProbe {
    /// Width difference between an overflow-scrolling container and its
    /// full-width content, in pixels.
    fn measure_scrollbar_width(&self) -> f64;
}

/// Probe for hosts without a renderable surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe(pub f64);

impl ScrollbarProbe for FixedProbe {
    fn measure_scrollbar_width(&self) -> f64 {
        self.0
    }
}

/// Result of the native scrollbar measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarWidth {
    /// Width reported by the probe (may be 0 for overlay scrollbars)
    pub native: f64,
    /// Width used for layout offsets, never 0
    pub effective: f64,
}

impl ScrollbarWidth {
    pub fn from_measurement(native: f64) -> Self {
        let native = if native.is_finite() { native.max(0.0) } else { 0.0 };
        let effective = if native > 0.0 {
            native
        } else {
            FALLBACK_SCROLLBAR_WIDTH
        };
        Self { native, effective }
    }
}

static SCROLLBAR_WIDTH: OnceLock<ScrollbarWidth> = OnceLock::new();

/// Measure the scrollbar width with `probe` unless it is already known.
pub fn init_scrollbar_width(probe: &dyn ScrollbarProbe) -> ScrollbarWidth {
    *SCROLLBAR_WIDTH.get_or_init(|| {
        let started = Instant::now();
        let width = ScrollbarWidth::from_measurement(probe.measure_scrollbar_width());
        log::debug!(
            "Native scrollbar width {}px (effective {}px), probed in {:?}",
            width.native,
            width.effective,
            started.elapsed()
        );
        width
    })
}

/// The process-wide scrollbar width, falling back to a zero-width probe
/// when nothing was measured.
pub fn scrollbar_width() -> ScrollbarWidth {
    init_scrollbar_width(&FixedProbe(0.0))
}
