use scrollsync_ui::ScrollbarProbe;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::error::WebError;

/// Measures the native scrollbar with a throwaway overflow container.
pub struct DomProbe {
    document: Document,
}

impl DomProbe {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn create_div(&self) -> Result<HtmlElement, WebError> {
        self.document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WebError::NotHtmlElement("div".to_string()))
    }

    fn measure(&self) -> Result<f64, WebError> {
        let body = self.document.body().ok_or(WebError::NoBody)?;
        let outer = self.create_div()?;
        let inner = self.create_div()?;
        outer.style().set_property("overflow", "scroll")?;
        outer.style().set_property("width", "100%")?;
        inner.style().set_property("width", "100%")?;

        body.append_child(&outer)?;
        outer.append_child(&inner)?;
        let width = outer.offset_width() - inner.offset_width();
        outer.remove_child(&inner)?;
        body.remove_child(&outer)?;

        Ok(f64::from(width))
    }
}

impl ScrollbarProbe for DomProbe {
    fn measure_scrollbar_width(&self) -> f64 {
        self.measure().unwrap_or_else(|e| {
            log::warn!("📜 Scrollbar probe failed, assuming overlay scrollbars: {}", e);
            0.0
        })
    }
}
