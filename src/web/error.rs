use wasm_bindgen::JsValue;

/// Errors raised while mounting or rendering in the browser.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("No window object available")]
    NoWindow,

    #[error("No document available")]
    NoDocument,

    #[error("Document has no body")]
    NoBody,

    #[error("No element with id '{0}'")]
    ElementNotFound(String),

    #[error("Element '{0}' is not an HTML element")]
    NotHtmlElement(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// The widget view must start with an element
    #[error("Widget root is not an element")]
    RootNotElement,

    /// Exception thrown by a DOM call
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
