//! Error type shared by the surface, widget, and configuration layers.
//!
//! Geometry never fails. Errors only arise at the DOM boundary or while
//! reading configuration supplied by the host page.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("container not found: #{0}")]
    ContainerNotFound(String),
    #[error("no browser window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("dom operation failed: {0}")]
    Dom(String),
    #[error("unknown diagram variant: {0}")]
    UnknownVariant(String),
    #[error("invalid diagram config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for DiagramError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<DiagramError> for JsValue {
    fn from(err: DiagramError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
