//! Bootstrap errors.
//!
//! Once the binder is running nothing is surfaced as an error: missing
//! containers, nodes and sections are logged and skipped. These variants only
//! cover what can go wrong while wiring the binder into a page.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("no global `window` available")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error("renderer rejected configuration: {0}")]
    RendererRejected(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl From<NavError> for JsValue {
    fn from(err: NavError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
