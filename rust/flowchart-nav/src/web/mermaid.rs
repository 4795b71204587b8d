//! `Renderer` backed by the page's Mermaid object.

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::RendererOptions;
use crate::error::NavError;
use crate::surface::Renderer;

pub struct MermaidRenderer {
    handle: JsValue,
}

impl MermaidRenderer {
    /// Wrap the object the page imported Mermaid as
    pub fn new(handle: JsValue) -> Self {
        Self { handle }
    }

    /// `window.mermaid`, for pages loading Mermaid from a script tag
    pub fn from_global(window: &web_sys::Window) -> Self {
        let handle = Reflect::get(window, &JsValue::from_str("mermaid")).unwrap_or(JsValue::UNDEFINED);
        Self { handle }
    }

    pub fn is_available(&self) -> bool {
        !(self.handle.is_undefined() || self.handle.is_null())
    }
}

impl Renderer for MermaidRenderer {
    fn initialize(&self, options: &RendererOptions) -> Result<(), NavError> {
        if !self.is_available() {
            return Err(NavError::RendererUnavailable("no mermaid object".to_string()));
        }

        let initialize: Function = Reflect::get(&self.handle, &JsValue::from_str("initialize"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                NavError::RendererUnavailable("mermaid.initialize is not a function".to_string())
            })?;

        // Mermaid expects a plain object, not a Map
        let config = options
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| NavError::RendererRejected(e.to_string()))?;

        initialize
            .call1(&self.handle, &config)
            .map_err(|e| NavError::RendererRejected(format!("{:?}", e)))?;
        Ok(())
    }
}
