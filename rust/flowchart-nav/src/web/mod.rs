//! Browser bindings
//!
//! `FlowchartNav` is the page-owned bootstrap: it builds one
//! [`NavigationBinder`] over the live DOM and the page's Mermaid object and
//! subscribes it to document ready and visibility changes.

mod dom;
mod mermaid;

pub use dom::DomSurface;
pub use mermaid::MermaidRenderer;

use std::rc::Rc;

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::binder::NavigationBinder;
use crate::config::BinderConfig;
use crate::error::NavError;
use crate::sections::{SectionLink, SectionMap};

/// Options accepted by `FlowchartNav.attach`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NavOptions {
    binder: BinderConfig,
    /// Replaces the built-in troubleshooting map
    sections: Option<Vec<SectionLink>>,
}

/// Click-to-navigate bindings for one flowchart
#[wasm_bindgen]
pub struct FlowchartNav {
    binder: Rc<NavigationBinder<DomSurface>>,
}

#[wasm_bindgen]
impl FlowchartNav {
    /// Create the binder and start it on document ready
    ///
    /// `mermaid` is the imported Mermaid object; pass `undefined` to use
    /// `window.mermaid`. `options` is `{ binder?, sections? }`, all keys
    /// optional. Keep the returned handle alive for the lifetime of the page.
    #[wasm_bindgen]
    pub fn attach(mermaid: JsValue, options: JsValue) -> Result<FlowchartNav, JsValue> {
        let options: NavOptions = if options.is_undefined() || options.is_null() {
            NavOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| NavError::InvalidOptions(e.to_string()))?
        };

        let surface = Rc::new(DomSurface::from_window()?);
        let renderer = if mermaid.is_undefined() || mermaid.is_null() {
            MermaidRenderer::from_global(surface.window())
        } else {
            MermaidRenderer::new(mermaid)
        };
        if !renderer.is_available() {
            tracing::warn!("mermaid not found, flowchart will stay static unless rendered elsewhere");
        }

        let sections = match options.sections {
            Some(links) => SectionMap::new(links),
            None => SectionMap::troubleshooting(),
        };

        let binder = NavigationBinder::new(surface, Box::new(renderer), sections, options.binder);
        binder.attach();
        tracing::info!(sections = binder.sections().len(), "flowchart navigation attached");

        Ok(FlowchartNav { binder })
    }

    /// Current binder state: "uninitialized", "awaitingRender", "bound" or
    /// "degraded"
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        serde_json::to_value(self.binder.state())
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter, js_name = sectionCount)]
    pub fn section_count(&self) -> usize {
        self.binder.sections().len()
    }
}

#[cfg(feature = "diagnostics")]
#[wasm_bindgen]
impl FlowchartNav {
    /// Scroll to and highlight any section, bypassing the diagram
    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&self, target: &str) -> bool {
        self.binder.navigate(target)
    }

    /// Node counts, bound nodes and the configured map
    #[wasm_bindgen(js_name = debugReport)]
    pub fn debug_report(&self) -> Result<JsValue, JsValue> {
        use serde::Serialize;

        let report = self.binder.debug_report();
        tracing::info!(
            nodes = report.nodes_found,
            text_primitives = report.text_primitives_found,
            marked = report.marked_nodes,
            bound = report.bound_nodes,
            "flowchart debug report"
        );
        report
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
