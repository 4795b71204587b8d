//! flowchart-nav: Clickable Mermaid Flowcharts
//!
//! A Rust/WASM implementation of the troubleshooting page's flowchart
//! navigation: clicking a rendered flowchart node scrolls to the content
//! section it describes and briefly highlights it.
//!
//! # Architecture
//! - `sections.rs` - SectionMap: label substring → section anchor (Aho-Corasick)
//! - `config.rs` - BinderConfig, polling/highlight/renderer options
//! - `surface.rs` - `Surface` (document, timers, events) and `Renderer` seams
//! - `binder/` - NavigationBinder: polling, node scanning, binding, navigation,
//!   highlight and debug report
//! - `web/` - `web-sys` implementations and the exported `FlowchartNav` class
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { FlowchartNav } from 'flowchart-nav';
//! import mermaid from 'mermaid';
//!
//! await init();
//!
//! // Configures mermaid, binds nodes once rendered
//! const nav = FlowchartNav.attach(mermaid, {
//!   binder: { containerSelector: '#troubleshoot-flowchart' },
//! });
//!
//! console.log(nav.state);   // "awaitingRender" → "bound"
//!
//! // Built with `--features diagnostics`
//! nav.navigateTo('#power-connection');
//! console.log(nav.debugReport());
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod sections;
pub mod surface;
pub mod web;

pub use binder::{BinderState, DebugReport, NavigationBinder};
pub use config::*;
pub use error::NavError;
pub use sections::{SectionLink, SectionMap};
pub use surface::{Renderer, Surface};
pub use web::{DomSurface, FlowchartNav, MermaidRenderer};

use wasm_bindgen::prelude::*;

#[cfg(test)]
mod tests;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Install the panic hook and route `tracing` output to the browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A host page may have installed its own subscriber already
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("flowchart-nav v{}", env!("CARGO_PKG_VERSION"))
}
