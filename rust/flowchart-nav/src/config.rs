// flowchart-nav/src/config.rs
//
// Configuration types for the navigation binder and the Mermaid renderer

use serde::{Deserialize, Serialize};

/// Options handed to `mermaid.initialize`
///
/// Field names serialize in camelCase to match Mermaid's config object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererOptions {
    /// Render every `.mermaid` block on page load
    pub start_on_load: bool,
    pub theme: String,
    /// "loose" is required for HTML labels and click interaction
    pub security_level: String,
    pub flowchart: FlowchartOptions,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            start_on_load: true,
            theme: "default".to_string(),
            security_level: "loose".to_string(),
            flowchart: FlowchartOptions::default(),
        }
    }
}

/// Flowchart layout options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowchartOptions {
    pub use_max_width: bool,
    pub html_labels: bool,
}

impl Default for FlowchartOptions {
    fn default() -> Self {
        Self {
            use_max_width: true,
            html_labels: true,
        }
    }
}

/// Readiness polling schedule
///
/// Mermaid gives no completion signal on the `startOnLoad` path, so the binder
/// polls: one bind pass after `initial_delay_ms`, a verification after
/// `verify_delay_ms`, and one retry pass `retry_delay_ms` after that when
/// nothing was bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollingConfig {
    pub initial_delay_ms: u32,
    pub verify_delay_ms: u32,
    pub retry_delay_ms: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 2000,
            verify_delay_ms: 4000,
            retry_delay_ms: 2000,
        }
    }
}

/// A single inline CSS declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDecl {
    pub property: String,
    pub value: String,
}

impl StyleDecl {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// Highlight effect applied to a section after navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightConfig {
    /// Time before the original styling is restored
    pub duration_ms: u32,
    /// Time the reverting styles get to animate before the `transition`
    /// declaration itself is restored
    pub settle_ms: u32,
    pub styles: Vec<StyleDecl>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            settle_ms: 300,
            styles: vec![
                StyleDecl::new("transition", "all 0.3s ease"),
                StyleDecl::new("background-color", "rgba(255, 235, 59, 0.3)"),
                StyleDecl::new("border-left", "4px solid #ff9800"),
                StyleDecl::new("transform", "scale(1.02)"),
                StyleDecl::new("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.15)"),
            ],
        }
    }
}

/// Everything the binder needs besides the section map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinderConfig {
    /// Element wrapping the rendered diagram
    pub container_selector: String,
    /// Rendered node elements inside the container
    pub node_selector: String,
    /// Tried in order to find the element carrying a node's label
    pub label_selectors: Vec<String>,
    /// Low-level text primitives scanned by the fallback pass
    pub fallback_text_selector: String,
    pub marker_attribute: String,
    pub clickable_class: String,
    pub tooltip_prefix: String,
    pub polling: PollingConfig,
    pub highlight: HighlightConfig,
    pub renderer: RendererOptions,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            container_selector: "#troubleshoot-flowchart".to_string(),
            node_selector: ".node".to_string(),
            label_selectors: vec![
                "span".to_string(),
                "text".to_string(),
                "foreignObject".to_string(),
            ],
            fallback_text_selector: "text".to_string(),
            marker_attribute: "data-clickable".to_string(),
            clickable_class: "clickable-node".to_string(),
            tooltip_prefix: "Click for detailed instructions: ".to_string(),
            polling: PollingConfig::default(),
            highlight: HighlightConfig::default(),
            renderer: RendererOptions::default(),
        }
    }
}
