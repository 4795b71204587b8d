use serde::Serialize;

use crate::sections::SectionLink;
use crate::surface::Surface;

use super::{BinderState, NavigationBinder};

/// Snapshot of what the binder sees, for manual inspection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub state: BinderState,
    pub container_found: bool,
    pub nodes_found: usize,
    pub text_primitives_found: usize,
    /// Elements carrying the marker attribute
    pub marked_nodes: usize,
    /// Live entries in the bound set
    pub bound_nodes: usize,
    pub sections: Vec<SectionLink>,
}

impl<S: Surface> NavigationBinder<S> {
    pub fn debug_report(&self) -> DebugReport {
        let container = self.surface.query(&self.config.container_selector);
        let count = |selector: &str| {
            container
                .as_ref()
                .map(|c| self.surface.query_all_within(c, selector).len())
                .unwrap_or(0)
        };

        DebugReport {
            state: self.state.get(),
            container_found: container.is_some(),
            nodes_found: count(&self.config.node_selector),
            text_primitives_found: count(&self.config.fallback_text_selector),
            marked_nodes: count(&format!("[{}]", self.config.marker_attribute)),
            bound_nodes: self.live_bound_count(),
            sections: self.sections.links().to_vec(),
        }
    }
}
