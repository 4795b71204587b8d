//! NavigationBinder: Flowchart Nodes → Page Sections
//!
//! Bridges an asynchronously rendered Mermaid diagram to in-page navigation:
//! configures the renderer, polls until nodes exist, binds click handlers to
//! nodes whose label matches the [`SectionMap`], and scrolls to + highlights
//! the mapped section on click.
//!
//! # Lifecycle
//! ```text
//! Uninitialized ──ready──► AwaitingRender ──bind pass──► Bound
//!                               │  ▲                      │
//!                   retry fails │  └──visible, no nodes───┤
//!                               ▼                         │
//!                            Degraded ◄───────────────────┘
//! ```
//!
//! Every failure is local: a missing container, node or section is logged and
//! the current operation returns. Nothing propagates to the host page.

mod diagnostics;
mod highlight;

pub use diagnostics::DebugReport;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

use crate::config::BinderConfig;
use crate::sections::SectionMap;
use crate::surface::{Renderer, Surface};

use highlight::ActiveHighlight;

// =============================================================================
// Types
// =============================================================================

/// Where the binder is in its polling cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BinderState {
    Uninitialized,
    /// Polling timers are pending
    AwaitingRender,
    /// At least one node is interactive
    Bound,
    /// The retry found nothing to bind; re-armable on visibility regain
    Degraded,
}

// =============================================================================
// NavigationBinder
// =============================================================================

pub struct NavigationBinder<S: Surface> {
    surface: Rc<S>,
    renderer: Box<dyn Renderer>,
    sections: SectionMap,
    config: BinderConfig,
    state: Cell<BinderState>,
    /// Nodes carrying our click listener, keyed by identity
    bound: RefCell<Vec<S::Node>>,
    highlights: RefCell<Vec<ActiveHighlight<S::Node>>>,
}

impl<S: Surface> NavigationBinder<S> {
    pub fn new(
        surface: Rc<S>,
        renderer: Box<dyn Renderer>,
        sections: SectionMap,
        config: BinderConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            surface,
            renderer,
            sections,
            config,
            state: Cell::new(BinderState::Uninitialized),
            bound: RefCell::new(Vec::new()),
            highlights: RefCell::new(Vec::new()),
        })
    }

    pub fn state(&self) -> BinderState {
        self.state.get()
    }

    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Subscribe to document ready (→ `initialize`) and visibility regain
    /// (→ `rearm`)
    ///
    /// Callbacks hold weak references; dropping the last `Rc` turns them into
    /// no-ops.
    pub fn attach(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.surface.on_ready(Box::new(move || {
            if let Some(binder) = weak.upgrade() {
                binder.initialize();
            }
        }));

        let weak = Rc::downgrade(self);
        self.surface.on_visible(Box::new(move || {
            if let Some(binder) = weak.upgrade() {
                binder.rearm();
            }
        }));
    }

    /// Configure the renderer and start readiness polling
    pub fn initialize(self: &Rc<Self>) {
        if self.state.get() != BinderState::Uninitialized {
            tracing::debug!(state = ?self.state.get(), "binder already initialized");
            return;
        }

        match self.renderer.initialize(&self.config.renderer) {
            Ok(()) => tracing::info!(theme = %self.config.renderer.theme, "renderer initialized"),
            Err(e) => tracing::warn!(error = %e, "renderer initialization failed, polling anyway"),
        }

        self.schedule_polling();
    }

    /// One bounded polling cycle: a bind pass, a verification, and at most one
    /// retry pass
    pub fn schedule_polling(self: &Rc<Self>) {
        self.state.set(BinderState::AwaitingRender);
        let polling = self.config.polling;

        let weak = Rc::downgrade(self);
        self.surface.schedule(
            polling.initial_delay_ms,
            Box::new(move || {
                if let Some(binder) = weak.upgrade() {
                    binder.bind_pass();
                }
            }),
        );

        let weak = Rc::downgrade(self);
        self.surface.schedule(
            polling.verify_delay_ms,
            Box::new(move || {
                if let Some(binder) = weak.upgrade() {
                    binder.verify();
                }
            }),
        );
    }

    fn verify(self: &Rc<Self>) {
        if self.live_bound_count() > 0 {
            self.state.set(BinderState::Bound);
            return;
        }

        tracing::info!(
            delay_ms = self.config.polling.retry_delay_ms,
            "no interactive nodes yet, retrying click handler setup"
        );
        let weak = Rc::downgrade(self);
        self.surface.schedule(
            self.config.polling.retry_delay_ms,
            Box::new(move || {
                if let Some(binder) = weak.upgrade() {
                    binder.bind_pass();
                    binder.settle();
                }
            }),
        );
    }

    fn settle(&self) {
        if self.live_bound_count() > 0 {
            self.state.set(BinderState::Bound);
        } else {
            tracing::warn!(
                container = %self.config.container_selector,
                "flowchart never became interactive, leaving it static"
            );
            self.state.set(BinderState::Degraded);
        }
    }

    /// Re-run polling after the page comes back to the foreground, if every
    /// binding was lost in the meantime
    pub fn rearm(self: &Rc<Self>) {
        match self.state.get() {
            BinderState::Uninitialized | BinderState::AwaitingRender => return,
            BinderState::Bound | BinderState::Degraded => {}
        }

        if self.live_bound_count() > 0 {
            tracing::debug!("page visible, bindings intact");
            return;
        }

        tracing::info!("page visible with no interactive nodes, re-arming");
        self.schedule_polling();
    }

    // =========================================================================
    // Scanning & binding
    // =========================================================================

    /// Rendered node elements, empty while the container does not exist
    pub fn enumerate_nodes(&self) -> Vec<S::Node> {
        match self.surface.query(&self.config.container_selector) {
            Some(container) => self
                .surface
                .query_all_within(&container, &self.config.node_selector),
            None => {
                tracing::debug!(
                    container = %self.config.container_selector,
                    "flowchart container not rendered yet"
                );
                Vec::new()
            }
        }
    }

    /// Scan nodes and text primitives, binding every match
    ///
    /// Returns the number of newly bound nodes.
    pub fn bind_pass(self: &Rc<Self>) -> usize {
        let nodes = self.enumerate_nodes();
        tracing::info!(count = nodes.len(), "found flowchart nodes");

        let mut newly_bound = 0;
        for (index, node) in nodes.iter().enumerate() {
            let text = self.node_text(node);
            tracing::debug!(index, text = %text, "processing node");

            if let Some(target) = self.match_label(&text) {
                if self.bind_node(node, &text, target) {
                    newly_bound += 1;
                }
            }
        }

        // Some renderer output carries labels only as bare text primitives
        newly_bound += self.fallback_text_scan();

        if nodes.is_empty() && newly_bound == 0 {
            tracing::warn!("no flowchart nodes found for click handling");
        }
        if self.live_bound_count() > 0 {
            self.state.set(BinderState::Bound);
        }
        tracing::info!(newly_bound, "click handler setup complete");
        newly_bound
    }

    /// Trimmed label text of a node
    ///
    /// Reads the first descendant matching one of the label selectors, falling
    /// back to the node's own text.
    pub fn node_text(&self, node: &S::Node) -> String {
        let label = self
            .config
            .label_selectors
            .iter()
            .find_map(|selector| self.surface.query_within(node, selector));

        let text = match label {
            Some(label) => self.surface.text_content(&label),
            None => self.surface.text_content(node),
        };
        text.trim().to_string()
    }

    pub fn match_label(&self, text: &str) -> Option<&str> {
        self.sections.find(text)
    }

    /// Make `node` navigate to `target` on click
    ///
    /// Returns `false` without touching the node if it is already bound.
    pub fn bind_node(self: &Rc<Self>, node: &S::Node, text: &str, target: &str) -> bool {
        if self.is_bound(node) {
            tracing::debug!(text = %text, "node already clickable");
            return false;
        }

        let surface = &self.surface;
        surface.set_attribute(node, &self.config.marker_attribute, "true");
        surface.add_class(node, &self.config.clickable_class);
        surface.set_style_property(node, "cursor", "pointer");
        surface.set_attribute(node, "title", &format!("{}{}", self.config.tooltip_prefix, text));

        let weak = Rc::downgrade(self);
        let label = text.to_string();
        let destination = target.to_string();
        surface.on_click(
            node,
            Box::new(move || {
                if let Some(binder) = weak.upgrade() {
                    tracing::info!(label = %label, section = %destination, "node clicked");
                    binder.navigate(&destination);
                }
            }),
        );

        self.bound.borrow_mut().push(node.clone());
        tracing::info!(text = %text, section = %target, "node is now clickable");
        true
    }

    /// Bind the nodes whose label only exists as bare text primitives
    ///
    /// The nearest node ancestor (or the direct parent) of each matching text
    /// element is bound. Returns the number of newly bound nodes.
    pub fn fallback_text_scan(self: &Rc<Self>) -> usize {
        let Some(container) = self.surface.query(&self.config.container_selector) else {
            return 0;
        };

        let texts = self
            .surface
            .query_all_within(&container, &self.config.fallback_text_selector);
        tracing::debug!(count = texts.len(), "scanning text primitives as fallback");

        let mut newly_bound = 0;
        for text_el in &texts {
            let text = self.surface.text_content(text_el).trim().to_string();
            let Some(target) = self.match_label(&text) else {
                continue;
            };

            let host = self
                .surface
                .closest(text_el, &self.config.node_selector)
                .or_else(|| self.surface.parent(text_el));

            match host {
                Some(host) => {
                    if self.bind_node(&host, &text, target) {
                        tracing::debug!(text = %text, "fallback binding applied");
                        newly_bound += 1;
                    }
                }
                None => tracing::warn!(text = %text, "text primitive has no parent to bind"),
            }
        }
        newly_bound
    }

    fn is_bound(&self, node: &S::Node) -> bool {
        self.surface.has_attribute(node, &self.config.marker_attribute)
            || self
                .bound
                .borrow()
                .iter()
                .any(|bound| self.surface.same_node(bound, node))
    }

    /// Drop bindings whose node left the document, return what remains
    fn live_bound_count(&self) -> usize {
        let mut bound = self.bound.borrow_mut();
        bound.retain(|node| self.surface.is_connected(node));
        bound.len()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Scroll to the section named by `target` and highlight it
    ///
    /// A bare id is accepted as well as `#id`. Returns `false` if the section
    /// does not exist.
    pub fn navigate(self: &Rc<Self>, target: &str) -> bool {
        let selector = target_selector(target);
        let Some(section) = self.surface.query(&selector) else {
            tracing::warn!(section = %selector, "section not found");
            return false;
        };

        tracing::info!(section = %selector, "scrolling to section");
        self.surface.scroll_into_view(&section);
        self.highlight(&section);
        true
    }
}

fn target_selector(target: &str) -> String {
    let target = target.trim();
    if target.starts_with('#') {
        target.to_string()
    } else {
        format!("#{}", target)
    }
}
