//! Seams between the binder and the page.
//!
//! `Surface` is the document accessor plus the event loop hooks the binder
//! uses (timers, click listeners, lifecycle events). `Renderer` is the
//! diagram library. The `web` module implements both on top of `web-sys`.

use crate::config::RendererOptions;
use crate::error::NavError;

/// Page access for the binder
///
/// All methods are infallible from the caller's point of view: lookups that
/// fail return `None`/empty, mutations that fail are dropped by the
/// implementation.
pub trait Surface: 'static {
    type Node: Clone + 'static;

    /// First element in the document matching `selector`
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// First descendant of `scope` matching `selector`
    fn query_within(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    /// All descendants of `scope` matching `selector`, in document order
    fn query_all_within(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    /// Nearest inclusive ancestor matching `selector`
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn text_content(&self, node: &Self::Node) -> String;

    /// Identity comparison
    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool;

    /// Still part of the live document
    fn is_connected(&self, node: &Self::Node) -> bool;

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn add_class(&self, node: &Self::Node, class: &str);

    /// Inline style value, empty when unset
    fn style_property(&self, node: &Self::Node, property: &str) -> String;

    /// Set an inline style value; an empty value removes the property
    fn set_style_property(&self, node: &Self::Node, property: &str, value: &str);

    /// Attach a click listener that prevents the default action and stops
    /// propagation before running `handler`
    fn on_click(&self, node: &Self::Node, handler: Box<dyn FnMut()>);

    /// Smooth scroll so `node` is at the top of the viewport
    fn scroll_into_view(&self, node: &Self::Node);

    /// Run `task` once after `delay_ms`
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    /// Run `task` once the document is parsed (immediately if it already is)
    fn on_ready(&self, task: Box<dyn FnOnce()>);

    /// Run `handler` every time the page becomes visible again
    fn on_visible(&self, handler: Box<dyn FnMut()>);
}

/// The external diagram library
pub trait Renderer {
    fn initialize(&self, options: &RendererOptions) -> Result<(), NavError>;
}
