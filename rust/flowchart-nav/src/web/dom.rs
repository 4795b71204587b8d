//! `Surface` over the live browser DOM.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, HtmlElement, Node,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, SvgElement, Window,
};

use crate::error::NavError;
use crate::surface::Surface;

pub struct DomSurface {
    window: Window,
    document: Document,
}

impl DomSurface {
    pub fn from_window() -> Result<Self, NavError> {
        let window = web_sys::window().ok_or(NavError::NoWindow)?;
        let document = window.document().ok_or(NavError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

/// Mermaid nodes are SVG groups, sections are HTML; both carry inline style
fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

fn timeout_ms(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

impl Surface for DomSurface {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(selector, error = ?e, "invalid selector");
                None
            }
        }
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn query_all_within(&self, scope: &Element, selector: &str) -> Vec<Element> {
        match scope.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(e) => {
                tracing::warn!(selector, error = ?e, "invalid selector");
                Vec::new()
            }
        }
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).ok().flatten()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn same_node(&self, a: &Element, b: &Element) -> bool {
        let b: &Node = b;
        a.is_same_node(Some(b))
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            tracing::warn!(name, error = ?e, "failed to set attribute");
        }
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            tracing::warn!(class, error = ?e, "failed to add class");
        }
    }

    fn style_property(&self, node: &Element, property: &str) -> String {
        style_of(node)
            .and_then(|style| style.get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style_property(&self, node: &Element, property: &str, value: &str) {
        let Some(style) = style_of(node) else {
            tracing::debug!(property, "element has no inline style");
            return;
        };

        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            tracing::warn!(property, error = ?e, "failed to update style");
        }
    }

    fn on_click(&self, node: &Element, mut handler: Box<dyn FnMut()>) {
        let callback = Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            event.stop_propagation();
            handler();
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) =
            node.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?e, "failed to attach click listener");
        }
        // The listener lives as long as the element
        callback.forget();
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout_ms(delay_ms),
            )
        {
            tracing::warn!(delay_ms, error = ?e, "failed to schedule timer");
        }
    }

    fn on_ready(&self, task: Box<dyn FnOnce()>) {
        if self.document.ready_state() != "loading" {
            task();
            return;
        }

        let callback = Closure::once_into_js(move || task());
        if let Err(e) = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        {
            tracing::warn!(error = ?e, "failed to wait for DOMContentLoaded");
        }
    }

    fn on_visible(&self, mut handler: Box<dyn FnMut()>) {
        let document = self.document.clone();
        let callback = Closure::wrap(Box::new(move || {
            if !document.hidden() {
                handler();
            }
        }) as Box<dyn FnMut()>);

        if let Err(e) = self
            .document
            .add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?e, "failed to watch visibility");
        }
        callback.forget();
    }
}
