//! `web_sys` implementations of the DOM traits.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::dom::{Document, DomNode, NodeKind, Viewport};
use crate::error::{Result, WidgetError};

/// Class carried by a button-style control while it is selected.
const SELECTED_CLASS: &str = "selected";

#[derive(Debug, Clone)]
pub struct WebNode {
    element: Element,
}

impl WebNode {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn input(&self) -> Option<&HtmlInputElement> {
        self.element.dyn_ref::<HtmlInputElement>()
    }
}

impl DomNode for WebNode {
    fn kind(&self) -> NodeKind {
        let tag = self.element.tag_name().to_ascii_lowercase();
        match tag.as_str() {
            "input" if self.input().is_some_and(|input| input.type_() == "checkbox") => {
                NodeKind::Checkbox
            }
            "button" => NodeKind::Button,
            "ul" | "ol" => NodeKind::List,
            _ => NodeKind::Other(tag),
        }
    }

    fn id(&self) -> Option<String> {
        let id = self.element.id();
        (!id.is_empty()).then_some(id)
    }

    fn name(&self) -> String {
        self.element.get_attribute("name").unwrap_or_default()
    }

    fn set_checked(&self, checked: bool) {
        if let Some(input) = self.input() {
            input.set_checked(checked);
            return;
        }
        let pressed = if checked { "true" } else { "false" };
        let result = self
            .element
            .class_list()
            .toggle_with_force(SELECTED_CLASS, checked)
            .and_then(|_| self.element.set_attribute("aria-pressed", pressed));
        if let Err(e) = result {
            tracing::warn!(error = ?e, "failed to update button state");
        }
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        match self.element.closest(selector) {
            Ok(found) => found.map(Self::new),
            Err(e) => {
                tracing::warn!(selector, error = ?e, "invalid selector");
                None
            }
        }
    }
}

/// `querySelectorAll` throws a `SyntaxError` `DOMException` for bad selectors.
fn invalid_selector(selector: &str, error: &JsValue) -> WidgetError {
    let reason = error
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{error:?}"));
    WidgetError::InvalidConfig {
        message: format!("invalid selector '{selector}': {reason}"),
    }
}

#[derive(Debug, Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Document for WebDocument {
    type Node = WebNode;

    fn query_all(&self, selector: &str) -> Result<Vec<WebNode>> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|e| invalid_selector(selector, &e))?;
        Ok((0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebNode::new)
            .collect())
    }

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        self.document.get_element_by_id(id).map(WebNode::new)
    }
}

/// The window scroll offset and `<html>` inline style.
#[derive(Debug, Clone)]
pub struct WebViewport {
    window: web_sys::Window,
    root: Option<HtmlElement>,
}

impl WebViewport {
    pub fn new(window: web_sys::Window, document: &web_sys::Document) -> Self {
        let root = document
            .document_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        Self { window, root }
    }
}

impl Viewport for WebViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }

    fn root_style_property(&self, name: &str) -> String {
        self.root
            .as_ref()
            .and_then(|root| root.style().get_property_value(name).ok())
            .unwrap_or_default()
    }

    fn set_root_style_property(&self, name: &str, value: &str) {
        let Some(root) = &self.root else { return };
        if let Err(e) = root.style().set_property(name, value) {
            tracing::warn!(property = name, error = ?e, "failed to set root style");
        }
    }
}
