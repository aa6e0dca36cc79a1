//! In-memory implementations of the DOM, viewport and host bridge.
//!
//! Used by the tests and by native hosts that render the checklist
//! themselves. Selector support covers what the widget configuration uses:
//! `tag`, `#id`, `[attr="value"]` and `tag[attr="value"]`.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

use crate::dom::{Document, DomNode, NodeKind, Viewport};
use crate::error::{Result, WidgetError};
use crate::submit::HostBridge;

#[derive(Debug)]
struct NodeData {
    tag: String,
    attrs: RefCell<BTreeMap<String, String>>,
    checked: Cell<bool>,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<Rc<NodeData>>>,
}

/// An element in a [`HeadlessDocument`]. Clones share the element.
#[derive(Debug, Clone)]
pub struct HeadlessNode(Rc<NodeData>);

impl HeadlessNode {
    /// A detached element with the given tag name.
    pub fn element(tag: &str) -> Self {
        Self(Rc::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            attrs: RefCell::new(BTreeMap::new()),
            checked: Cell::new(false),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// `<input type="checkbox" name="...">`
    pub fn checkbox(name: &str) -> Self {
        Self::element("input")
            .with_attr("type", "checkbox")
            .with_attr("name", name)
    }

    /// `<button id="...">`
    pub fn button(id: &str) -> Self {
        Self::element("button").with_attr("id", id)
    }

    /// Set an attribute. Visible through every handle to the element.
    #[must_use]
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .attrs
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Attach `child` as the last child and return a handle to it.
    pub fn append(&self, child: HeadlessNode) -> HeadlessNode {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(Rc::clone(&child.0));
        child
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.attrs.borrow().get(name).cloned()
    }

    /// The `checked` property (checkbox) or selected state (button).
    pub fn is_checked(&self) -> bool {
        self.0.checked.get()
    }

    /// What a user click does: a checkbox flips itself, a button does not.
    pub fn click(&self) {
        if self.kind() == NodeKind::Checkbox {
            self.0.checked.set(!self.0.checked.get());
        }
    }

    fn parent(&self) -> Option<HeadlessNode> {
        self.0.parent.borrow().upgrade().map(HeadlessNode)
    }

    fn matches(&self, selector: &Selector) -> bool {
        if selector.tag.as_deref().is_some_and(|tag| tag != self.0.tag) {
            return false;
        }
        let attrs = self.0.attrs.borrow();
        selector
            .attrs
            .iter()
            .all(|(name, value)| attrs.get(name) == Some(value))
    }

    fn collect(&self, selector: &Selector, out: &mut Vec<HeadlessNode>) {
        for child in self.0.children.borrow().iter() {
            let child = HeadlessNode(Rc::clone(child));
            if child.matches(selector) {
                out.push(child.clone());
            }
            child.collect(selector, out);
        }
    }
}

impl DomNode for HeadlessNode {
    fn kind(&self) -> NodeKind {
        match self.0.tag.as_str() {
            "input" if self.attr("type").as_deref() == Some("checkbox") => NodeKind::Checkbox,
            "button" => NodeKind::Button,
            "ul" | "ol" => NodeKind::List,
            other => NodeKind::Other(other.to_string()),
        }
    }

    fn id(&self) -> Option<String> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    fn name(&self) -> String {
        self.attr("name").unwrap_or_default()
    }

    fn set_checked(&self, checked: bool) {
        self.0.checked.set(checked);
    }

    fn closest(&self, selector: &str) -> Option<Self> {
        let selector = Selector::parse(selector).ok()?;
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if node.matches(&selector) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

/// A document rooted at a `<body>` element.
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    root: HeadlessNode,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self {
            root: HeadlessNode::element("body"),
        }
    }

    pub fn root(&self) -> HeadlessNode {
        self.root.clone()
    }
}

impl Document for HeadlessDocument {
    type Node = HeadlessNode;

    fn query_all(&self, raw: &str) -> Result<Vec<HeadlessNode>> {
        let selector = Selector::parse(raw).map_err(|reason| WidgetError::InvalidConfig {
            message: format!("invalid selector '{raw}': {reason}"),
        })?;
        let mut out = Vec::new();
        self.root.collect(&selector, &mut out);
        Ok(out)
    }

    fn element_by_id(&self, id: &str) -> Option<HeadlessNode> {
        let selector = Selector {
            tag: None,
            attrs: vec![("id".to_string(), id.to_string())],
        };
        let mut out = Vec::new();
        self.root.collect(&selector, &mut out);
        out.into_iter().next()
    }
}

/// Parsed form of the supported selector subset.
#[derive(Debug, Default)]
struct Selector {
    tag: Option<String>,
    attrs: Vec<(String, String)>,
}

impl Selector {
    fn parse(raw: &str) -> std::result::Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("empty selector".to_string());
        }
        if let Some(id) = raw.strip_prefix('#') {
            if !is_ident(id) {
                return Err(format!("bad id '{id}'"));
            }
            return Ok(Self {
                tag: None,
                attrs: vec![("id".to_string(), id.to_string())],
            });
        }

        let (tag, mut rest) = raw.split_at(raw.find('[').unwrap_or(raw.len()));
        if !tag.is_empty() && !is_ident(tag) {
            return Err(format!("bad tag name '{tag}'"));
        }
        let mut selector = Self {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            attrs: Vec::new(),
        };
        while !rest.is_empty() {
            let body = rest
                .strip_prefix('[')
                .ok_or_else(|| format!("unexpected '{rest}'"))?;
            let end = body.find(']').ok_or("unterminated '['")?;
            let (name, value) = body[..end].split_once('=').unwrap_or((&body[..end], ""));
            let name = name.trim();
            if !is_ident(name) {
                return Err(format!("bad attribute name '{name}'"));
            }
            selector.attrs.push((
                name.to_string(),
                value.trim().trim_matches(|c| c == '"' || c == '\'').to_string(),
            ));
            rest = &body[end + 1..];
        }
        Ok(selector)
    }
}

fn is_ident(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

/// Window with a scroll offset and root inline style.
#[derive(Debug, Default)]
pub struct HeadlessViewport {
    scroll_y: Cell<f64>,
    style: RefCell<HashMap<String, String>>,
    style_history: RefCell<Vec<(String, String)>>,
}

impl HeadlessViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `set_root_style_property` call, in order.
    pub fn style_history(&self) -> Vec<(String, String)> {
        self.style_history.borrow().clone()
    }
}

impl Viewport for HeadlessViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, y: f64) {
        self.scroll_y.set(y.max(0.0));
    }

    fn root_style_property(&self, name: &str) -> String {
        self.style.borrow().get(name).cloned().unwrap_or_default()
    }

    fn set_root_style_property(&self, name: &str, value: &str) {
        self.style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self.style_history
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
    }
}

/// Bridge that keeps every payload it is given.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    sent: RefCell<Vec<String>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl HostBridge for RecordingBridge {
    fn send_data(&self, data: &str) {
        self.sent.borrow_mut().push(data.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_by_tag_and_attribute() {
        let document = HeadlessDocument::new();
        let list = document.root().append(HeadlessNode::element("ul"));
        list.append(HeadlessNode::checkbox("a").with_attr("data-type", "tag"));
        list.append(HeadlessNode::checkbox("b").with_attr("data-type", "group"));

        let tags = document.query_all(r#"input[data-type="tag"]"#).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name(), "a");
        assert_eq!(document.query_all("ul").unwrap().len(), 1);
        assert_eq!(document.query_all("[data-type='group']").unwrap().len(), 1);
    }

    #[test]
    fn malformed_selectors_are_rejected() {
        let document = HeadlessDocument::new();
        for raw in ["", "  ", "#", "input[", "input[type=checkbox]x", "in put", "[=a]"] {
            let err = document.query_all(raw).unwrap_err();
            assert!(
                matches!(err, WidgetError::InvalidConfig { .. }),
                "{raw:?} gave {err:?}"
            );
        }
        assert!(document.root().closest("ul[").is_none());
    }

    #[test]
    fn attributes_set_after_attaching_are_visible() {
        let document = HeadlessDocument::new();
        let list = document.root().append(HeadlessNode::element("ul"));
        let _ = list.clone().with_attr("id", "late");

        assert_eq!(document.element_by_id("late").and_then(|n| n.id()), Some("late".into()));
        assert_eq!(document.query_all("#late").unwrap().len(), 1);
    }

    #[test]
    fn closest_walks_up_including_self() {
        let document = HeadlessDocument::new();
        let list = document
            .root()
            .append(HeadlessNode::element("ul").with_attr("id", "g"));
        let item = list.append(HeadlessNode::element("li"));
        let input = item.append(HeadlessNode::checkbox("t"));

        assert_eq!(input.closest("ul").and_then(|n| n.id()), Some("g".into()));
        assert_eq!(list.closest("ul").and_then(|n| n.id()), Some("g".into()));
        assert!(input.closest("ol").is_none());
    }

    #[test]
    fn element_by_id() {
        let document = HeadlessDocument::new();
        document.root().append(HeadlessNode::button("callback"));
        let found = document.element_by_id("callback").unwrap();
        assert_eq!(found.kind(), NodeKind::Button);
        assert!(document.element_by_id("missing").is_none());
    }

    #[test]
    fn click_flips_checkbox_only() {
        let checkbox = HeadlessNode::checkbox("a");
        checkbox.click();
        assert!(checkbox.is_checked());
        let button = HeadlessNode::element("button").with_attr("name", "b");
        button.click();
        assert!(!button.is_checked());
    }
}
