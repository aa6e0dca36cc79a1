//! The slice of the DOM the widget depends on.
//!
//! Raw nodes come out of a [`Document`] untyped. Before the widget uses one
//! it is converted into a typed handle ([`ToggleControl`], [`GroupList`],
//! [`SubmitButton`]); the conversion checks the element kind once and fails
//! with a descriptive [`WidgetError`], so the rest of the code never has to
//! re-check.

use std::fmt;

use crate::error::{Result, WidgetError};

/// What an element is, as far as the widget cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `<input type="checkbox">`
    Checkbox,
    /// `<button>`
    Button,
    /// `<ul>` or `<ol>`
    List,
    /// Anything else, by tag name.
    Other(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkbox => f.write_str("a checkbox"),
            Self::Button => f.write_str("a button"),
            Self::List => f.write_str("a list"),
            Self::Other(tag) => write!(f, "<{}>", tag.to_ascii_lowercase()),
        }
    }
}

/// A handle to one element.
pub trait DomNode: Clone {
    fn kind(&self) -> NodeKind;

    /// The `id` attribute, `None` when absent or empty.
    fn id(&self) -> Option<String>;

    /// The `name` attribute, empty when absent.
    fn name(&self) -> String;

    /// For checkboxes this is the `checked` property; for buttons the
    /// widget-managed "selected" state.
    fn set_checked(&self, checked: bool);

    /// Nearest ancestor (or self) matching `selector`.
    fn closest(&self, selector: &str) -> Option<Self>;

    /// Short human-readable description for error messages.
    fn describe(&self) -> String {
        match (self.id(), self.name()) {
            (Some(id), _) => format!("{} #{id}", self.kind()),
            (None, name) if !name.is_empty() => format!("{} named '{name}'", self.kind()),
            _ => self.kind().to_string(),
        }
    }
}

/// Element lookup.
pub trait Document {
    type Node: DomNode;

    /// All elements matching `selector`, in document order.
    ///
    /// A selector the document cannot parse is a configuration error.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
}

/// Window scroll position and root element style.
pub trait Viewport {
    fn scroll_y(&self) -> f64;

    fn scroll_to(&self, y: f64);

    /// Inline style property of the root element, empty when unset.
    fn root_style_property(&self, name: &str) -> String;

    fn set_root_style_property(&self, name: &str, value: &str);
}

/// Unwrap an optional lookup result or fail with [`WidgetError::MissingElement`].
pub fn require<N>(node: Option<N>, what: impl Into<String>) -> Result<N> {
    node.ok_or_else(|| WidgetError::MissingElement { what: what.into() })
}

/// How a toggle control shows its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleStyle {
    /// The browser flips the state and fires `change`.
    Checkbox,
    /// The widget flips the state on `click`.
    Button,
}

impl ToggleStyle {
    /// DOM event that signals a toggle.
    pub const fn event(self) -> &'static str {
        match self {
            Self::Checkbox => "change",
            Self::Button => "click",
        }
    }
}

/// A named checkbox or button participating in a selection.
#[derive(Debug, Clone)]
pub struct ToggleControl<N> {
    node: N,
    style: ToggleStyle,
    name: String,
}

impl<N: DomNode> ToggleControl<N> {
    pub fn from_node(node: N) -> Result<Self> {
        let style = match node.kind() {
            NodeKind::Checkbox => ToggleStyle::Checkbox,
            NodeKind::Button => ToggleStyle::Button,
            other => {
                return Err(WidgetError::WrongElementKind {
                    what: node.describe(),
                    expected: "a checkbox or a button",
                    found: other.to_string(),
                });
            }
        };
        let name = node.name();
        if name.is_empty() {
            return Err(WidgetError::UnnamedControl {
                what: node.describe(),
            });
        }
        Ok(Self { node, style, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> ToggleStyle {
        self.style
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn set_selected(&self, selected: bool) {
        self.node.set_checked(selected);
    }
}

/// A list element whose id names a group of tags.
#[derive(Debug, Clone)]
pub struct GroupList<N> {
    node: N,
    group: String,
}

impl<N: DomNode> GroupList<N> {
    /// Find the group container enclosing `control`.
    pub fn enclosing(control: &ToggleControl<N>, selector: &str) -> Result<Self> {
        let node = require(
            control.node().closest(selector),
            format!("'{selector}' around {}", control.node().describe()),
        )?;
        if node.kind() != NodeKind::List {
            return Err(WidgetError::WrongElementKind {
                what: format!("group container of {}", control.node().describe()),
                expected: "a list",
                found: node.kind().to_string(),
            });
        }
        let group = node.id().ok_or_else(|| WidgetError::UnnamedGroup {
            control: control.node().describe(),
        })?;
        Ok(Self { node, group })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn node(&self) -> &N {
        &self.node
    }
}

/// The button that sends the selection.
#[derive(Debug, Clone)]
pub struct SubmitButton<N> {
    node: N,
}

impl<N: DomNode> SubmitButton<N> {
    pub fn find<D: Document<Node = N> + ?Sized>(document: &D, id: &str) -> Result<Self> {
        let node = require(document.element_by_id(id), format!("#{id}"))?;
        match node.kind() {
            NodeKind::Button => Ok(Self { node }),
            other => Err(WidgetError::WrongElementKind {
                what: format!("#{id}"),
                expected: "a button",
                found: other.to_string(),
            }),
        }
    }

    pub fn node(&self) -> &N {
        &self.node
    }
}
