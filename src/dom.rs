//! Element tree the inspector runs against
//!
//! An arena of element nodes linked by parent/child ids, with just enough of
//! a browser document to drive the inspector: attributes, class lists, inline
//! styles, form values, layout boxes for hit testing, a text selection for the
//! legacy copy path, and a mutation log recording insertions and removals.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Handle to a node in a [`Dom`]
///
/// Only a [`Dom`] hands these out, so every id indexes a live arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

/// Layout box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the point lies inside (right and bottom edges exclusive)
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }
}

/// Structural change observed on the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Inserted { node: NodeId, parent: NodeId },
    Removed { node: NodeId, parent: NodeId },
}

#[derive(Debug, Clone)]
struct Element {
    tag_name: String,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    value: String,
    text: String,
    inner_html: String,
    rect: Option<Rect>,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    element: Element,
}

/// Document: `html` root holding `head` and `body`
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    selection: Option<String>,
    mutations: Vec<Mutation>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Empty document
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            selection: None,
            mutations: Vec::new(),
        };
        dom.root = dom.create_element("html");
        dom.head = dom.create_element("head");
        dom.body = dom.create_element("body");
        dom.link(dom.root, dom.head);
        dom.link(dom.root, dom.body);
        dom
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            element: Element {
                tag_name: tag_name.to_ascii_lowercase(),
                attrs: BTreeMap::new(),
                style: BTreeMap::new(),
                value: String::new(),
                text: String::new(),
                inner_html: String::new(),
                rect: None,
            },
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(Error::InvalidTree(format!(
                "cannot append {:?} inside itself",
                child
            )));
        }
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child)?;
        }
        self.link(parent, child);
        self.mutations.push(Mutation::Inserted {
            node: child,
            parent,
        });
        Ok(())
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let children = &mut self.node_mut(parent).children;
        let Some(pos) = children.iter().position(|c| *c == child) else {
            return Err(Error::InvalidTree(format!(
                "{:?} is not a child of {:?}",
                child, parent
            )));
        };
        children.remove(pos);
        self.node_mut(child).parent = None;
        self.mutations.push(Mutation::Removed {
            node: child,
            parent,
        });
        Ok(())
    }

    /// Detach a node from wherever it is; no-op when already detached
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        match self.parent(node) {
            Some(parent) => self.remove_child(parent, node),
            None => Ok(()),
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Strict descendant test
    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether the node hangs off the document root
    pub fn is_connected(&self, node: NodeId) -> bool {
        node == self.root || self.is_descendant_of(node, self.root)
    }

    /// Lower-case tag name
    pub fn tag_name(&self, node: NodeId) -> &str {
        &self.node(node).element.tag_name
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).element.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.node_mut(node)
            .element
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    /// `id` attribute, `None` when missing or empty
    pub fn id_attr(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id").filter(|id| !id.is_empty())
    }

    /// Raw `class` attribute, empty when missing
    pub fn class_name(&self, node: NodeId) -> &str {
        self.attr(node, "class").unwrap_or("")
    }

    pub fn class_list(&self, node: NodeId) -> Vec<&str> {
        self.class_name(node).split_whitespace().collect()
    }

    pub fn class_contains(&self, node: NodeId, class: &str) -> bool {
        self.class_name(node).split_whitespace().any(|c| c == class)
    }

    pub fn class_add(&mut self, node: NodeId, class: &str) {
        if self.class_contains(node, class) {
            return;
        }
        let mut classes: Vec<String> = self
            .class_list(node)
            .into_iter()
            .map(str::to_string)
            .collect();
        classes.push(class.to_string());
        self.set_attr(node, "class", &classes.join(" "));
    }

    pub fn class_remove(&mut self, node: NodeId, class: &str) {
        if !self.class_contains(node, class) {
            return;
        }
        let classes: Vec<String> = self
            .class_list(node)
            .into_iter()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        self.set_attr(node, "class", &classes.join(" "));
    }

    pub fn style_get(&self, node: NodeId, key: &str) -> Option<&str> {
        self.node(node).element.style.get(key).map(String::as_str)
    }

    pub fn style_set(&mut self, node: NodeId, key: &str, value: &str) {
        self.node_mut(node)
            .element
            .style
            .insert(key.to_string(), value.to_string());
    }

    /// Form control value
    pub fn value(&self, node: NodeId) -> &str {
        &self.node(node).element.value
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        self.node_mut(node).element.value = value.to_string();
    }

    pub fn text_content(&self, node: NodeId) -> &str {
        &self.node(node).element.text
    }

    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.node_mut(node).element.text = text.to_string();
    }

    /// Markup rendered inside the element
    pub fn inner_html(&self, node: NodeId) -> &str {
        &self.node(node).element.inner_html
    }

    pub fn set_inner_html(&mut self, node: NodeId, html: &str) {
        self.node_mut(node).element.inner_html = html.to_string();
    }

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.node(node).element.rect
    }

    /// Give the node a layout box; nodes without one are never hit
    pub fn set_rect(&mut self, node: NodeId, rect: Option<Rect>) {
        self.node_mut(node).element.rect = rect;
    }

    /// Topmost connected element whose box contains the point
    ///
    /// Later nodes in document order paint over earlier ones, so the last
    /// match in a pre-order walk wins.
    pub fn element_from_point(&self, x: i32, y: i32) -> Option<NodeId> {
        let mut hit = None;
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.rect(node).is_some_and(|r| r.contains(x, y)) {
                hit = Some(node);
            }
            stack.extend(self.children(node).iter().rev());
        }
        hit
    }

    /// Select the contents of a form control
    pub fn select(&mut self, node: NodeId) {
        self.selection = Some(self.value(node).to_string());
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Connected elements carrying the class, in document order
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.class_contains(node, class) {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev());
        }
        found
    }

    /// Mutations recorded so far
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Drain the mutation log
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }
}
