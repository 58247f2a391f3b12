use std::{cell::RefCell, rc::Rc};

use crate::{
    host::{AttachmentPoint, Host, Stylesheet},
    node::{
        render::{render_to_string, Mode},
        Node,
    },
};

/// An in-process host whose document is a plain [`Node`] tree.
///
/// Clones share the same document.
#[derive(Clone, Debug)]
pub struct MemoryHost {
    root: Node,
    stylesheets: Rc<RefCell<Vec<Stylesheet>>>,
}

impl MemoryHost {
    /// A host with an empty `<body>` as its document root.
    pub fn new() -> Self {
        Self::with_root(Node::element("body"))
    }

    pub fn with_root(root: Node) -> Self {
        root.set_attached(true);
        Self {
            root,
            stylesheets: Rc::default(),
        }
    }

    /// A host with one empty `<div>` per id under `<body>`.
    pub fn with_points<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let host = Self::new();
        for id in ids {
            host.add_point(id);
        }
        host
    }

    /// Appends an empty `<div id="{id}">` to the document root.
    pub fn add_point(&self, id: impl Into<String>) -> Node {
        let point = Node::element("div").with_attr("id", id);
        self.root.insert(&point, None);
        point
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn stylesheets(&self) -> Vec<Stylesheet> {
        self.stylesheets.borrow().clone()
    }

    pub fn render(&self, mode: Mode) -> String {
        render_to_string(mode, &self.root)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    type Target = Node;

    fn resolve(&self, id: &str) -> Option<AttachmentPoint<Node>> {
        self.root
            .find_by_id(id)
            .map(|node| AttachmentPoint::new(id, node))
    }

    fn resolve_anchor(&self, point: &AttachmentPoint<Node>, id: &str) -> Option<Node> {
        point
            .target()
            .children_ref()
            .iter()
            .find(|child| child.element_id().as_deref() == Some(id))
            .cloned()
    }

    fn attach(&self, point: &AttachmentPoint<Node>, content: &Node, anchor: Option<&Node>) {
        point.target().insert(content, anchor);
    }

    fn apply_stylesheet(&self, sheet: &Stylesheet) {
        self.stylesheets.borrow_mut().push(sheet.clone());
    }
}
