pub mod render;

use std::{
    borrow::Cow,
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;

use crate::component::Component;

pub(crate) enum NodeKind {
    Element {
        name: String,
        namespace: Option<String>,
        attrs: RefCell<IndexMap<String, String>>,
    },
    Text(RefCell<String>),
    Fragment,
    Component(Component),
}

/// A node in a host-independent render tree.
///
/// Nodes are reference counted; cloning a `Node` yields another handle to the same node.
#[derive(Clone)]
pub struct Node(Rc<RawNode>);

struct RawNode {
    attached: Cell<bool>,
    kind: NodeKind,

    parent: RefCell<Option<Weak<RawNode>>>,
    children: RefCell<Vec<Node>>,
}

impl Node {
    // Node Creation //

    pub(crate) fn create(kind: NodeKind) -> Self {
        let raw = RawNode {
            attached: Cell::new(false),
            kind,
            parent: RefCell::default(),
            children: RefCell::default(),
        };
        Self(Rc::new(raw))
    }

    pub fn element(name: impl Into<String>) -> Self {
        let kind = NodeKind::Element {
            name: name.into(),
            namespace: None,
            attrs: RefCell::default(),
        };
        Self::create(kind)
    }

    pub fn element_ns(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let kind = NodeKind::Element {
            name: name.into(),
            namespace: Some(namespace.into()),
            attrs: RefCell::default(),
        };
        Self::create(kind)
    }

    pub fn text(value: impl Into<String>) -> Self {
        let kind = NodeKind::Text(RefCell::new(value.into()));
        Self::create(kind)
    }

    pub fn fragment() -> Self {
        Self::create(NodeKind::Fragment)
    }

    /// Runs `f` as the body of a component named `name`.
    ///
    /// Lifecycle hooks and contexts registered while `f` runs belong to the returned node.
    pub fn component<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        Component::create(name.into(), f)
    }

    // Builders //

    pub fn with_attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key.into(), value.into());
        self
    }

    pub fn with_child<N: IntoNode>(self, child: N) -> Self {
        self.insert(&child.into_node(), None);
        self
    }

    // Containers //

    pub fn insert(&self, child: &Self, before: Option<&Self>) {
        match &self.0.kind {
            NodeKind::Component(component) if !component.frozen.get() => {
                component.frozen.set(true);
            }
            NodeKind::Element { .. } | NodeKind::Fragment => {}
            _ => self.expect_kind(Expect::Container),
        }

        if let Some(parent) = child.parent() {
            parent.remove(child);
        }

        {
            let mut children = self.0.children.borrow_mut();
            let index = if let Some(before) = before {
                children
                    .iter()
                    .position(|node| node == before)
                    .expect("insertion anchor not a child of self")
            } else {
                children.len()
            };
            children.insert(index, child.clone());
            child.0.parent.replace(Some(self.downgrade()));
        }

        child.set_attached(self.is_attached());
    }

    pub fn remove(&self, child: &Self) {
        {
            let mut children = self.0.children.borrow_mut();
            let index = children
                .iter()
                .position(|node| node == child)
                .expect("removal node not a child of self");

            child.0.parent.replace(None);
            children.remove(index);
        }

        child.set_attached(false);
    }

    // Elements //

    pub fn set_attr(&self, key: String, value: String) -> Option<String> {
        if let NodeKind::Element { attrs, .. } = &self.0.kind {
            attrs.borrow_mut().insert(key, value)
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    /// The `id` attribute, if `self` is an element carrying one.
    pub fn element_id(&self) -> Option<String> {
        match &self.0.kind {
            NodeKind::Element { attrs, .. } => attrs.borrow().get("id").cloned(),
            _ => None,
        }
    }

    /// Depth-first search for the element whose `id` attribute equals `id`, **including** `self`.
    pub fn find_by_id(&self, id: &str) -> Option<Self> {
        if self.element_id().as_deref() == Some(id) {
            return Some(self.clone());
        }
        self.children_ref()
            .iter()
            .find_map(|child| child.find_by_id(id))
    }

    // Other Utilities //

    pub fn element_name(&self) -> &str {
        if let NodeKind::Element { name, .. } = &self.0.kind {
            name
        } else {
            self.expect_kind(Expect::Element);
        }
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().as_ref().and_then(Self::upgrade)
    }

    pub fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    pub fn children_ref(&self) -> Ref<Vec<Self>> {
        self.0.children.borrow()
    }

    /// Whether `self` is part of a tree a host has taken in.
    pub fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    // Internal //

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    /// Propagates the attached flag through the subtree, firing `on_mount` hooks of every
    /// component it reaches. Children fire before their ancestors.
    pub(crate) fn set_attached(&self, value: bool) {
        self.0.attached.set(value);

        for child in self.children() {
            child.set_attached(value);
        }

        match &self.0.kind {
            NodeKind::Component(component) if value => {
                component.on_mount();
            }
            _ => {}
        }
    }

    fn downgrade(&self) -> Weak<RawNode> {
        Rc::downgrade(&self.0)
    }

    fn upgrade(weak: &Weak<RawNode>) -> Option<Self> {
        weak.upgrade().map(Node)
    }

    fn kind_name(&self) -> &'static str {
        match &self.0.kind {
            NodeKind::Element { .. } => "element",
            NodeKind::Text(_) => "text",
            NodeKind::Fragment => "fragment",
            NodeKind::Component(_) => "component",
        }
    }

    fn expect_kind(&self, kind: Expect) -> ! {
        let expected = match kind {
            Expect::Container => "container",
            Expect::Element => "element",
        };

        panic!("expected {}, found {}", expected, self.kind_name());
    }
}

impl Eq for Node {}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Node");
        debug.field("kind", &self.kind_name());
        match &self.0.kind {
            NodeKind::Element { name, .. } => debug.field("name", name),
            NodeKind::Text(content) => debug.field("content", &*content.borrow()),
            NodeKind::Component(component) => debug.field("name", &component.name()),
            NodeKind::Fragment => &mut debug,
        };
        debug
            .field("attached", &self.is_attached())
            .field("children", &self.0.children.borrow().len())
            .finish()
    }
}

pub trait IntoNode: Sized {
    fn into_node(self) -> Node;
}

impl IntoNode for Node {
    fn into_node(self) -> Self {
        self
    }
}

impl IntoNode for &str {
    fn into_node(self) -> Node {
        Node::text(self)
    }
}

impl IntoNode for String {
    fn into_node(self) -> Node {
        Node::text(self)
    }
}

impl<N> FromIterator<N> for Node
where
    N: IntoNode,
{
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        iter.into_iter().fold(Self::fragment(), |fragment, node| {
            fragment.insert(&node.into_node(), None);
            fragment
        })
    }
}

enum Expect {
    Container,

    Element,
}
