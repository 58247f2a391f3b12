use std::{borrow::Cow, cell::Cell, fmt, thread_local};

use crate::node::{
    render::{render_to_string, Mode},
    Node,
};

/// Distinguishes instances created on the same thread.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct InstanceId(u64);

impl InstanceId {
    fn next() -> Self {
        thread_local!(static ID: Cell<u64> = const { Cell::new(0) });
        Self(ID.replace(ID.get() + 1))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live root component, bound to the attachment point it was mounted on.
///
/// The instance stays in the host's render tree for as long as the host does; dropping the handle
/// does not remove anything. Applications that never need the handle again can
/// [`leak`](Self::leak) it.
#[must_use]
#[derive(Debug)]
pub struct ComponentInstance {
    id: InstanceId,
    name: Cow<'static, str>,
    target: String,
    root: Node,
}

impl ComponentInstance {
    pub(crate) fn new(name: Cow<'static, str>, target: String, root: Node) -> Self {
        Self {
            id: InstanceId::next(),
            name,
            target,
            root,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Name of the definition this instance was created from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the attachment point.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The component boundary node wrapping everything this instance rendered.
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_attached()
    }

    pub fn render(&self, mode: Mode) -> String {
        render_to_string(mode, &self.root)
    }

    /// Keeps the instance alive until process teardown.
    pub fn leak(self) -> &'static Self {
        Box::leak(Box::new(self))
    }
}
