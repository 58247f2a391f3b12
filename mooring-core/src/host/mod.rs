//! Capabilities a host environment lends to the bootstrapper.
//!
//! A [`Host`] resolves identifiers to attachment points and inserts rendered content under them.
//! [`MemoryHost`] keeps everything in an in-process [`Node`] tree; [`BrowserHost`] talks to the
//! page's DOM.

mod browser;
mod memory;

pub use browser::BrowserHost;
pub use memory::MemoryHost;

use serde::Deserialize;

use crate::node::Node;

/// A resolved location in the host's render tree, addressed by its unique id.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AttachmentPoint<T> {
    id: String,
    target: T,
}

impl<T> AttachmentPoint<T> {
    pub fn new(id: impl Into<String>, target: T) -> Self {
        Self {
            id: id.into(),
            target,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

/// A stylesheet handed to the host ahead of mounting.
#[derive(Clone, PartialEq, Eq, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Stylesheet {
    Href(String),
    Inline(String),
}

pub trait Host {
    type Target;

    fn resolve(&self, id: &str) -> Option<AttachmentPoint<Self::Target>>;

    /// Resolves `id` among the direct children of `point`.
    fn resolve_anchor(
        &self,
        point: &AttachmentPoint<Self::Target>,
        id: &str,
    ) -> Option<Self::Target>;

    /// Inserts `content` under `point`, before `anchor` if given, otherwise after the existing
    /// children.
    fn attach(
        &self,
        point: &AttachmentPoint<Self::Target>,
        content: &Node,
        anchor: Option<&Self::Target>,
    );

    fn apply_stylesheet(&self, sheet: &Stylesheet);
}

impl<H: Host + ?Sized> Host for &H {
    type Target = H::Target;

    fn resolve(&self, id: &str) -> Option<AttachmentPoint<Self::Target>> {
        (**self).resolve(id)
    }

    fn resolve_anchor(
        &self,
        point: &AttachmentPoint<Self::Target>,
        id: &str,
    ) -> Option<Self::Target> {
        (**self).resolve_anchor(point, id)
    }

    fn attach(
        &self,
        point: &AttachmentPoint<Self::Target>,
        content: &Node,
        anchor: Option<&Self::Target>,
    ) {
        (**self).attach(point, content, anchor)
    }

    fn apply_stylesheet(&self, sheet: &Stylesheet) {
        (**self).apply_stylesheet(sheet)
    }
}
