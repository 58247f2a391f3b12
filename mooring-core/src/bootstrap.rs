use std::cell::Cell;

use tracing::{debug, warn};

use crate::{
    component::{Component, ComponentDefinition, Contexts},
    config::BootstrapConfig,
    error::MountError,
    host::{Host, Stylesheet},
    instance::ComponentInstance,
};

/// Where and how to mount a definition.
#[derive(Debug)]
pub struct MountOptions {
    target: String,
    anchor: Option<String>,
    contexts: Contexts,
}

impl MountOptions {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            anchor: None,
            contexts: Contexts::new(),
        }
    }

    /// Insert before the target's child with this id instead of appending.
    pub fn anchor(mut self, id: impl Into<String>) -> Self {
        self.anchor = Some(id.into());
        self
    }

    /// Seed a context the root component (and everything below it) can read.
    pub fn context<T: 'static>(mut self, value: T) -> Self {
        self.contexts.insert(value);
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl From<&BootstrapConfig> for MountOptions {
    fn from(config: &BootstrapConfig) -> Self {
        let options = Self::new(config.target.clone());
        match &config.anchor {
            Some(anchor) => options.anchor(anchor.clone()),
            None => options,
        }
    }
}

/// Binds root components to attachment points of a [`Host`].
///
/// Every successful mount creates a new, independent instance. Mounting twice on the same target
/// appends the second instance after the first.
pub struct Bootstrapper<H> {
    host: H,
    stylesheets: Vec<Stylesheet>,
    styled: Cell<bool>,
}

impl<H: Host> Bootstrapper<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            stylesheets: vec![],
            styled: Cell::new(false),
        }
    }

    pub fn with_config(host: H, config: &BootstrapConfig) -> Self {
        config
            .stylesheets
            .iter()
            .cloned()
            .fold(Self::new(host), Self::stylesheet)
    }

    /// Queue a stylesheet for the host. Queued stylesheets are applied once, right before the
    /// first successful mount.
    pub fn stylesheet(mut self, sheet: Stylesheet) -> Self {
        self.stylesheets.push(sheet);
        self
    }

    pub fn mount(
        &self,
        definition: &ComponentDefinition,
        target: &str,
    ) -> Result<ComponentInstance, MountError> {
        self.mount_with(definition, MountOptions::new(target))
    }

    /// Validates `definition`, resolves the target (and anchor), then renders and attaches a new
    /// instance. Nothing is rendered or attached unless both checks pass.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(component = %definition.name(), attachment = %options.target),
    )]
    pub fn mount_with(
        &self,
        definition: &ComponentDefinition,
        options: MountOptions,
    ) -> Result<ComponentInstance, MountError> {
        let render = definition.checked_render().map_err(|reason| {
            warn!(%reason, "rejected component definition");
            MountError::InvalidDefinition {
                name: definition.name().to_string(),
                reason,
            }
        })?;

        let point = self.host.resolve(&options.target).ok_or_else(|| {
            warn!("attachment point not found");
            MountError::not_found(&options.target)
        })?;

        let anchor = match &options.anchor {
            Some(id) => Some(self.host.resolve_anchor(&point, id).ok_or_else(|| {
                warn!(anchor = %id, "anchor not found under attachment point");
                MountError::not_found(id)
            })?),
            None => None,
        };

        self.apply_stylesheets();

        let root = Component::create_with(definition.name_cow(), options.contexts, render);
        self.host.attach(&point, &root, anchor.as_ref());
        root.set_attached(true);

        let instance = ComponentInstance::new(definition.name_cow(), options.target, root);
        debug!(instance = %instance.id(), "mounted component");
        Ok(instance)
    }

    fn apply_stylesheets(&self) {
        if self.styled.replace(true) {
            return;
        }
        for sheet in &self.stylesheets {
            debug!(?sheet, "applying stylesheet");
            self.host.apply_stylesheet(sheet);
        }
    }
}
