#![warn(clippy::use_self)]

extern crate self as mooring;

pub use mooring_core::{
    bootstrap, component, config, host, render, util, AttachmentPoint, BootstrapConfig,
    Bootstrapper, BrowserHost, ComponentDefinition, ComponentInstance, DefinitionError, Host,
    InstanceId, IntoNode, MemoryHost, MountError, MountOptions, Node, Stylesheet,
};
pub use mooring_macros::component;

pub use util::{document, is_browser};
pub use web_sys;

pub mod prelude {
    pub use crate::{
        component,
        component::{context, on_mount, register_context, try_context, with_context},
        render::Mode,
        Bootstrapper, ComponentDefinition, ComponentInstance, IntoNode, MountError, MountOptions,
        Node,
    };
}

/// Mounts `definition` into the page element whose id is `target`.
pub fn mount(
    definition: &ComponentDefinition,
    target: &str,
) -> Result<ComponentInstance, MountError> {
    mount_with(definition, MountOptions::new(target))
}

pub fn mount_with(
    definition: &ComponentDefinition,
    options: MountOptions,
) -> Result<ComponentInstance, MountError> {
    if !is_browser() {
        tracing::warn!("no browser document available, nothing can be mounted");
    }
    Bootstrapper::new(BrowserHost::new()).mount_with(definition, options)
}

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::prelude::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[component]
    fn hello() -> Node {
        Node::element("p").with_child("hello from the browser")
    }

    #[wasm_bindgen_test]
    fn mounts_into_page() {
        let document = crate::document().unwrap();
        let div = document.create_element("div").unwrap();
        div.set_id("facade-app");
        document.body().unwrap().append_child(&div).unwrap();

        let definition = ComponentDefinition::new("Hello", hello);
        let instance = crate::mount(&definition, "facade-app").unwrap();

        assert!(instance.is_mounted());
        assert_eq!(div.inner_html(), "<p>hello from the browser</p>");
    }

    #[wasm_bindgen_test]
    fn missing_target_in_page() {
        let definition = ComponentDefinition::new("Hello", hello);
        assert_eq!(
            crate::mount(&definition, "facade-missing").unwrap_err(),
            MountError::AttachmentPointNotFound {
                id: "facade-missing".into()
            }
        );
    }
}
