use mooring::{prelude::*, BootstrapConfig, BrowserHost};

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    let config = BootstrapConfig::parse(include_str!("../Mooring.toml"))
        .expect("Mooring.toml is malformed");

    let app = Bootstrapper::with_config(BrowserHost::new(), &config)
        .mount_with(
            &ComponentDefinition::new("Test", test),
            MountOptions::from(&config),
        )
        .expect("failed to mount application");

    tracing::info!(instance = %app.id(), attachment = app.target(), "application mounted");
    app.leak();
}

#[component]
fn test() -> Node {
    on_mount(|| tracing::debug!("test component attached"));

    Node::element("main")
        .with_attr("class", "test")
        .with_child(Node::element("h1").with_child("Hello, Mooring!"))
        .with_child(Node::element("p").with_child("Mounted into #app."))
}
