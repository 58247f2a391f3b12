#![warn(clippy::use_self)]

pub mod bootstrap;
pub mod component;
pub mod config;
pub mod host;
pub mod util;

mod error;
mod instance;
mod node;

pub use bootstrap::{Bootstrapper, MountOptions};
pub use component::ComponentDefinition;
pub use config::BootstrapConfig;
pub use error::*;
pub use host::{AttachmentPoint, BrowserHost, Host, MemoryHost, Stylesheet};
pub use instance::*;
pub use node::*;
