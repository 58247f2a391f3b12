use thiserror::Error;

/// Why a mount call was refused. Either way the host's render tree is left untouched.
#[derive(Clone, Error, PartialEq, Eq, Debug)]
pub enum MountError {
    #[error("attachment point `{id}` not found")]
    AttachmentPointNotFound { id: String },
    #[error("invalid component definition `{name}`: {reason}")]
    InvalidDefinition {
        name: String,
        reason: DefinitionError,
    },
}

impl MountError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::AttachmentPointNotFound { id: id.to_string() }
    }
}

#[derive(Clone, Copy, Error, PartialEq, Eq, Debug)]
pub enum DefinitionError {
    #[error("component name is empty")]
    EmptyName,
    #[error("component name must start with an uppercase letter and contain only letters, digits or `_`")]
    MalformedName,
    #[error("no render function supplied")]
    MissingRender,
}
