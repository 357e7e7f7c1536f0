//! Error types for tessera_component

use thiserror::Error;

use tessera_core::CoreError;
use tessera_platform::PlatformError;

/// Errors raised by component operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// `get`/`set`/`listen` on a name the class never declared
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// `attach` received something that is neither an element nor a placeholder
    #[error("Unknown destination type: {0}")]
    UnknownDestination(String),

    /// The class template reference did not resolve in the host
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Host display-tree failure
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl From<CoreError> for ComponentError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownProperty(name) => ComponentError::UnknownProperty(name),
        }
    }
}

/// Result type for component operations
pub type Result<T> = std::result::Result<T, ComponentError>;
