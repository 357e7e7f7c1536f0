//! Core error types

use thiserror::Error;

/// Errors raised by the reactive core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A property name that the schema never declared
    #[error("Unknown property: {0}")]
    UnknownProperty(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
