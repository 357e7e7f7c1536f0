//! Platform error types

use thiserror::Error;

use crate::node::NodeId;

/// Host display-tree errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The node id does not refer to a live node
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The operation needs an element node
    #[error("Node is not an element: {0:?}")]
    NotAnElement(NodeId),

    /// The node is not a template and has no content fragment
    #[error("Node has no template content: {0:?}")]
    NoTemplateContent(NodeId),

    /// The element already owns a shadow root
    #[error("Shadow root already attached: {0:?}")]
    ShadowRootExists(NodeId),

    /// The insertion would produce an invalid tree
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),

    /// The name is not a valid element name for definitions
    #[error("Invalid element name: {0}")]
    InvalidElementName(String),

    /// A class is already defined under the name
    #[error("Element name already defined: {0}")]
    AlreadyDefined(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
