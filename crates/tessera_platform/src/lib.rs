//! Tessera Platform Abstraction Layer
//!
//! This crate provides the traits through which components reach their host
//! display tree, plus a headless in-memory host.
//!
//! # Architecture
//!
//! - [`HostTree`] - node creation, insertion, templates, focus, lifecycle
//!   notifications and the zero-delay task queue
//! - [`HostRegistry`] - the host's global element definitions
//! - [`DisplayElement`] - capability of a class that can be defined
//! - [`HeadlessHost`] - implementation of both traits without a display
//!
//! # Example
//!
//! ```rust
//! use tessera_platform::{HeadlessHost, HostTree, NodeKind};
//!
//! let host = HeadlessHost::new();
//! let placeholder = host.create_placeholder();
//! host.append_child(host.document(), placeholder.node).unwrap();
//!
//! let card = host.create_element("c-card");
//! host.replace_with(placeholder.node, card).unwrap();
//! assert_eq!(host.node_kind(card), Some(NodeKind::Element));
//! assert!(host.is_connected(card));
//! ```

mod error;
mod headless;
mod host;
mod node;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use headless::{HeadlessConfig, HeadlessHost, HostStats};
pub use host::{is_valid_element_name, DisplayElement, HostRegistry, HostTree};
pub use node::{NodeId, NodeKind, Placeholder, PLACEHOLDER_MARKER};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::headless::{HeadlessConfig, HeadlessHost};
    pub use crate::host::{DisplayElement, HostRegistry, HostTree};
    pub use crate::node::{NodeId, NodeKind, Placeholder};
}
