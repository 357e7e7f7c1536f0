//! Host collaborator traits
//!
//! Components never touch a concrete display tree. Everything they need from
//! the platform goes through two traits:
//!
//! - [`HostTree`] - node creation, insertion, templates, focus, the
//!   "connected to the live tree" notification and the event loop's
//!   zero-delay task queue
//! - [`HostRegistry`] - the platform's global name -> class definitions
//!
//! A class that can be defined with the host implements the
//! [`DisplayElement`] capability.

use std::any::Any;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::Result;
use crate::node::{NodeId, NodeKind};

/// Host display-tree operations
///
/// All methods take `&self`: hosts are driven from a single event-loop
/// thread and use interior mutability. Implementations must not hold
/// internal borrows while invoking focus listeners, connected callbacks or
/// deferred tasks, since those call back into the host.
pub trait HostTree {
    /// Create a detached element
    fn create_element(&self, tag: &str) -> NodeId;

    /// Create a detached text node
    fn create_text(&self, text: &str) -> NodeId;

    /// Create a detached template element with an empty content fragment
    fn create_template(&self) -> NodeId;

    /// Create a detached style element carrying `css`
    fn create_style(&self, css: &str) -> NodeId;

    /// Attach an isolated sub-tree exclusively owned by `host`
    fn attach_shadow(&self, host: NodeId) -> Result<NodeId>;

    /// Classify a node, `None` if it does not exist
    fn node_kind(&self, node: NodeId) -> Option<NodeKind>;

    /// Append `child` to `parent`, moving it if it already has a parent
    ///
    /// Appending a fragment moves the fragment's children instead.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Put `new` where `old` is and detach `old`
    fn replace_with(&self, old: NodeId, new: NodeId) -> Result<()>;

    /// Set an attribute on an element
    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<()>;

    /// Find a template in the live tree by selector (`#id`)
    fn query_template(&self, selector: &str) -> Option<NodeId>;

    /// The content fragment of a template
    fn template_content(&self, template: NodeId) -> Result<NodeId>;

    /// Clone a node, including descendants when `deep`
    fn clone_node(&self, node: NodeId, deep: bool) -> Result<NodeId>;

    /// Register a low-level focus listener on a node
    fn add_focus_listener(&self, node: NodeId, listener: Rc<dyn Fn()>) -> Result<()>;

    /// Trigger the platform's native focus behavior
    fn focus(&self, node: NodeId) -> Result<()>;

    /// Register a callback fired each time `node` becomes part of the live tree
    fn on_connected(&self, node: NodeId, callback: Rc<dyn Fn()>) -> Result<()>;

    /// Schedule `task` on the event loop after current synchronous work
    fn defer(&self, task: Box<dyn FnOnce()>);
}

/// Capability of a class that can be defined as a host display element
pub trait DisplayElement: Send + Sync + 'static {
    /// Class-intrinsic identifier
    fn class_id(&self) -> &str;

    /// Access the concrete class
    fn as_any(&self) -> &dyn Any;
}

/// The host's global name -> class definition registry
pub trait HostRegistry {
    /// The class defined under `name`, if any
    fn get(&self, name: &str) -> Option<Arc<dyn DisplayElement>>;

    /// Define `class` under `name`
    ///
    /// Fails if the name is invalid or already taken; callers that want
    /// first-writer-wins semantics query [`HostRegistry::get`] first.
    fn define(&self, name: &str, class: Arc<dyn DisplayElement>) -> Result<()>;
}

/// Whether `name` is acceptable as a defined element name
///
/// Names start with a lowercase ASCII letter, contain at least one `-`, and
/// otherwise use lowercase ASCII letters, digits, `-`, `.` or `_`.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase()
        && name.contains('-')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_element_names() {
        assert!(is_valid_element_name("c-counter"));
        assert!(is_valid_element_name("c-tab-bar2"));
        assert!(is_valid_element_name("x-a.b_c"));
    }

    #[test]
    fn test_invalid_element_names() {
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("counter"));
        assert!(!is_valid_element_name("C-counter"));
        assert!(!is_valid_element_name("-counter"));
        assert!(!is_valid_element_name("c-Counter"));
        assert!(!is_valid_element_name("1-counter"));
    }
}
