//! Handle given to template-building hooks

use tessera_platform::{HostTree, NodeId, Result};

/// The in-progress template of a materializing component
///
/// Nodes appended to [`TemplateBuilder::content`] end up, cloned, in the
/// component's mount point once the hook returns.
pub struct TemplateBuilder<'a> {
    host: &'a dyn HostTree,
    template: NodeId,
    content: NodeId,
}

impl<'a> TemplateBuilder<'a> {
    pub(crate) fn new(host: &'a dyn HostTree, template: NodeId) -> Result<Self> {
        let content = host.template_content(template)?;
        Ok(Self {
            host,
            template,
            content,
        })
    }

    /// The host, for operations the helpers below do not cover
    pub fn host(&self) -> &'a dyn HostTree {
        self.host
    }

    /// The template element itself
    pub fn template(&self) -> NodeId {
        self.template
    }

    /// The template's content fragment
    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Create a detached element
    pub fn element(&self, tag: &str) -> NodeId {
        self.host.create_element(tag)
    }

    /// Create a detached text node
    pub fn text(&self, text: &str) -> NodeId {
        self.host.create_text(text)
    }

    /// Append a node to the template content
    pub fn push(&self, node: NodeId) -> Result<()> {
        self.host.append_child(self.content, node)
    }

    /// Append `child` to `parent`
    pub fn append(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.host.append_child(parent, child)
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.host.set_attribute(node, name, value)
    }
}
