//! Headless in-memory host
//!
//! [`HeadlessHost`] implements [`HostTree`] and [`HostRegistry`] without any
//! display: nodes live in a slotmap arena, connectedness is propagated through
//! children and shadow roots, and deferred tasks sit in a FIFO queue until
//! [`HeadlessHost::run_until_idle`] drains it. It backs the test suites and
//! any embedding that wants component semantics without a real display tree.
//!
//! ```rust
//! use tessera_platform::{HeadlessHost, HostTree};
//!
//! let host = HeadlessHost::new();
//! let div = host.create_element("div");
//! host.append_child(host.document(), div).unwrap();
//! assert!(host.is_connected(div));
//! ```

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::{smallvec, SmallVec};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{PlatformError, Result};
use crate::host::{is_valid_element_name, DisplayElement, HostRegistry, HostTree};
use crate::node::{NodeId, NodeKind, Placeholder};

type Callback = Rc<dyn Fn()>;
type Nodes = SlotMap<NodeId, NodeData>;

/// Internal node storage
struct NodeData {
    kind: NodeKind,
    /// Element tag name
    tag: Option<String>,
    /// Text content (text nodes, comments, styles)
    text: Option<String>,
    attributes: FxHashMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Shadow root owned by this element
    shadow_root: Option<NodeId>,
    /// Element owning this shadow root
    shadow_host: Option<NodeId>,
    /// Template content fragment
    content: Option<NodeId>,
    connected: bool,
    focus_listeners: SmallVec<[Callback; 1]>,
    connected_callbacks: SmallVec<[Callback; 1]>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: None,
            text: None,
            attributes: FxHashMap::default(),
            parent: None,
            children: Vec::new(),
            shadow_root: None,
            shadow_host: None,
            content: None,
            connected: false,
            focus_listeners: SmallVec::new(),
            connected_callbacks: SmallVec::new(),
        }
    }

    fn element(tag: &str) -> Self {
        let mut data = Self::new(NodeKind::Element);
        data.tag = Some(tag.to_string());
        data
    }
}

/// Behavior switches for the headless host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeadlessConfig {
    /// Whether `focus()` raises focus notifications itself
    ///
    /// Off by default: many hosts only notify for focus that did not come
    /// from a programmatic call.
    pub programmatic_focus_events: bool,
}

/// Statistics about the headless host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostStats {
    pub node_count: usize,
    pub templates_created: usize,
    pub definitions: usize,
    pub pending_tasks: usize,
}

/// In-memory host display tree and definition registry
pub struct HeadlessHost {
    nodes: RefCell<Nodes>,
    document: NodeId,
    definitions: RefCell<FxHashMap<String, Arc<dyn DisplayElement>>>,
    tasks: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    focused: Cell<Option<NodeId>>,
    templates_created: Cell<usize>,
    config: HeadlessConfig,
}

impl HeadlessHost {
    /// Create a host with default behavior
    pub fn new() -> Self {
        Self::with_config(HeadlessConfig::default())
    }

    /// Create a host with custom behavior
    pub fn with_config(config: HeadlessConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut document = NodeData::new(NodeKind::Document);
        document.connected = true;
        let document = nodes.insert(document);

        Self {
            nodes: RefCell::new(nodes),
            document,
            definitions: RefCell::new(FxHashMap::default()),
            tasks: RefCell::new(VecDeque::new()),
            focused: Cell::new(None),
            templates_created: Cell::new(0),
            config,
        }
    }

    /// Root of the live tree
    pub fn document(&self) -> NodeId {
        self.document
    }

    fn insert(&self, data: NodeData) -> NodeId {
        self.nodes.borrow_mut().insert(data)
    }

    // =========================================================================
    // TEST AND EMBEDDING HELPERS
    // =========================================================================

    /// Create a detached placeholder marker node
    pub fn create_placeholder(&self) -> Placeholder {
        let mut data = NodeData::new(NodeKind::Comment);
        data.text = Some("placeholder".to_string());
        Placeholder::new(self.insert(data))
    }

    /// Create a template with `id`, connected under the document
    pub fn add_template(&self, id: &str) -> Result<NodeId> {
        let template = self.create_template();
        self.set_attribute(template, "id", id)?;
        self.append_child(self.document, template)?;
        Ok(template)
    }

    /// Deliver a non-programmatic focus (pointer, keyboard navigation) to `node`
    pub fn dispatch_focus(&self, node: NodeId) -> Result<()> {
        let listeners: SmallVec<[Callback; 1]> = {
            let nodes = self.nodes.borrow();
            let data = nodes.get(node).ok_or(PlatformError::NodeNotFound(node))?;
            data.focus_listeners.clone()
        };
        self.focused.set(Some(node));
        for listener in listeners {
            listener();
        }
        Ok(())
    }

    /// Run deferred tasks until the queue is empty, returning how many ran
    ///
    /// Tasks scheduled while draining run in the same call.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.tasks.borrow_mut().pop_front();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }

    /// Number of deferred tasks waiting to run
    pub fn pending_tasks(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// The node that last received focus
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow().get(node).and_then(|n| n.tag.clone())
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow().get(node).and_then(|n| n.text.clone())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(node)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    pub fn shadow_root(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node).and_then(|n| n.shadow_root)
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.nodes
            .borrow()
            .get(node)
            .map(|n| n.connected)
            .unwrap_or(false)
    }

    /// Names defined in the registry, sorted
    pub fn defined_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Get statistics about the host
    pub fn stats(&self) -> HostStats {
        HostStats {
            node_count: self.nodes.borrow().len(),
            templates_created: self.templates_created.get(),
            definitions: self.definitions.borrow().len(),
            pending_tasks: self.tasks.borrow().len(),
        }
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn check_insert(nodes: &Nodes, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_kind = nodes
            .get(parent)
            .ok_or(PlatformError::NodeNotFound(parent))?
            .kind;
        let child_kind = nodes
            .get(child)
            .ok_or(PlatformError::NodeNotFound(child))?
            .kind;

        if !parent_kind.is_container() {
            return Err(PlatformError::HierarchyRequest(format!(
                "cannot insert into a {:?} node",
                parent_kind
            )));
        }
        if matches!(child_kind, NodeKind::Document | NodeKind::ShadowRoot) {
            return Err(PlatformError::HierarchyRequest(format!(
                "a {:?} node cannot be inserted",
                child_kind
            )));
        }
        if Self::is_inclusive_ancestor(nodes, child, parent) {
            return Err(PlatformError::HierarchyRequest(
                "node would become its own ancestor".to_string(),
            ));
        }
        Ok(())
    }

    /// Shadow-including inclusive ancestor check
    fn is_inclusive_ancestor(nodes: &Nodes, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = nodes.get(id).and_then(|n| n.parent.or(n.shadow_host));
        }
        false
    }

    /// Nodes that actually move when `node` is inserted
    fn inserted_nodes(nodes: &mut Nodes, node: NodeId) -> SmallVec<[NodeId; 4]> {
        if nodes[node].kind == NodeKind::Fragment {
            std::mem::take(&mut nodes[node].children).into_iter().collect()
        } else {
            smallvec![node]
        }
    }

    fn detach(nodes: &mut Nodes, node: NodeId) {
        if let Some(parent) = nodes[node].parent.take() {
            if let Some(parent) = nodes.get_mut(parent) {
                parent.children.retain(|c| *c != node);
            }
        }
    }

    /// Propagate connectedness in tree order, collecting callbacks of nodes
    /// that just became connected
    fn set_connected(nodes: &mut Nodes, node: NodeId, connected: bool, fired: &mut Vec<Callback>) {
        let Some(data) = nodes.get_mut(node) else {
            return;
        };
        let was_connected = data.connected;
        data.connected = connected;
        if connected && !was_connected {
            fired.extend(data.connected_callbacks.iter().cloned());
        }

        let shadow_root = data.shadow_root;
        let children = data.children.clone();
        if let Some(root) = shadow_root {
            Self::set_connected(nodes, root, connected, fired);
        }
        for child in children {
            Self::set_connected(nodes, child, connected, fired);
        }
    }

    fn clone_into(nodes: &mut Nodes, source: NodeId, deep: bool) -> Result<NodeId> {
        let (mut copy, children, content) = {
            let data = nodes.get(source).ok_or(PlatformError::NodeNotFound(source))?;
            let mut copy = NodeData::new(data.kind);
            copy.tag = data.tag.clone();
            copy.text = data.text.clone();
            copy.attributes = data.attributes.clone();
            let children = if deep { data.children.clone() } else { Vec::new() };
            (copy, children, data.content)
        };

        copy.content = match content {
            Some(content) if deep => Some(Self::clone_into(nodes, content, true)?),
            Some(_) => Some(nodes.insert(NodeData::new(NodeKind::Fragment))),
            None => None,
        };

        let id = nodes.insert(copy);
        for child in children {
            let cloned = Self::clone_into(nodes, child, true)?;
            nodes[cloned].parent = Some(id);
            nodes[id].children.push(cloned);
        }
        Ok(id)
    }

    fn run_callbacks(callbacks: Vec<Callback>) {
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostTree for HeadlessHost {
    fn create_element(&self, tag: &str) -> NodeId {
        self.insert(NodeData::element(tag))
    }

    fn create_text(&self, text: &str) -> NodeId {
        let mut data = NodeData::new(NodeKind::Text);
        data.text = Some(text.to_string());
        self.insert(data)
    }

    fn create_template(&self) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let content = nodes.insert(NodeData::new(NodeKind::Fragment));
        let mut template = NodeData::element("template");
        template.content = Some(content);
        self.templates_created.set(self.templates_created.get() + 1);
        nodes.insert(template)
    }

    fn create_style(&self, css: &str) -> NodeId {
        let mut style = NodeData::element("style");
        style.text = Some(css.to_string());
        self.insert(style)
    }

    fn attach_shadow(&self, host: NodeId) -> Result<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        let data = nodes.get(host).ok_or(PlatformError::NodeNotFound(host))?;
        if data.kind != NodeKind::Element {
            return Err(PlatformError::NotAnElement(host));
        }
        if data.shadow_root.is_some() {
            return Err(PlatformError::ShadowRootExists(host));
        }

        let mut root = NodeData::new(NodeKind::ShadowRoot);
        root.shadow_host = Some(host);
        root.connected = data.connected;
        let root = nodes.insert(root);
        nodes[host].shadow_root = Some(root);
        Ok(root)
    }

    fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.borrow().get(node).map(|n| n.kind)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let fired = {
            let mut nodes = self.nodes.borrow_mut();
            Self::check_insert(&nodes, parent, child)?;

            let moved = Self::inserted_nodes(&mut nodes, child);
            for &node in &moved {
                Self::detach(&mut nodes, node);
                nodes[node].parent = Some(parent);
                nodes[parent].children.push(node);
            }

            let connected = nodes[parent].connected;
            let mut fired = Vec::new();
            for &node in &moved {
                Self::set_connected(&mut nodes, node, connected, &mut fired);
            }
            fired
        };

        Self::run_callbacks(fired);
        Ok(())
    }

    fn replace_with(&self, old: NodeId, new: NodeId) -> Result<()> {
        let fired = {
            let mut nodes = self.nodes.borrow_mut();
            let parent = nodes
                .get(old)
                .ok_or(PlatformError::NodeNotFound(old))?
                .parent;
            if !nodes.contains_key(new) {
                return Err(PlatformError::NodeNotFound(new));
            }
            if old == new {
                return Ok(());
            }
            let Some(parent) = parent else {
                tracing::debug!(?old, "replace_with on a parentless node is a no-op");
                return Ok(());
            };
            Self::check_insert(&nodes, parent, new)?;

            let moved = Self::inserted_nodes(&mut nodes, new);
            for &node in &moved {
                Self::detach(&mut nodes, node);
                nodes[node].parent = Some(parent);
            }

            let index = nodes[parent]
                .children
                .iter()
                .position(|c| *c == old)
                .ok_or_else(|| {
                    PlatformError::HierarchyRequest("node missing from its parent".to_string())
                })?;
            let children = &mut nodes[parent].children;
            children.remove(index);
            for (offset, &node) in moved.iter().enumerate() {
                children.insert(index + offset, node);
            }
            nodes[old].parent = None;

            let mut fired = Vec::new();
            Self::set_connected(&mut nodes, old, false, &mut fired);
            let connected = nodes[parent].connected;
            for &node in &moved {
                Self::set_connected(&mut nodes, node, connected, &mut fired);
            }
            fired
        };

        Self::run_callbacks(fired);
        Ok(())
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let data = nodes
            .get_mut(node)
            .ok_or(PlatformError::NodeNotFound(node))?;
        if data.kind != NodeKind::Element {
            return Err(PlatformError::NotAnElement(node));
        }
        data.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn query_template(&self, selector: &str) -> Option<NodeId> {
        let Some(id) = selector.strip_prefix('#') else {
            tracing::debug!(selector, "only #id template selectors are supported");
            return None;
        };
        self.nodes
            .borrow()
            .iter()
            .find(|(_, n)| {
                n.connected
                    && n.content.is_some()
                    && n.attributes.get("id").map(String::as_str) == Some(id)
            })
            .map(|(node, _)| node)
    }

    fn template_content(&self, template: NodeId) -> Result<NodeId> {
        self.nodes
            .borrow()
            .get(template)
            .ok_or(PlatformError::NodeNotFound(template))?
            .content
            .ok_or(PlatformError::NoTemplateContent(template))
    }

    fn clone_node(&self, node: NodeId, deep: bool) -> Result<NodeId> {
        Self::clone_into(&mut self.nodes.borrow_mut(), node, deep)
    }

    fn add_focus_listener(&self, node: NodeId, listener: Rc<dyn Fn()>) -> Result<()> {
        self.nodes
            .borrow_mut()
            .get_mut(node)
            .ok_or(PlatformError::NodeNotFound(node))?
            .focus_listeners
            .push(listener);
        Ok(())
    }

    fn focus(&self, node: NodeId) -> Result<()> {
        match self.node_kind(node) {
            Some(NodeKind::Element) => {}
            Some(_) => return Err(PlatformError::NotAnElement(node)),
            None => return Err(PlatformError::NodeNotFound(node)),
        }
        if self.config.programmatic_focus_events {
            self.dispatch_focus(node)
        } else {
            self.focused.set(Some(node));
            Ok(())
        }
    }

    fn on_connected(&self, node: NodeId, callback: Rc<dyn Fn()>) -> Result<()> {
        self.nodes
            .borrow_mut()
            .get_mut(node)
            .ok_or(PlatformError::NodeNotFound(node))?
            .connected_callbacks
            .push(callback);
        Ok(())
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl HostRegistry for HeadlessHost {
    fn get(&self, name: &str) -> Option<Arc<dyn DisplayElement>> {
        self.definitions.borrow().get(name).cloned()
    }

    fn define(&self, name: &str, class: Arc<dyn DisplayElement>) -> Result<()> {
        if !is_valid_element_name(name) {
            return Err(PlatformError::InvalidElementName(name.to_string()));
        }
        let mut definitions = self.definitions.borrow_mut();
        if definitions.contains_key(name) {
            return Err(PlatformError::AlreadyDefined(name.to_string()));
        }
        tracing::debug!(name, class = class.class_id(), "element defined");
        definitions.insert(name.to_string(), class);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    fn counter() -> (Rc<Cell<u32>>, Rc<dyn Fn()>) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, Rc::new(move || count_clone.set(count_clone.get() + 1)))
    }

    struct TestClass(&'static str);

    impl DisplayElement for TestClass {
        fn class_id(&self) -> &str {
            self.0
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_append_connects() {
        let host = HeadlessHost::new();
        let div = host.create_element("div");
        let span = host.create_element("span");
        host.append_child(div, span).unwrap();
        assert!(!host.is_connected(span));

        host.append_child(host.document(), div).unwrap();
        assert!(host.is_connected(div));
        assert!(host.is_connected(span));
        assert_eq!(host.children(host.document()), vec![div]);
        assert_eq!(host.parent(span), Some(div));
    }

    #[test]
    fn test_connected_callback_per_connection() {
        let host = HeadlessHost::new();
        let (count, callback) = counter();
        let el = host.create_element("c-thing");
        host.on_connected(el, callback).unwrap();

        let a = host.create_element("div");
        let b = host.create_element("div");
        host.append_child(host.document(), a).unwrap();
        host.append_child(host.document(), b).unwrap();

        host.append_child(a, el).unwrap();
        assert_eq!(count.get(), 1);

        // Moving between connected parents reconnects
        host.append_child(b, el).unwrap();
        assert_eq!(count.get(), 1);

        let detached = host.create_element("div");
        host.append_child(detached, el).unwrap();
        assert!(!host.is_connected(el));
        host.append_child(b, el).unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_shadow_root_connectivity() {
        let host = HeadlessHost::new();
        let el = host.create_element("c-box");
        let root = host.attach_shadow(el).unwrap();
        let inner = host.create_element("p");
        let (count, callback) = counter();
        host.on_connected(inner, callback).unwrap();
        host.append_child(root, inner).unwrap();

        host.append_child(host.document(), el).unwrap();
        assert!(host.is_connected(root));
        assert!(host.is_connected(inner));
        assert_eq!(count.get(), 1);
        assert_eq!(host.shadow_root(el), Some(root));
        assert_eq!(
            host.attach_shadow(el),
            Err(PlatformError::ShadowRootExists(el))
        );
    }

    #[test]
    fn test_fragment_append_moves_children() {
        let host = HeadlessHost::new();
        let template = host.create_template();
        let content = host.template_content(template).unwrap();
        let a = host.create_text("a");
        let b = host.create_text("b");
        host.append_child(content, a).unwrap();
        host.append_child(content, b).unwrap();

        let target = host.create_element("div");
        host.append_child(target, content).unwrap();
        assert_eq!(host.children(target), vec![a, b]);
        assert!(host.children(content).is_empty());
    }

    #[test]
    fn test_clone_deep() {
        let host = HeadlessHost::new();
        let template = host.create_template();
        let content = host.template_content(template).unwrap();
        let p = host.create_element("p");
        host.set_attribute(p, "class", "x").unwrap();
        let text = host.create_text("hi");
        host.append_child(p, text).unwrap();
        host.append_child(content, p).unwrap();

        let copy = host.clone_node(content, true).unwrap();
        let copied = host.children(copy);
        assert_eq!(copied.len(), 1);
        assert_ne!(copied[0], p);
        assert_eq!(host.attribute(copied[0], "class").as_deref(), Some("x"));
        assert_eq!(
            host.text(host.children(copied[0])[0]).as_deref(),
            Some("hi")
        );
        // Source untouched
        assert_eq!(host.children(content), vec![p]);

        let shallow = host.clone_node(p, false).unwrap();
        assert!(host.children(shallow).is_empty());
    }

    #[test]
    fn test_replace_with() {
        let host = HeadlessHost::new();
        let list = host.create_element("ul");
        host.append_child(host.document(), list).unwrap();
        let first = host.create_element("li");
        let placeholder = host.create_placeholder();
        let last = host.create_element("li");
        for node in [first, placeholder.node, last] {
            host.append_child(list, node).unwrap();
        }

        let (count, callback) = counter();
        let real = host.create_element("c-real");
        host.on_connected(real, callback).unwrap();
        host.replace_with(placeholder.node, real).unwrap();

        assert_eq!(host.children(list), vec![first, real, last]);
        assert_eq!(host.parent(placeholder.node), None);
        assert!(!host.is_connected(placeholder.node));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_replace_parentless_is_noop() {
        let host = HeadlessHost::new();
        let placeholder = host.create_placeholder();
        let real = host.create_element("div");
        host.replace_with(placeholder.node, real).unwrap();
        assert_eq!(host.parent(real), None);
    }

    #[test]
    fn test_hierarchy_errors() {
        let host = HeadlessHost::new();
        let outer = host.create_element("div");
        let inner = host.create_element("div");
        host.append_child(outer, inner).unwrap();

        assert!(matches!(
            host.append_child(inner, outer),
            Err(PlatformError::HierarchyRequest(_))
        ));

        let text = host.create_text("t");
        assert!(matches!(
            host.append_child(text, inner),
            Err(PlatformError::HierarchyRequest(_))
        ));
        assert!(matches!(
            host.append_child(outer, host.document()),
            Err(PlatformError::HierarchyRequest(_))
        ));
        assert_eq!(
            host.set_attribute(text, "slot", "x"),
            Err(PlatformError::NotAnElement(text))
        );
    }

    #[test]
    fn test_query_template() {
        let host = HeadlessHost::new();
        let template = host.add_template("card").unwrap();
        assert_eq!(host.query_template("#card"), Some(template));
        assert_eq!(host.query_template("#missing"), None);
        assert_eq!(host.query_template("card"), None);

        let detached = host.create_template();
        host.set_attribute(detached, "id", "loose").unwrap();
        assert_eq!(host.query_template("#loose"), None);
    }

    #[test]
    fn test_programmatic_focus_quirk() {
        let quiet = HeadlessHost::new();
        let el = quiet.create_element("input");
        let (count, listener) = counter();
        quiet.add_focus_listener(el, listener).unwrap();

        quiet.focus(el).unwrap();
        assert_eq!(count.get(), 0);
        assert_eq!(quiet.focused(), Some(el));
        quiet.dispatch_focus(el).unwrap();
        assert_eq!(count.get(), 1);

        let loud = HeadlessHost::with_config(HeadlessConfig {
            programmatic_focus_events: true,
        });
        let el = loud.create_element("input");
        let (count, listener) = counter();
        loud.add_focus_listener(el, listener).unwrap();
        loud.focus(el).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_deferred_tasks_fifo() {
        let host = Rc::new(HeadlessHost::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            host.defer(Box::new(move || log.borrow_mut().push(i)));
        }
        {
            let log = log.clone();
            let host_clone = host.clone();
            host.defer(Box::new(move || {
                let log = log.clone();
                host_clone.defer(Box::new(move || log.borrow_mut().push(99)));
            }));
        }

        assert!(log.borrow().is_empty());
        assert_eq!(host.pending_tasks(), 4);
        assert_eq!(host.run_until_idle(), 5);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 99]);
        assert_eq!(host.stats().pending_tasks, 0);
    }

    #[test]
    fn test_registry_define() {
        let host = HeadlessHost::new();
        host.define("c-one", Arc::new(TestClass("ui.One"))).unwrap();

        assert_eq!(
            host.get("c-one").map(|c| c.class_id().to_string()),
            Some("ui.One".to_string())
        );
        assert_eq!(
            host.define("c-one", Arc::new(TestClass("ui.Other"))),
            Err(PlatformError::AlreadyDefined("c-one".into()))
        );
        assert_eq!(
            host.define("One", Arc::new(TestClass("ui.One"))),
            Err(PlatformError::InvalidElementName("One".into()))
        );
        assert_eq!(host.defined_names(), vec!["c-one".to_string()]);
    }

    #[test]
    fn test_stats() {
        let host = HeadlessHost::new();
        host.create_template();
        host.create_element("div");

        let stats = host.stats();
        // document + template + its content + div
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.templates_created, 1);
        assert_eq!(stats.definitions, 0);
    }
}
