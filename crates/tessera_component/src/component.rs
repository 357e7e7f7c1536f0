//! Component instances
//!
//! A [`Component`] owns one values store, one host element and one mount
//! point, plus two one-shot flags:
//!
//! - `element_created` flips on the first successful [`Component::attach`],
//!   which materializes the class template and style into the mount point
//! - `ready_called` flips the first time the host reports the element as
//!   connected, firing the ready hook
//!
//! The two are independent: a component can be live and ready before it
//! ever materializes, and can be attached after it is already live.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tessera_component::{Component, ComponentClass, ComponentConfig};
//! use tessera_platform::{HeadlessHost, HostTree};
//!
//! let class = ComponentClass::builder("ui.Counter").property("count", 0).build();
//! let host = Rc::new(HeadlessHost::new());
//! let main = host.create_element("main");
//! host.append_child(host.document(), main).unwrap();
//!
//! let counter = Component::new(&class, host.clone(), ComponentConfig::new()).unwrap();
//! counter.attach(main).unwrap();
//!
//! counter.set("count", 5).unwrap();
//! assert_eq!(counter.get("count").unwrap().as_i64(), Some(5));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tessera_core::{InstanceId, PropValue, SubscriptionId, ValueHolder, ValueStore};
use tessera_platform::{HostTree, NodeId, NodeKind};

use crate::class::{ComponentClass, RenderMode};
use crate::config::{ComponentConfig, FocusHandler, PropertyChange, PropertyListener, ReadyHook};
use crate::destination::Destination;
use crate::error::{ComponentError, Result};
use crate::template::TemplateBuilder;

pub(crate) struct ComponentInner {
    pub(crate) id: InstanceId,
    pub(crate) class: Arc<ComponentClass>,
    pub(crate) host: Rc<dyn HostTree>,
    pub(crate) node: NodeId,
    pub(crate) mount: NodeId,
    pub(crate) values: ValueStore,
    pub(crate) element_created: Cell<bool>,
    pub(crate) ready_called: Cell<bool>,
    pub(crate) on_focus: RefCell<Option<FocusHandler>>,
    pub(crate) on_ready: Option<ReadyHook>,
    /// Token of the programmatic focus whose native call is in progress
    pub(crate) native_focus: RefCell<Option<FocusToken>>,
    /// Listener subscriptions to drop with the instance
    subscriptions: RefCell<Vec<(String, SubscriptionId)>>,
}

/// Marks one programmatic focus as already notified
pub(crate) type FocusToken = Rc<Cell<bool>>;

impl Drop for ComponentInner {
    fn drop(&mut self) {
        for (name, id) in self.subscriptions.get_mut().drain(..) {
            if let Ok(holder) = self.values.holder(&name) {
                holder.unsub(id);
            }
        }
    }
}

/// Handle to a component instance (cheap to clone)
#[derive(Clone)]
pub struct Component {
    pub(crate) inner: Rc<ComponentInner>,
}

/// Resolved insertion for a validated destination
enum Placement {
    Append(NodeId),
    Replace(NodeId),
}

impl Component {
    /// Construct an instance of `class` in `host`
    ///
    /// Order: host element and mount point, class template, values store,
    /// change listeners, focus bridging, connected notification, `on_ref`.
    /// Everything is wired before `on_ref`, so the hook may attach or focus
    /// the instance.
    pub fn new(
        class: &Arc<ComponentClass>,
        host: Rc<dyn HostTree>,
        config: ComponentConfig,
    ) -> Result<Self> {
        let ComponentConfig {
            values,
            listeners,
            on_ref,
            on_focus,
            on_ready,
        } = config;

        let node = host.create_element(&class.element_name());
        let mount = match class.render_mode() {
            RenderMode::NoShadow => node,
            RenderMode::Shadow => host.attach_shadow(node)?,
        };

        if let Some(selector) = class.template() {
            let template = host
                .query_template(selector)
                .ok_or_else(|| ComponentError::TemplateNotFound(selector.to_string()))?;
            let content = host.template_content(template)?;
            let copy = host.clone_node(content, true)?;
            host.append_child(mount, copy)?;
        }

        let values = ValueStore::from_schema(class.properties(), values);

        let component = Component {
            inner: Rc::new(ComponentInner {
                id: InstanceId::next(),
                class: Arc::clone(class),
                host,
                node,
                mount,
                values,
                element_created: Cell::new(false),
                ready_called: Cell::new(false),
                on_focus: RefCell::new(None),
                on_ready,
                native_focus: RefCell::new(None),
                subscriptions: RefCell::new(Vec::new()),
            }),
        };

        component.wire_listeners(listeners);
        component.wire_focus(on_focus)?;
        component.wire_connected()?;

        if let Some(on_ref) = on_ref {
            on_ref(&component);
        }

        tracing::debug!(
            class = class.id(),
            instance = component.inner.id.to_raw(),
            "component constructed"
        );
        Ok(component)
    }

    fn wire_listeners(&self, listeners: Vec<(String, PropertyListener)>) {
        for (name, listener) in listeners {
            let Ok(holder) = self.inner.values.holder(&name) else {
                tracing::debug!(property = %name, "ignoring listener for undeclared property");
                continue;
            };

            let weak = Rc::downgrade(&self.inner);
            let instance = self.inner.id;
            let id = holder.sub(move |value, meta| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let change = PropertyChange {
                    meta: meta.with_instance(instance),
                    component: Component { inner },
                };
                listener(value, &change);
            });
            self.inner.subscriptions.borrow_mut().push((name, id));
        }
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    /// Current value of a declared property
    pub fn get(&self, name: &str) -> Result<PropValue> {
        Ok(self.inner.values.get(name)?)
    }

    /// Replace a declared property's value, notifying its subscribers
    pub fn set(&self, name: &str, value: impl Into<PropValue>) -> Result<()> {
        Ok(self.inner.values.set(name, value)?)
    }

    /// The authoritative cell behind a property
    pub fn holder(&self, name: &str) -> Result<ValueHolder<PropValue>> {
        Ok(self.inner.values.holder(name)?.clone())
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.inner.values.contains(name)
    }

    /// Declared property names in declaration order
    pub fn property_names(&self) -> Vec<String> {
        self.inner.values.names().map(str::to_string).collect()
    }

    // =========================================================================
    // PLACEMENT
    // =========================================================================

    /// Materialize (first call only) and insert into `destination`
    ///
    /// The destination is validated before anything happens, so a rejected
    /// destination leaves the component untouched.
    pub fn attach(&self, destination: impl Into<Destination>) -> Result<()> {
        let destination = destination.into();
        let placement = self.resolve(&destination)?;

        self.materialize()?;

        let host = &self.inner.host;
        match placement {
            Placement::Append(parent) => host.append_child(parent, self.inner.node)?,
            Placement::Replace(marker) => host.replace_with(marker, self.inner.node)?,
        }
        Ok(())
    }

    fn resolve(&self, destination: &Destination) -> Result<Placement> {
        let host = &self.inner.host;
        let placement = match destination {
            Destination::Element(node) if host.node_kind(*node) == Some(NodeKind::Element) => {
                Some(Placement::Append(*node))
            }
            Destination::Placeholder(placeholder)
                if placeholder.is_recognized() && host.node_kind(placeholder.node).is_some() =>
            {
                Some(Placement::Replace(placeholder.node))
            }
            _ => None,
        };
        placement.ok_or_else(|| ComponentError::UnknownDestination(destination.to_string()))
    }

    /// Build the visual subtree into the mount point, once
    fn materialize(&self) -> Result<()> {
        if self.inner.element_created.get() {
            return Ok(());
        }

        let host = self.inner.host.as_ref();
        let class = &self.inner.class;
        let template = host.create_template();

        // Nothing reaches the mount point until the hook has succeeded
        if let Some(hook) = class.create_template_hook() {
            hook(&TemplateBuilder::new(host, template)?)?;
        }

        let content = host.template_content(template)?;
        let fragment = host.clone_node(content, true)?;

        if let Some(css) = class.css() {
            let style = host.create_style(css);
            host.append_child(self.inner.mount, style)?;
        }
        host.append_child(self.inner.mount, fragment)?;

        self.inner.element_created.set(true);
        tracing::debug!(
            class = class.id(),
            instance = self.inner.id.to_raw(),
            "element materialized"
        );
        Ok(())
    }

    /// Tag `child` with a slot name and append it to this component
    pub fn place(&self, slot_name: &str, child: NodeId) -> Result<()> {
        let host = &self.inner.host;
        host.set_attribute(child, "slot", slot_name)?;
        host.append_child(self.inner.node, child)?;
        Ok(())
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    pub fn class(&self) -> &Arc<ComponentClass> {
        &self.inner.class
    }

    /// The component's own host element
    pub fn node(&self) -> NodeId {
        self.inner.node
    }

    /// Where the component's visual content lives
    pub fn mount_point(&self) -> NodeId {
        self.inner.mount
    }

    pub fn host(&self) -> &Rc<dyn HostTree> {
        &self.inner.host
    }

    /// Whether the visual subtree has been built
    pub fn is_materialized(&self) -> bool {
        self.inner.element_created.get()
    }

    /// Whether the ready signal has fired
    pub fn is_ready(&self) -> bool {
        self.inner.ready_called.get()
    }

    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.inner.id)
            .field("class", &self.inner.class.id())
            .field("node", &self.inner.node)
            .field("values", &self.inner.values)
            .field("materialized", &self.is_materialized())
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Non-owning handle to a component
#[derive(Clone)]
pub struct WeakComponent {
    inner: Weak<ComponentInner>,
}

impl WeakComponent {
    /// The component, if it is still alive
    pub fn upgrade(&self) -> Option<Component> {
        self.inner.upgrade().map(|inner| Component { inner })
    }
}

impl fmt::Debug for WeakComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakComponent")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
