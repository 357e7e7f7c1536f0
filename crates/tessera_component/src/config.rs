//! Construction configuration
//!
//! [`ComponentConfig`] is everything a caller may hand a component at
//! construction, as typed fields:
//!
//! - property overrides (plain values or existing holders)
//! - property change listeners
//! - a construction hook receiving the instance (`on_ref`)
//! - a focus handler
//! - an instance ready hook
//!
//! ```rust
//! use tessera_component::ComponentConfig;
//!
//! let config = ComponentConfig::new()
//!     .value("count", 3)
//!     .on_change("count", |value, change| {
//!         println!("{} from {:?}", value, change.meta.instance);
//!     })
//!     .on_focus(|| println!("focused"));
//! # drop(config);
//! ```

use std::fmt;
use std::rc::Rc;

use tessera_core::{Adapt, ChangeMeta, Overrides, PropValue, ValueHolder};

use crate::component::Component;
use crate::lifecycle::ReadyApi;

/// Delivered to construction-time change listeners
pub struct PropertyChange {
    /// Cell metadata, tagged with the owning instance
    pub meta: ChangeMeta,
    /// The component whose property changed
    pub component: Component,
}

/// Change listener registered through [`ComponentConfig::on_change`]
pub type PropertyListener = Rc<dyn Fn(&PropValue, &PropertyChange)>;

/// Instance focus handler
pub type FocusHandler = Rc<dyn Fn()>;

/// Instance ready hook
pub type ReadyHook = Rc<dyn Fn(&ReadyApi<'_>)>;

/// Hook run once with the freshly constructed instance
pub type RefHook = Box<dyn FnOnce(&Component)>;

/// Typed construction configuration
#[derive(Default)]
pub struct ComponentConfig {
    pub(crate) values: Overrides,
    pub(crate) listeners: Vec<(String, PropertyListener)>,
    pub(crate) on_ref: Option<RefHook>,
    pub(crate) on_focus: Option<FocusHandler>,
    pub(crate) on_ready: Option<ReadyHook>,
}

impl ComponentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial value for a property
    pub fn value(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.values
            .insert(name.into(), Adapt::Value(value.into()));
        self
    }

    /// Use an existing holder as the property's cell
    pub fn bind(mut self, name: impl Into<String>, holder: &ValueHolder<PropValue>) -> Self {
        self.values.insert(name.into(), Adapt::Holder(holder.clone()));
        self
    }

    /// Subscribe to changes of a property
    pub fn on_change<F>(mut self, name: impl Into<String>, listener: F) -> Self
    where
        F: Fn(&PropValue, &PropertyChange) + 'static,
    {
        self.listeners.push((name.into(), Rc::new(listener)));
        self
    }

    /// Run `hook` with the instance as soon as it is constructed
    pub fn on_ref<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&Component) + 'static,
    {
        self.on_ref = Some(Box::new(hook));
        self
    }

    /// Run `handler` whenever the component receives focus
    pub fn on_focus<F>(mut self, handler: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_focus = Some(Rc::new(handler));
        self
    }

    /// Run `hook` once the component first joins the live tree
    pub fn on_ready<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ReadyApi<'_>) + 'static,
    {
        self.on_ready = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("values", &self.values)
            .field(
                "listeners",
                &self.listeners.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .field("on_ref", &self.on_ref.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_ready", &self.on_ready.is_some())
            .finish()
    }
}

impl fmt::Debug for PropertyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyChange")
            .field("meta", &self.meta)
            .field("component", &self.component.id())
            .finish()
    }
}
