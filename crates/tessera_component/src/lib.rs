//! Tessera Components
//!
//! Self-contained display elements built on [`tessera_core`] value holders
//! and driven through a [`tessera_platform`] host.
//!
//! # Features
//!
//! - **Property stores**: one observable cell per declared property, seeded
//!   from overrides or class defaults
//! - **Lifecycle**: materialization on first attach, ready on first connect,
//!   each at most once
//! - **Attach protocol**: append into an element or replace a placeholder
//! - **Focus bridging**: one `on_focus` per focus, whatever the host does
//!   with programmatic focus
//! - **Definitions**: first-writer-wins element definitions plus a
//!   process-wide class registry
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use tessera_component::prelude::*;
//! use tessera_platform::{HeadlessHost, HostTree};
//!
//! let class = ComponentClass::builder("docs.Greeting")
//!     .property("name", "world")
//!     .create_template(|template| {
//!         let text = template.text("hello");
//!         template.push(text)
//!     })
//!     .build();
//!
//! let host = Rc::new(HeadlessHost::new());
//! let main = host.create_element("main");
//! host.append_child(host.document(), main).unwrap();
//! define_component(&*host, class.clone()).unwrap();
//!
//! let greeting = Component::new(&class, host.clone(), ComponentConfig::new()).unwrap();
//! greeting.attach(main).unwrap();
//! assert!(greeting.is_materialized());
//! assert!(greeting.is_ready());
//! ```

mod class;
mod component;
mod config;
mod define;
mod destination;
mod error;
mod focus;
mod lifecycle;
mod template;


pub use class::{
    ClassFocusHook, ClassReadyHook, ComponentClass, ComponentClassBuilder, RenderMode,
    TemplateHook,
};
pub use component::{Component, WeakComponent};
pub use config::{
    ComponentConfig, FocusHandler, PropertyChange, PropertyListener, ReadyHook, RefHook,
};
pub use define::{
    define_component, element_name_for, element_prefix, is_valid_prefix, lookup_class,
    lookup_component, registered_ids, set_element_prefix, Definable, Definition, ServiceClass,
    DEFAULT_ELEMENT_PREFIX,
};
pub use destination::Destination;
pub use error::{ComponentError, Result};
pub use lifecycle::ReadyApi;
pub use template::TemplateBuilder;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::class::{ComponentClass, RenderMode};
    pub use crate::component::Component;
    pub use crate::config::{ComponentConfig, PropertyChange};
    pub use crate::define::{define_component, lookup_class, Definable};
    pub use crate::destination::Destination;
    pub use crate::error::{ComponentError, Result};
    pub use crate::lifecycle::ReadyApi;
    pub use crate::template::TemplateBuilder;
    pub use tessera_core::{ChangeMeta, PropValue, ValueHolder};
}
