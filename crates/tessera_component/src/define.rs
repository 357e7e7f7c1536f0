//! Element definitions
//!
//! [`define_component`] makes a class known in two places:
//!
//! 1. the host registry, under a derived element name, when the class is a
//!    display element and nothing is defined under that name yet
//! 2. the process-wide internal registry, keyed by its class id, always
//!
//! Both are first-writer-wins and neither treats a repeat as an error.

use std::any::Any;
use std::sync::{Arc, OnceLock};

use tessera_core::registry;
use tessera_platform::{DisplayElement, HostRegistry};

use crate::class::ComponentClass;
use crate::error::Result;

pub use tessera_core::registry::registered_ids;

/// Element name prefix used unless configured otherwise
pub const DEFAULT_ELEMENT_PREFIX: &str = "c-";

static ELEMENT_PREFIX: OnceLock<String> = OnceLock::new();

/// Set the element name prefix for the rest of the process
///
/// Only the first call has an effect; returns whether it was this one.
/// Rejects prefixes [`is_valid_prefix`] refuses.
pub fn set_element_prefix(prefix: &str) -> bool {
    if !is_valid_prefix(prefix) {
        tracing::warn!(prefix, "invalid element prefix ignored");
        return false;
    }
    let accepted = ELEMENT_PREFIX.set(prefix.to_string()).is_ok();
    if !accepted {
        tracing::debug!(prefix, current = element_prefix(), "element prefix already set");
    }
    accepted
}

/// The active element name prefix
pub fn element_prefix() -> &'static str {
    ELEMENT_PREFIX
        .get()
        .map(String::as_str)
        .unwrap_or(DEFAULT_ELEMENT_PREFIX)
}

/// Prefixes are lowercase ASCII, start with a letter and end with `-`
pub fn is_valid_prefix(prefix: &str) -> bool {
    prefix.starts_with(|c: char| c.is_ascii_lowercase())
        && prefix.ends_with('-')
        && prefix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Element name for a class id: prefix plus the lowercased last dot segment
pub fn element_name_for(class_id: &str) -> String {
    let segment = class_id.rsplit('.').next().unwrap_or(class_id);
    format!("{}{}", element_prefix(), segment.to_lowercase())
}

/// A class that can go through [`define_component`]
pub trait Definable: Send + Sync + 'static {
    /// Class-intrinsic identifier, the internal registry key
    fn class_id(&self) -> &str;

    /// The display element capability, if the class has it
    fn as_display_element(self: Arc<Self>) -> Option<Arc<dyn DisplayElement>> {
        None
    }

    /// Called with the element name once the host accepted the class
    fn record_definition(&self, _name: &str) {}

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl Definable for ComponentClass {
    fn class_id(&self) -> &str {
        self.id()
    }

    fn as_display_element(self: Arc<Self>) -> Option<Arc<dyn DisplayElement>> {
        Some(self)
    }

    fn record_definition(&self, name: &str) {
        self.record_defined_as(name);
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A registrable class without a visual representation
///
/// Lives only in the internal registry, for lookup by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceClass {
    id: String,
}

impl ServiceClass {
    pub fn new(id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { id: id.into() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Definable for ServiceClass {
    fn class_id(&self) -> &str {
        &self.id
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Outcome of [`define_component`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub class_id: String,
    /// Element name, for display element classes
    pub name: Option<String>,
    /// Whether this call added the host definition
    pub newly_defined: bool,
}

/// Define `class` with the host (if it is a display element) and register
/// it internally
pub fn define_component(
    host: &dyn HostRegistry,
    class: Arc<dyn Definable>,
) -> Result<Definition> {
    let class_id = class.class_id().to_string();
    let mut definition = Definition {
        class_id: class_id.clone(),
        name: None,
        newly_defined: false,
    };

    if let Some(display) = Arc::clone(&class).as_display_element() {
        let name = element_name_for(&class_id);
        tracing::debug!(class = %class_id, name = %name, "maybe defining element");

        if host.get(&name).is_none() {
            tracing::debug!(class = %class_id, name = %name, "surely defining element");
            host.define(&name, display)?;
            class.record_definition(&name);
            definition.newly_defined = true;
        }
        definition.name = Some(name);
    }

    registry::register(&class_id, class);
    Ok(definition)
}

/// Look up a registered class by id
pub fn lookup_component(class_id: &str) -> Option<Arc<dyn Definable>> {
    registry::lookup::<Arc<dyn Definable>>(class_id)
}

/// Look up a registered component class by id
pub fn lookup_class(class_id: &str) -> Option<Arc<ComponentClass>> {
    lookup_component(class_id)?
        .into_any()
        .downcast::<ComponentClass>()
        .ok()
}
