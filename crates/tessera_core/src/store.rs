//! Property schema and per-instance values store
//!
//! A [`PropertySchema`] is the static, per-class declaration of which
//! properties exist and what their defaults are. A [`ValueStore`] is the
//! per-instance materialization of that schema: one [`ValueHolder`] per
//! declared property, created once and never added to afterwards.
//!
//! Initial values resolve in this order:
//!
//! 1. an override supplied at construction (plain value or existing holder)
//! 2. the schema default
//! 3. [`PropValue::Undefined`]
//!
//! # Example
//!
//! ```rust
//! use tessera_core::store::{PropertySchema, ValueStore};
//! use tessera_core::value::PropValue;
//!
//! let schema = PropertySchema::new()
//!     .property("count", 0)
//!     .declare("label");
//!
//! let store = ValueStore::from_schema(&schema, Default::default());
//! assert_eq!(store.get("count").unwrap(), PropValue::Int(0));
//! assert!(store.get("label").unwrap().is_undefined());
//! assert!(store.get("missing").is_err());
//! ```

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::error::{CoreError, Result};
use crate::holder::{Adapt, ValueHolder};
use crate::value::PropValue;

/// Declaration of a single property
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDescriptor {
    /// Value used when construction supplies none
    pub default: Option<PropValue>,
}

/// Ordered mapping from property name to its descriptor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySchema {
    properties: IndexMap<String, PropertyDescriptor>,
}

impl PropertySchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property with a default value
    pub fn property(mut self, name: impl Into<String>, default: impl Into<PropValue>) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDescriptor {
                default: Some(default.into()),
            },
        );
        self
    }

    /// Declare a property without a default
    pub fn declare(mut self, name: impl Into<String>) -> Self {
        self.properties
            .insert(name.into(), PropertyDescriptor::default());
        self
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    /// Whether a property is declared
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Declared names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Overrides keyed by property name, consumed by [`ValueStore::from_schema`]
pub type Overrides = FxHashMap<String, Adapt<PropValue>>;

/// One observable cell per declared property
pub struct ValueStore {
    cells: IndexMap<String, ValueHolder<PropValue>>,
}

impl ValueStore {
    /// Build the store for a schema, consuming matching overrides
    ///
    /// Overrides for names the schema does not declare are ignored.
    pub fn from_schema(schema: &PropertySchema, mut overrides: Overrides) -> Self {
        let mut cells = IndexMap::with_capacity(schema.len());

        for (name, descriptor) in &schema.properties {
            let source = match overrides.remove(name) {
                Some(source) => source,
                None => Adapt::Value(descriptor.default.clone().unwrap_or_default()),
            };
            cells.insert(name.clone(), ValueHolder::adapt(source));
        }

        for name in overrides.keys() {
            tracing::debug!(property = %name, "ignoring override for undeclared property");
        }

        Self { cells }
    }

    /// The authoritative cell for a property
    pub fn holder(&self, name: &str) -> Result<&ValueHolder<PropValue>> {
        self.cells
            .get(name)
            .ok_or_else(|| CoreError::UnknownProperty(name.to_string()))
    }

    /// Get the current value of a property
    pub fn get(&self, name: &str) -> Result<PropValue> {
        self.holder(name).map(ValueHolder::get)
    }

    /// Set a property, notifying its subscribers
    pub fn set(&self, name: &str, value: impl Into<PropValue>) -> Result<()> {
        self.holder(name)?.set(value.into());
        Ok(())
    }

    /// Whether a property exists in this store
    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// Property names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl std::fmt::Debug for ValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.cells.iter().map(|(k, v)| (k, v.get())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn schema() -> PropertySchema {
        PropertySchema::new()
            .property("count", 0)
            .property("label", "hello")
            .declare("extra")
    }

    #[test]
    fn test_defaults() {
        let store = ValueStore::from_schema(&schema(), Overrides::default());

        assert_eq!(store.get("count").unwrap(), PropValue::Int(0));
        assert_eq!(store.get("label").unwrap(), PropValue::from("hello"));
        assert_eq!(store.get("extra").unwrap(), PropValue::Undefined);
    }

    #[test]
    fn test_overrides_win() {
        let mut overrides = Overrides::default();
        overrides.insert("count".into(), PropValue::from(9).into());
        overrides.insert("extra".into(), PropValue::Null.into());

        let store = ValueStore::from_schema(&schema(), overrides);
        assert_eq!(store.get("count").unwrap(), PropValue::Int(9));
        assert_eq!(store.get("extra").unwrap(), PropValue::Null);
        assert_eq!(store.get("label").unwrap(), PropValue::from("hello"));
    }

    #[test]
    fn test_holder_override_is_shared() {
        let shared = ValueHolder::new(PropValue::from(1));
        let mut overrides = Overrides::default();
        overrides.insert("count".into(), Adapt::Holder(shared.clone()));

        let store = ValueStore::from_schema(&schema(), overrides);
        assert!(store.holder("count").unwrap().ptr_eq(&shared));

        shared.set(PropValue::from(2));
        assert_eq!(store.get("count").unwrap(), PropValue::Int(2));
    }

    #[test]
    fn test_undeclared_override_ignored() {
        let mut overrides = Overrides::default();
        overrides.insert("nope".into(), PropValue::from(1).into());

        let store = ValueStore::from_schema(&schema(), overrides);
        assert!(!store.contains("nope"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_unknown_property_fails() {
        let store = ValueStore::from_schema(&schema(), Overrides::default());

        let err = store.get("missing").unwrap_err();
        assert!(matches!(err, CoreError::UnknownProperty(ref name) if name == "missing"));
        assert!(store.set("missing", 1).is_err());
    }

    #[test]
    fn test_set_notifies() {
        let store = ValueStore::from_schema(&schema(), Overrides::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();

        store
            .holder("count")
            .unwrap()
            .sub(move |value, _| seen_clone.borrow_mut().push(value.clone()));

        store.set("count", 5).unwrap();
        assert_eq!(*seen.borrow(), vec![PropValue::Int(5)]);
        assert_eq!(store.get("count").unwrap(), PropValue::Int(5));
    }

    #[test]
    fn test_declaration_order() {
        let store = ValueStore::from_schema(&schema(), Overrides::default());
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["count", "label", "extra"]);
    }
}
