//! Tessera Core Runtime
//!
//! This crate provides the foundational primitives for Tessera components:
//!
//! - **Value holders**: observable cells with ordered, synchronous subscribers
//! - **Property stores**: one cell per declared property, seeded from a schema
//! - **Class registry**: process-wide, write-once lookup of classes by id
//!
//! # Example
//!
//! ```rust
//! use tessera_core::holder::ValueHolder;
//! use tessera_core::store::{PropertySchema, ValueStore};
//!
//! let schema = PropertySchema::new().property("count", 0);
//! let store = ValueStore::from_schema(&schema, Default::default());
//!
//! let seen = std::rc::Rc::new(std::cell::Cell::new(0));
//! let seen_clone = seen.clone();
//! store.holder("count").unwrap().sub(move |value, _| {
//!     seen_clone.set(value.as_i64().unwrap_or_default());
//! });
//!
//! store.set("count", 5).unwrap();
//! assert_eq!(seen.get(), 5);
//! ```

pub mod error;
pub mod holder;
pub mod registry;
pub mod store;
pub mod value;

pub use error::{CoreError, Result};
pub use holder::{Adapt, ChangeMeta, InstanceId, Subscriber, SubscriptionId, ValueHolder};
pub use store::{Overrides, PropertyDescriptor, PropertySchema, ValueStore};
pub use value::PropValue;
