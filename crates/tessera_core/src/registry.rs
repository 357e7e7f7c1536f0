//! Process-wide class registry
//!
//! Code that cannot reach a component class through ordinary crate linkage
//! (plugins loaded through a narrow interface, isolated service contexts)
//! looks classes up here by their class-intrinsic identifier.
//!
//! The registry starts empty, is append-only and never torn down. Inserting
//! under an identifier that is already taken is a silent no-op: the first
//! writer wins, because one logical class may legitimately be registered
//! from two load paths.
//!
//! # Example
//!
//! ```rust
//! use tessera_core::registry;
//!
//! assert!(registry::register("docs.Example", 7u32));
//! assert!(!registry::register("docs.Example", 8u32));
//! assert_eq!(registry::lookup::<u32>("docs.Example"), Some(7));
//! ```

use rustc_hash::FxHashMap;
use std::any::Any;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

type Entry = Arc<dyn Any + Send + Sync>;

/// Global registry of classes by identifier
static CLASS_REGISTRY: LazyLock<Mutex<FxHashMap<String, Entry>>> =
    LazyLock::new(|| Mutex::new(FxHashMap::default()));

fn registry() -> MutexGuard<'static, FxHashMap<String, Entry>> {
    // Entries are only ever inserted whole, so a poisoned map is still consistent
    CLASS_REGISTRY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register an entry under `id` unless one already exists
///
/// Returns `true` if this call inserted the entry.
pub fn register<T: Send + Sync + 'static>(id: &str, entry: T) -> bool {
    let mut registry = registry();
    if registry.contains_key(id) {
        tracing::trace!(id, "class already registered");
        return false;
    }
    registry.insert(id.to_string(), Arc::new(entry));
    true
}

/// Look up an entry by `id`, returning a clone if it has type `T`
pub fn lookup<T: Clone + 'static>(id: &str) -> Option<T> {
    registry()
        .get(id)
        .and_then(|entry| entry.downcast_ref::<T>().cloned())
}

/// Whether anything is registered under `id`
pub fn is_registered(id: &str) -> bool {
    registry().contains_key(id)
}

/// All registered identifiers, sorted
pub fn registered_ids() -> Vec<String> {
    let mut ids: Vec<String> = registry().keys().cloned().collect();
    ids.sort();
    ids
}
