//! Observable value cells
//!
//! A [`ValueHolder`] wraps one current value and an ordered list of
//! subscribers. It is the unit of reactivity behind every component property:
//!
//! - `get` reads without side effects
//! - `set` replaces the value and synchronously notifies every subscriber,
//!   in registration order, with the new value and a [`ChangeMeta`]
//! - `sub` registers a subscriber without invoking it
//!
//! Handles are cheap to clone and all clones refer to the same cell.
//! [`ValueHolder::adapt`] turns either a plain value or an existing holder
//! into the authoritative cell for a property without ever wrapping a holder
//! in a second holder.
//!
//! # Reentrancy
//!
//! The subscriber list and the value are snapshotted before notification, so
//! a subscriber may call `set` on the same cell. The nested `set` runs to
//! completion immediately (most recent set wins) and notifications interleave
//! in call order: subscribers that come after the one that re-entered still
//! see the outer value once the nested round finishes.
//!
//! ```rust
//! use tessera_core::holder::ValueHolder;
//!
//! let count = ValueHolder::new(0);
//! count.sub(|value, meta| println!("count = {} (v{})", value, meta.version));
//! count.set(5);
//! assert_eq!(count.get(), 5);
//! ```

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::value::PropValue;

/// Callback invoked on every `set`
pub type Subscriber<T> = Rc<dyn Fn(&T, &ChangeMeta)>;

/// Identifies one subscription on one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identifies a component instance in change metadata
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocate a fresh, process-unique id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        InstanceId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

/// Metadata delivered alongside each change notification
///
/// Plain `set` calls only fill in `version`. Component construction wires its
/// change listeners through [`ValueHolder::sub`] and adds `instance` before
/// forwarding, so a listener shared between instances can tell them apart.
/// An empty (default) value is what the ready API's replay delivers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeMeta {
    /// Version of the cell after the change (0 = not produced by a `set`)
    pub version: u64,
    /// Instance that owns the cell, when known
    pub instance: Option<InstanceId>,
}

impl ChangeMeta {
    /// Copy of this metadata tagged with an owning instance
    pub fn with_instance(mut self, instance: InstanceId) -> Self {
        self.instance = Some(instance);
        self
    }
}

struct HolderInner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    next_subscription: Cell<u64>,
    subscribers: RefCell<SmallVec<[(SubscriptionId, Subscriber<T>); 4]>>,
}

/// An observable cell
pub struct ValueHolder<T> {
    inner: Rc<HolderInner<T>>,
}

impl<T> Clone for ValueHolder<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> ValueHolder<T> {
    /// Create a cell holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(HolderInner {
                value: RefCell::new(initial),
                version: Cell::new(0),
                next_subscription: Cell::new(0),
                subscribers: RefCell::new(SmallVec::new()),
            }),
        }
    }

    /// Produce the authoritative cell for a source
    ///
    /// A plain value becomes the initial value of a new cell. An existing
    /// holder is returned as-is, so both sides keep observing one cell.
    pub fn adapt(source: impl Into<Adapt<T>>) -> Self {
        match source.into() {
            Adapt::Value(value) => Self::new(value),
            Adapt::Holder(holder) => holder,
        }
    }

    /// Whether two handles refer to the same cell
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Read the current value through a closure without cloning
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Number of `set` calls applied so far
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Register a subscriber
    ///
    /// The subscriber is not invoked here; callers that need the current
    /// value must read it explicitly.
    pub fn sub<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T, &ChangeMeta) + 'static,
    {
        self.sub_rc(Rc::new(callback))
    }

    /// Register an already shared subscriber
    pub fn sub_rc(&self, callback: Subscriber<T>) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.get());
        self.inner.next_subscription.set(id.0 + 1);
        self.inner.subscribers.borrow_mut().push((id, callback));
        id
    }

    /// Remove a subscriber, returning whether it was registered
    pub fn unsub(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

impl<T: Clone> ValueHolder<T> {
    /// Get the current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Replace the value and notify all subscribers
    ///
    /// Setting the value it already holds still notifies.
    pub fn set(&self, value: T) {
        self.set_with_meta(value, ChangeMeta::default());
    }

    /// Replace the value and notify, delivering caller-supplied metadata
    ///
    /// `meta.version` is overwritten with the cell's new version.
    pub fn set_with_meta(&self, value: T, mut meta: ChangeMeta) {
        let snapshot = value.clone();
        *self.inner.value.borrow_mut() = value;

        let version = self.inner.version.get() + 1;
        self.inner.version.set(version);
        meta.version = version;

        // Snapshot so subscribers may (un)subscribe or set while we iterate
        let subscribers: SmallVec<[Subscriber<T>; 4]> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        tracing::trace!(version, subscribers = subscribers.len(), "cell changed");

        for callback in subscribers {
            callback(&snapshot, &meta);
        }
    }

    /// Update the value using a function
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let current = self.get();
        self.set(f(current));
    }
}

impl<T: Default> Default for ValueHolder<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueHolder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueHolder")
            .field("value", &*self.inner.value.borrow())
            .field("version", &self.inner.version.get())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

/// Input accepted by [`ValueHolder::adapt`]
pub enum Adapt<T> {
    /// A plain value, wrapped as the initial value of a new cell
    Value(T),
    /// An already reactive source, used as the cell itself
    Holder(ValueHolder<T>),
}

impl<T> From<ValueHolder<T>> for Adapt<T> {
    fn from(holder: ValueHolder<T>) -> Self {
        Adapt::Holder(holder)
    }
}

impl<T> From<&ValueHolder<T>> for Adapt<T> {
    fn from(holder: &ValueHolder<T>) -> Self {
        Adapt::Holder(holder.clone())
    }
}

impl From<PropValue> for Adapt<PropValue> {
    fn from(value: PropValue) -> Self {
        Adapt::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Adapt<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adapt::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Adapt::Holder(holder) => f.debug_tuple("Holder").field(holder).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let cell = ValueHolder::new(0i32);
        assert_eq!(cell.get(), 0);

        cell.set(42);
        assert_eq!(cell.get(), 42);
        assert_eq!(cell.version(), 1);
    }

    #[test]
    fn test_sub_does_not_invoke() {
        let cell = ValueHolder::new(1i32);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();

        cell.sub(move |_, _| calls_clone.set(calls_clone.get() + 1));
        assert_eq!(calls.get(), 0);

        cell.set(2);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_notification_order() {
        let cell = ValueHolder::new(0i32);
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["a", "b", "c"] {
            let log = log.clone();
            cell.sub(move |value, _| log.borrow_mut().push((name, *value)));
        }

        cell.set(7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7), ("c", 7)]);
    }

    #[test]
    fn test_same_value_still_notifies() {
        let cell = ValueHolder::new(3i32);
        let versions = Rc::new(RefCell::new(Vec::new()));
        let versions_clone = versions.clone();

        cell.sub(move |_, meta| versions_clone.borrow_mut().push(meta.version));
        cell.set(3);
        cell.set(3);

        assert_eq!(*versions.borrow(), vec![1, 2]);
        assert_eq!(cell.get(), 3);
    }

    #[test]
    fn test_plain_set_has_no_instance() {
        let cell = ValueHolder::new(0i32);
        let seen = Rc::new(Cell::new(None));
        let seen_clone = seen.clone();

        cell.sub(move |_, meta| seen_clone.set(Some(*meta)));
        cell.set(1);

        let meta = seen.get().unwrap();
        assert_eq!(meta.instance, None);
        assert_eq!(meta.version, 1);
    }

    #[test]
    fn test_unsub() {
        let cell = ValueHolder::new(0i32);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();

        let id = cell.sub(move |_, _| calls_clone.set(calls_clone.get() + 1));
        cell.set(1);
        assert!(cell.unsub(id));
        assert!(!cell.unsub(id));
        cell.set(2);

        assert_eq!(calls.get(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_adapt_value_creates_cell() {
        let cell = ValueHolder::adapt(PropValue::from(5));
        assert_eq!(cell.get(), PropValue::Int(5));
    }

    #[test]
    fn test_adapt_holder_is_not_rewrapped() {
        let source = ValueHolder::new(PropValue::from("a"));
        let adapted = ValueHolder::adapt(&source);
        assert!(adapted.ptr_eq(&source));

        adapted.set(PropValue::from("b"));
        assert_eq!(source.get(), PropValue::from("b"));

        let twice = ValueHolder::adapt(adapted.clone());
        assert!(twice.ptr_eq(&source));
    }

    #[test]
    fn test_reentrant_set() {
        let cell = ValueHolder::new(0i32);
        let log = Rc::new(RefCell::new(Vec::new()));

        {
            let cell_clone = cell.clone();
            let log = log.clone();
            cell.sub(move |value, _| {
                log.borrow_mut().push(("first", *value));
                if *value == 1 {
                    cell_clone.set(2);
                }
            });
        }
        {
            let log = log.clone();
            cell.sub(move |value, _| log.borrow_mut().push(("second", *value)));
        }

        cell.set(1);

        // Most recent set wins; the nested round completes before the outer one resumes
        assert_eq!(cell.get(), 2);
        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("first", 2), ("second", 2), ("second", 1)]
        );
    }

    #[test]
    fn test_subscriber_added_during_notify_waits_for_next_set() {
        let cell = ValueHolder::new(0i32);
        let late_calls = Rc::new(Cell::new(0));

        {
            let cell_clone = cell.clone();
            let late_calls = late_calls.clone();
            let added = Cell::new(false);
            cell.sub(move |_, _| {
                if !added.replace(true) {
                    let late_calls = late_calls.clone();
                    cell_clone.sub(move |_, _| late_calls.set(late_calls.get() + 1));
                }
            });
        }

        cell.set(1);
        assert_eq!(late_calls.get(), 0);
        cell.set(2);
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn test_update() {
        let cell = ValueHolder::new(10i32);
        cell.update(|x| x + 5);
        assert_eq!(cell.get(), 15);
    }

    #[test]
    fn test_instance_ids_are_unique() {
        let a = InstanceId::next();
        let b = InstanceId::next();
        assert_ne!(a, b);
        assert_eq!(ChangeMeta::default().with_instance(a).instance, Some(a));
    }
}
