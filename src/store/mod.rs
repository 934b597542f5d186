//! Reactive store: key/value state with change notification.
//!
//! The [`Store`] is an explicit object owned by a
//! [`Runtime`](crate::runtime::Runtime) — never a hidden module-level
//! singleton — so multiple stores can coexist in tests. Values are type-erased
//! [`Value`] handles; the write guard is shallow reference equality
//! (`Rc::ptr_eq`), so mutating through a shared handle and re-setting the
//! same handle is a no-op and will not notify.
//!
//! Writes coalesce per key on a tick queue; subscribers are notified once per
//! flush with each key's *current* value. The flush itself is driven by
//! [`Runtime::flush_tick`](crate::runtime::Runtime::flush_tick) because
//! subscriber callbacks re-enter the runtime (re-render, re-subscribe).

pub mod deps;
pub mod scope;

pub use deps::DepSet;
pub use scope::Scope;

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::Runtime;
use crate::scheduler::Coalescer;

/// Subscription key matching every state change.
pub const WILDCARD: &str = "*";

/// A type-erased, shared state value.
pub type Value = Rc<dyn Any>;

/// Wrap a plain value into a [`Value`] handle.
pub fn value<T: 'static>(v: T) -> Value {
    Rc::new(v)
}

/// A single state change delivered to subscribers.
#[derive(Clone)]
pub struct StateChange {
    /// The key that changed (compound `"component:key"` for scoped state).
    pub key: String,
    /// The key's value at notification time.
    pub value: Option<Value>,
}

impl StateChange {
    /// Downcast the carried value.
    pub fn value_as<T: 'static>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref::<T>()
    }
}

/// Change callback. Receives the runtime so it can re-render, re-subscribe,
/// or schedule further work. Identity-compared with `Rc::ptr_eq` on
/// unsubscribe.
pub type Subscriber = Rc<dyn Fn(&mut Runtime, &StateChange)>;

/// Process-wide key/value state with subscriber bookkeeping.
pub struct Store {
    values: HashMap<String, Value>,
    component_values: HashMap<String, HashMap<String, Value>>,
    subscribers: HashMap<String, Vec<Subscriber>>,
    pending: Coalescer<String, ()>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            component_values: HashMap::new(),
            subscribers: HashMap::new(),
            pending: Coalescer::new(),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current value for `key`, or `None` if never set.
    ///
    /// This read is untracked; dependency-collected reads go through
    /// [`Scope::get`].
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    /// Typed convenience read: downcast and clone the current value.
    pub fn get_cloned<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.values.get(key)?.downcast_ref::<T>().cloned()
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Set `key` to `new_value`.
    ///
    /// No-op when the new handle is reference-equal to the current one (the
    /// shallow guard — no deep comparison happens). Otherwise the key joins
    /// the pending set; subscribers hear about it on the next tick flush,
    /// once, with the final value.
    pub fn set(&mut self, key: impl Into<String>, new_value: Value) {
        let key = key.into();
        if let Some(current) = self.values.get(&key) {
            if Rc::ptr_eq(current, &new_value) {
                return;
            }
        }
        self.values.insert(key.clone(), new_value);
        self.pending.enqueue(key, ());
    }

    /// Wrap-and-set convenience for plain values.
    pub fn set_value<T: 'static>(&mut self, key: impl Into<String>, v: T) {
        self.set(key, Rc::new(v));
    }

    /// Set many keys in one call.
    pub fn set_many(&mut self, entries: impl IntoIterator<Item = (String, Value)>) {
        for (key, v) in entries {
            self.set(key, v);
        }
    }

    /// Drain the keys pending notification, in write order.
    pub(crate) fn take_pending(&mut self) -> Vec<String> {
        self.pending.drain().into_iter().map(|(key, ())| key).collect()
    }

    /// Whether a notification flush is pending.
    pub fn has_pending(&self) -> bool {
        self.pending.is_scheduled()
    }

    // ── Component-scoped state ───────────────────────────────────────

    /// Read component-scoped state under a `(component, key)` identity.
    pub fn component_state(&self, component: &str, key: &str) -> Option<Value> {
        self.component_values.get(component)?.get(key).cloned()
    }

    /// Typed component-scoped read.
    pub fn component_state_cloned<T: Clone + 'static>(&self, component: &str, key: &str) -> Option<T> {
        self.component_state(component, key)?.downcast_ref::<T>().cloned()
    }

    /// Write component-scoped state. Returns whether the value changed
    /// (same shallow guard as [`set`](Self::set)).
    ///
    /// Scoped writes notify synchronously, outside the tick batching — the
    /// caller ([`Runtime::set_component_state`](crate::runtime::Runtime::set_component_state))
    /// performs the notification.
    pub(crate) fn set_component_state(&mut self, component: &str, key: &str, new_value: Value) -> bool {
        let slot = self.component_values.entry(component.to_owned()).or_default();
        if let Some(current) = slot.get(key) {
            if Rc::ptr_eq(current, &new_value) {
                return false;
            }
        }
        slot.insert(key.to_owned(), new_value);
        true
    }

    // ── Subscriptions ────────────────────────────────────────────────

    /// Register `callback` under one key (or [`WILDCARD`] for all changes).
    pub fn subscribe(&mut self, key: impl Into<String>, callback: Subscriber) {
        self.subscribers.entry(key.into()).or_default().push(callback);
    }

    /// Register `callback` under each key in a list.
    ///
    /// A list containing [`WILDCARD`] collapses to a single wildcard
    /// registration.
    pub fn subscribe_many(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
        callback: Subscriber,
    ) {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.iter().any(|k| k == WILDCARD) {
            self.subscribe(WILDCARD, callback);
            return;
        }
        for key in keys {
            self.subscribe(key, callback.clone());
        }
    }

    /// Remove a previously registered callback from `key`.
    ///
    /// Identity comparison; removes the first match. No-op if the callback
    /// was never subscribed under that key.
    pub fn unsubscribe(&mut self, key: &str, callback: &Subscriber) {
        if let Some(list) = self.subscribers.get_mut(key) {
            if let Some(pos) = list.iter().position(|cb| Rc::ptr_eq(cb, callback)) {
                list.remove(pos);
            }
        }
    }

    /// Remove a previously registered callback from each key in a list.
    ///
    /// Mirrors [`subscribe_many`](Self::subscribe_many): a list containing
    /// [`WILDCARD`] collapses to a single wildcard removal.
    pub fn unsubscribe_many(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
        callback: &Subscriber,
    ) {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.iter().any(|k| k == WILDCARD) {
            self.unsubscribe(WILDCARD, callback);
            return;
        }
        for key in keys {
            self.unsubscribe(&key, callback);
        }
    }

    /// Number of callbacks registered under `key`.
    pub fn subscriber_count(&self, key: &str) -> usize {
        self.subscribers.get(key).map_or(0, Vec::len)
    }

    /// Snapshot of the callbacks registered under `key`, in registration
    /// order. Cloned so notification can run while the store is re-entered.
    pub(crate) fn subscribers_for(&self, key: &str) -> Vec<Subscriber> {
        self.subscribers.get(key).cloned().unwrap_or_default()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
