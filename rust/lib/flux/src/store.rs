use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::trie::Trie;
use crate::value::{State, StateValue, SubscriptionId};

/// Callback invoked with the changed path and its new value.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

#[derive(Clone)]
struct Watcher {
    id: SubscriptionId,
    handler: ChangeHandler,
}

/// Path-keyed state with pattern subscriptions.
///
/// Every write notifies the watchers whose pattern matches the written path,
/// synchronously and after the value is visible to `get`. `remove` is silent.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    watchers: Trie<Watcher>,
    next_id: AtomicU64,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            watchers: Trie::new(),
            next_id: AtomicU64::new(1),
        }
    }

    // ====================================================================
    // Untyped access
    // ====================================================================

    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap()
            .insert(path.to_string(), value.clone());
        self.notify(path, &value);
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values.read().unwrap().get(path).cloned()
    }

    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values.write().unwrap().remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.read().unwrap().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entry whose path starts with `prefix`, in path order.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.values
            .read()
            .unwrap()
            .range(prefix.to_string()..)
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(path, value)| (path.clone(), value.clone()))
            .collect()
    }

    // ====================================================================
    // Typed access
    // ====================================================================

    /// Clone of the `S` stored at `S::PATH`, if any.
    pub fn read<S: State>(&self) -> Option<S> {
        self.get(S::PATH)
            .and_then(|v| v.downcast_ref::<S>().cloned())
    }

    /// Replace the `S` at `S::PATH`.
    pub fn write<S: State>(&self, state: S) {
        self.set(S::PATH, state);
    }

    /// Read-modify-write of the `S` at `S::PATH` under one write lock.
    ///
    /// A missing (or differently typed) value starts from `S::default()`.
    /// Watchers are notified after the lock is released, even if `f` left
    /// the state unchanged.
    pub fn update<S, R>(&self, f: impl FnOnce(&mut S) -> R) -> R
    where
        S: State + Default,
    {
        let (value, out) = {
            let mut values = self.values.write().unwrap();
            let mut state = values
                .get(S::PATH)
                .and_then(|v| v.downcast_ref::<S>().cloned())
                .unwrap_or_default();
            let out = f(&mut state);
            let value = StateValue::new(state);
            values.insert(S::PATH.to_string(), value.clone());
            (value, out)
        };
        self.notify(S::PATH, &value);
        out
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Watch every path matching `pattern` (`+` and `#` wildcards allowed).
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.watchers.insert(
            pattern,
            Watcher {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    /// Returns false if nothing was registered under `pattern` with `id`.
    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.watchers.remove(pattern, |w| w.id == id) > 0
    }

    fn notify(&self, path: &str, value: &StateValue) {
        for watcher in self.watchers.matches(path) {
            (watcher.handler)(path, value);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
