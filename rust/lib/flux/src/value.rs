use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased, reference-counted state value.
///
/// Cloning only bumps the refcount, so every reader of a path shares the
/// same allocation.
#[derive(Clone)]
pub struct StateValue(Arc<dyn Any + Send + Sync>);

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the value as `T`, or `None` if it holds another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    /// Number of live handles to the underlying value.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("refs", &self.ref_count())
            .finish()
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// A state type that lives at one well-known path.
///
/// ```ignore
/// #[derive(Clone, Default)]
/// struct Counter(u32);
///
/// impl State for Counter {
///     const PATH: &'static str = "demo/counter";
/// }
/// ```
pub trait State: Any + Clone + Send + Sync {
    const PATH: &'static str;
}

/// A request payload routed to the handler registered for its path.
pub trait Request: Any + Send + Sync {
    const PATH: &'static str;
}
