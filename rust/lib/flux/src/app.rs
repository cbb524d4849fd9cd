use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{Request, State, StateValue, SubscriptionId};

/// State store plus request router behind one handle.
///
/// ```ignore
/// let flux = Flux::new();
/// flux.handle(|req: Arc<SetFilter>, store: Arc<StateStore>| async move {
///     store.write(FilterText(req.text.clone()));
/// });
/// flux.request(SetFilter { text: "wid".into() }).await;
/// assert_eq!(flux.read::<FilterText>().unwrap().0, "wid");
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    // ====================================================================
    // State
    // ====================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    pub fn read<S: State>(&self) -> Option<S> {
        self.store.read::<S>()
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Dispatch `payload` to the handlers matching `path` and wait for them.
    /// Returns how many handlers ran.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) -> usize {
        self.router
            .dispatch(path, Arc::new(payload), Arc::clone(&self.store))
            .await
    }

    /// Dispatch a typed request to `R::PATH`.
    pub async fn request<R: Request>(&self, req: R) -> usize {
        self.emit(R::PATH, req).await
    }

    /// Register an untyped handler for a path pattern.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    /// Register the handler for `R::PATH`; the payload arrives already
    /// downcast. A payload of another type at that path is logged and
    /// dropped.
    pub fn handle<R, F, Fut>(&self, handler: F)
    where
        R: Request,
        F: Fn(Arc<R>, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(R::PATH, move |path, payload: Payload, store| {
            let call = payload.downcast::<R>().ok().map(|req| handler(req, store));
            async move {
                match call {
                    Some(call) => call.await,
                    None => warn!(%path, "request payload has an unexpected type"),
                }
            }
        });
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    /// Typed subscription to `S::PATH`.
    pub fn watch<S, F>(&self, handler: F) -> SubscriptionId
    where
        S: State,
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.store.subscribe(S::PATH, move |_, value| {
            if let Some(state) = value.downcast_ref::<S>() {
                handler(state);
            }
        })
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.store.unsubscribe(pattern, id)
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
