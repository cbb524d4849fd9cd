use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::store::StateStore;
use crate::trie::Trie;

/// A boxed, `Send`-able future returned by request handlers.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Maps request path patterns to async handlers.
///
/// Handlers own their arguments so their futures are `'static`; a dispatch
/// runs every matching handler one after another. Two dispatches on the same
/// router may interleave at await points.
pub struct Router {
    routes: Trie<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Trie::new(),
        }
    }

    /// Register `handler` for `pattern` (`+` and `#` wildcards allowed).
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let erased: ErasedHandler = Arc::new(move |path, payload, store| -> BoxFuture {
            Box::pin(handler(path, payload, store))
        });
        self.routes.insert(pattern, erased);
    }

    /// Run every handler matching `path`. Returns how many ran.
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) -> usize {
        let handlers = self.routes.matches(path);
        if handlers.is_empty() {
            debug!(path, "no handler registered for request");
            return 0;
        }
        for handler in &handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
        handlers.len()
    }

    pub fn matches(&self, path: &str) -> bool {
        !self.routes.matches(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn store() -> Arc<StateStore> {
        Arc::new(StateStore::new())
    }

    #[tokio::test]
    async fn dispatch_runs_matching_handler() {
        let router = Router::new();
        router.on("form/submit", |path, _, store: Arc<StateStore>| async move {
            store.set("last", path);
        });

        let store = store();
        let ran = router.dispatch("form/submit", Arc::new(()), store.clone()).await;

        assert_eq!(ran, 1);
        let last = store.get("last").unwrap();
        assert_eq!(last.downcast_ref::<String>().unwrap(), "form/submit");
    }

    #[tokio::test]
    async fn dispatch_without_match_runs_nothing() {
        let router = Router::new();
        router.on("form/submit", |_, _, _| async {});

        assert_eq!(router.dispatch("form/reset", Arc::new(()), store()).await, 0);
        assert!(!router.matches("form/reset"));
        assert!(router.matches("form/submit"));
    }

    #[tokio::test]
    async fn wildcard_and_exact_handlers_run_in_sequence() {
        let router = Router::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = order.clone();
        router.on("inventory/#", move |_, _, _| {
            let o = o.clone();
            async move { o.lock().unwrap().push("audit") }
        });
        let o = order.clone();
        router.on("inventory/delete/confirm", move |_, _, _| {
            let o = o.clone();
            async move { o.lock().unwrap().push("delete") }
        });

        let ran = router
            .dispatch("inventory/delete/confirm", Arc::new(()), store())
            .await;

        assert_eq!(ran, 2);
        assert_eq!(order.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn payload_reaches_handler() {
        struct Rename(String);

        let router = Router::new();
        router.on("rename", |_, payload: Payload, store: Arc<StateStore>| async move {
            if let Some(req) = payload.downcast_ref::<Rename>() {
                store.set("name", req.0.clone());
            }
        });

        let store = store();
        router
            .dispatch("rename", Arc::new(Rename("Widget".into())), store.clone())
            .await;

        let name = store.get("name").unwrap();
        assert_eq!(name.downcast_ref::<String>().unwrap(), "Widget");
    }
}
