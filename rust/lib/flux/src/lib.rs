//! Flux: path-addressed UI state engine.
//!
//! Rust owns the view state and the logic that changes it; a front end only
//! renders what it reads and sends requests.
//!
//! # Primitives
//!
//! - `read::<S>()` / `get(path)`: read state (Arc clone, no data copy)
//! - `request(req)` / `emit(path, payload)`: route a request to its handlers
//! - `watch::<S>(f)` / `subscribe(pattern, f)`: observe state changes
//!
//! # Paths
//!
//! State and requests share one `/`-separated namespace, e.g.
//! `form/state`, `inventory/mirror`, `inventory/delete/confirm`.
//! Subscriptions and handlers accept MQTT-style wildcards: `+` for one
//! level, `#` for all remaining levels.

pub mod app;
pub mod router;
pub mod store;
pub mod trie;
pub mod value;

pub use app::Flux;
pub use router::{BoxFuture, Payload, Router};
pub use store::{ChangeHandler, StateStore};
pub use value::{Request, State, StateValue, SubscriptionId};
