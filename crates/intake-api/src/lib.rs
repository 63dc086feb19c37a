//! JSON REST API for the intake record engine.
//!
//! Exposes an axum [`Router`] backed by any store implementing both
//! [`RecordStore`](intake_core::store::RecordStore) and
//! [`LookupResolver`](intake_core::lookup::LookupResolver). Auth, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", intake_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod records;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use intake_core::{lookup::LookupResolver, store::RecordStore};
use serde::Deserialize;

pub use error::ApiError;

/// Per-request time budget threaded into the engine as the context deadline.
pub(crate) const REQUEST_BUDGET: Duration = Duration::from_secs(30);

/// Server configuration, deserialised from `config.toml` and `INTAKE_*`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Path to the SQLite database file.
  pub store_path: PathBuf,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + LookupResolver + 'static,
{
  Router::new()
    .route(
      "/records",
      get(records::list::<S>).post(records::create::<S>),
    )
    .route(
      "/records/{id}",
      get(records::get_one::<S>).put(records::update::<S>),
    )
    .with_state(store)
}
