//! SQLite backend for the intake record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. The backend implements
//! [`intake_core::store::RecordStore`] and
//! [`intake_core::lookup::LookupResolver`]; every public method is one
//! independent round trip built on the two generic primitives in
//! [`primitives`] (keyed upsert, replace-set).

mod encode;
mod mapping;
mod primitives;
mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;
