//! Core types and trait definitions for the intake record store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod context;
pub mod education;
pub mod error;
pub mod family;
pub mod finance;
pub mod health;
pub mod lookup;
pub mod notes;
pub mod person;
pub mod record;
pub mod store;
pub mod submission;
pub mod view;

pub use error::{Error, Result};
