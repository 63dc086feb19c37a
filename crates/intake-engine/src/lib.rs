//! Concurrent aggregation and persistence engine for intake records.
//!
//! Three operations, each a single value-or-error call:
//!
//! - [`assemble`] — scatter-gather read: fetch every sub-entity group of one
//!   record concurrently and join the results into a [`RecordView`].
//! - [`decompose`] — replace-semantics write: validate a submission, ensure
//!   the root exists, and fan one write branch out per sub-entity group.
//! - [`enrich`] — resolve the foreign-key codes of a listing page, one
//!   concurrent task per row, preserving input order.
//!
//! All three join fail-fast: the first branch error cancels not-yet-started
//! sibling work (in-flight store calls are not forcibly aborted), the result
//! under construction is dropped, and the error crosses the API wrapped in
//! [`intake_core::Error::Aggregate`].
//!
//! [`RecordView`]: intake_core::view::RecordView

mod assemble;
mod decompose;
mod enrich;

pub use assemble::assemble;
pub use decompose::decompose;
pub use enrich::enrich;

#[cfg(test)]
mod tests;
