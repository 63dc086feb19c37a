//! Error taxonomy for the intake subsystem.
//!
//! Every layer speaks this one enum. Storage backends classify their driver
//! errors into it; the aggregation engine wraps the first branch failure in
//! [`Error::Aggregate`] and discards the rest.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A root record, required sub-entity, or lookup row does not exist.
  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: String },

  /// The submission failed validation. Raised before any write is issued.
  #[error("invalid submission: {0}")]
  Validation(String),

  /// A foreign-key constraint rejected the write.
  #[error("referential integrity violation on {table}: {detail}")]
  Referential { table: &'static str, detail: String },

  /// Driver or transport failure. Any transaction involved was rolled back.
  #[error("storage failure: {0}")]
  Storage(String),

  /// A replace-set deleted the old collection but could not restore it after
  /// an insert failure. The collection may be left empty.
  #[error("partial write on {table}: {detail}")]
  PartialWrite { table: &'static str, detail: String },

  /// First error observed at a parallel join. Sibling errors are discarded.
  #[error("{operation} failed: {source}")]
  Aggregate {
    operation: &'static str,
    #[source]
    source:    Box<Error>,
  },

  /// The request-scoped deadline elapsed before the next store round trip.
  #[error("request deadline exceeded")]
  DeadlineExceeded,
}

impl Error {
  pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
    Self::NotFound { entity, id: id.to_string() }
  }

  pub fn lookup_not_found(domain: &'static str, code: &str) -> Self {
    Self::NotFound { entity: domain, id: code.to_owned() }
  }

  /// Wrap a join failure, tagging the aggregate operation that observed it.
  pub fn aggregate(operation: &'static str, source: Error) -> Self {
    Self::Aggregate { operation, source: Box::new(source) }
  }

  /// Unwrap [`Error::Aggregate`] nesting down to the underlying failure.
  pub fn root_cause(&self) -> &Error {
    match self {
      Self::Aggregate { source, .. } => source.root_cause(),
      other => other,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
