//! Typed request-scoped context.
//!
//! Passed explicitly through the engine call chain instead of stashing
//! dynamically-typed values in an ambient map. The deadline is checked
//! between sequential store round trips; once it has elapsed, branches stop
//! issuing new work. In-flight calls are not forcibly aborted.

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::{Error, Result};

/// Identity and deadline for one aggregate operation.
#[derive(Debug, Clone)]
pub struct RequestContext {
  pub request_id: Uuid,
  /// Authenticated principal, when the caller has one. Informational only;
  /// authorisation happens upstream.
  pub actor:      Option<String>,
  deadline:       Option<Instant>,
}

impl RequestContext {
  pub fn new() -> Self {
    Self { request_id: Uuid::new_v4(), actor: None, deadline: None }
  }

  pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
    self.actor = Some(actor.into());
    self
  }

  /// Give the operation at most `budget` from now.
  pub fn with_deadline(mut self, budget: Duration) -> Self {
    self.deadline = Some(Instant::now() + budget);
    self
  }

  /// Error with [`Error::DeadlineExceeded`] if the deadline has elapsed.
  pub fn ensure_active(&self) -> Result<()> {
    match self.deadline {
      Some(deadline) if Instant::now() >= deadline => {
        Err(Error::DeadlineExceeded)
      }
      _ => Ok(()),
    }
  }
}

impl Default for RequestContext {
  fn default() -> Self { Self::new() }
}
