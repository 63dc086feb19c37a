//! Code → display-entity resolution.
//!
//! Sub-entities store short codes (`gender_code`, `course_code`, ...); the
//! read path resolves each code to its [`Lookup`] display entity through the
//! [`LookupResolver`] seam. Lookup table maintenance is out of scope.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::Result;

/// The lookup namespaces used across the record graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupDomain {
  Gender,
  Religion,
  Relationship,
  AdmissionType,
  Course,
  BloodType,
  SupportType,
  AddressKind,
  SchoolKind,
  ActivityKind,
  NoteCategory,
  TuitionPayer,
}

impl LookupDomain {
  /// The `domain` column value in the lookup table.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Gender => "gender",
      Self::Religion => "religion",
      Self::Relationship => "relationship",
      Self::AdmissionType => "admission_type",
      Self::Course => "course",
      Self::BloodType => "blood_type",
      Self::SupportType => "support_type",
      Self::AddressKind => "address_kind",
      Self::SchoolKind => "school_kind",
      Self::ActivityKind => "activity_kind",
      Self::NoteCategory => "note_category",
      Self::TuitionPayer => "tuition_payer",
    }
  }
}

/// A resolved lookup row: the code as stored plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
  pub domain: LookupDomain,
  pub code:   String,
  pub label:  String,
}

/// Resolves a `(domain, code)` pair to its display entity.
///
/// A code with no backing row is an error, not a silent `None` — a stored
/// code that cannot be displayed means the data and the lookup table have
/// diverged, and the whole read fails fast.
pub trait LookupResolver: Send + Sync {
  fn resolve<'a>(
    &'a self,
    domain: LookupDomain,
    code: &'a str,
  ) -> impl Future<Output = Result<Lookup>> + Send + 'a;
}

/// Resolve `code` if present; `None` codes skip resolution entirely.
pub async fn resolve_optional<R: LookupResolver>(
  resolver: &R,
  domain: LookupDomain,
  code: Option<&str>,
) -> Result<Option<Lookup>> {
  match code {
    Some(code) => Ok(Some(resolver.resolve(domain, code).await?)),
    None => Ok(None),
  }
}
