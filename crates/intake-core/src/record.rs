//! The root intake record — the join point for every sub-entity.
//!
//! A record holds only identity and workflow metadata. Everything the
//! interview captured lives in the sub-entity tables keyed on `record_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow state of a record. New roots are created [`RecordStatus::Draft`];
/// finalisation is driven by out-of-scope review tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
  Draft,
  Finalized,
}

/// One row per subject. Exactly one record exists per student; it is never
/// logically deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRecord {
  pub record_id:      Uuid,
  pub student_number: String,
  pub status:         RecordStatus,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// One row of a record listing page, before enrichment. Carries the raw
/// lookup codes the enricher resolves to display labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
  pub record_id:      Uuid,
  pub student_number: String,
  pub full_name:      Option<String>,
  pub gender_code:    Option<String>,
  pub course_code:    Option<String>,
  pub status:         RecordStatus,
  pub updated_at:     DateTime<Utc>,
}
