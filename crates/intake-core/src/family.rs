//! Family background and the sibling-support junction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Household situation block. At most one row per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyBackground {
  pub family_background_id:       Uuid,
  pub record_id:                  Uuid,
  pub guardian_name:              String,
  pub guardian_relationship_code: Option<String>,
  pub father_alive:               bool,
  pub mother_alive:               bool,
  pub sibling_count:              i32,
  pub household_notes:            Option<String>,
  pub created_at:                 DateTime<Utc>,
  pub updated_at:                 DateTime<Utc>,
}

/// Junction row: this family receives the given kind of sibling support.
/// The pair is the whole payload; the set is replaced wholesale on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingSupport {
  pub family_background_id: Uuid,
  pub support_code:         String,
}
