//! Health sub-entities: the health record, counselling consultations, and
//! test results.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Medical overview block. At most one row per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
  pub health_record_id:   Uuid,
  pub record_id:          Uuid,
  pub blood_type_code:    Option<String>,
  pub allergies:          Option<String>,
  pub chronic_conditions: Option<String>,
  pub physician:          Option<String>,
  pub notes:              Option<String>,
  pub created_at:         DateTime<Utc>,
  pub updated_at:         DateTime<Utc>,
}

/// One counselling session held with the student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
  pub consultation_id: Uuid,
  pub record_id:       Uuid,
  pub held_on:         NaiveDate,
  pub counselor:       String,
  pub topic:           Option<String>,
  pub summary:         Option<String>,
}

/// One aptitude or placement test outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
  pub test_result_id: Uuid,
  pub record_id:      Uuid,
  pub test_name:      String,
  pub taken_on:       Option<NaiveDate>,
  pub score:          i32,
  pub max_score:      i32,
}
