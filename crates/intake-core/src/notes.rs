//! Significant notes — dated free-text observations attached to a record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificantNote {
  pub significant_note_id: Uuid,
  pub record_id:           Uuid,
  pub noted_on:            NaiveDate,
  pub category_code:       Option<String>,
  pub body:                String,
}
