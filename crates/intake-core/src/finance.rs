//! Finance sub-entities: the finance record and its support junction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Household finance block. At most one row per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceRecord {
  pub finance_record_id:  Uuid,
  pub record_id:          Uuid,
  pub tuition_payer_code: Option<String>,
  /// Monthly allowance in the smallest currency unit.
  pub monthly_allowance:  Option<i64>,
  pub scholarship:        Option<String>,
  pub part_time_job:      bool,
  pub created_at:         DateTime<Utc>,
  pub updated_at:         DateTime<Utc>,
}

/// Junction row: this household receives the given kind of financial
/// support. Replaced wholesale on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSupport {
  pub finance_record_id: Uuid,
  pub support_code:      String,
}
