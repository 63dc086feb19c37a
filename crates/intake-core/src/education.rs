//! Education history, activities, and preference sub-entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Educational background (1:1) ────────────────────────────────────────────

/// Prior schooling summary. At most one row per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationalBackground {
  pub educational_background_id: Uuid,
  pub record_id:                 Uuid,
  pub previous_school:           String,
  pub graduated_on:              Option<NaiveDate>,
  pub admission_type_code:       Option<String>,
  pub course_code:               Option<String>,
  pub notes:                     Option<String>,
  pub created_at:                DateTime<Utc>,
  pub updated_at:                DateTime<Utc>,
}

// ─── 1:N children ────────────────────────────────────────────────────────────

/// One school previously attended, with entry/exit dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolDetail {
  pub school_detail_id: Uuid,
  pub record_id:        Uuid,
  pub school_name:      String,
  pub kind_code:        String,
  pub entered_on:       Option<NaiveDate>,
  pub left_on:          Option<NaiveDate>,
  pub notes:            Option<String>,
}

/// A club, sport, or other extracurricular activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
  pub activity_id: Uuid,
  pub record_id:   Uuid,
  pub name:        String,
  pub kind_code:   Option<String>,
  pub role:        Option<String>,
  pub joined_on:   Option<NaiveDate>,
}

/// A liked or disliked school subject, with the interviewee's reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectPreference {
  pub subject_preference_id: Uuid,
  pub record_id:             Uuid,
  pub subject:               String,
  pub liked:                 bool,
  pub reason:                Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hobby {
  pub hobby_id:  Uuid,
  pub record_id: Uuid,
  pub name:      String,
  pub notes:     Option<String>,
}
