//! Submission types — the write-side input to the decomposition engine.
//!
//! Submissions carry payloads only. Row ids and timestamps are assigned by
//! the engine and the store; on upsert collisions the store preserves the
//! original id and `created_at`. A field that is `None` at the block level
//! means "no update for that entity"; an empty `Vec` means "clear the
//! persisted collection".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Sub-entity payloads ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPersonalInfo {
  pub family_name:   String,
  pub given_name:    String,
  pub kana:          Option<String>,
  pub birth_date:    NaiveDate,
  pub gender_code:   Option<String>,
  pub religion_code: Option<String>,
  pub nationality:   Option<String>,
  pub phone:         Option<String>,
  pub email:         Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAddress {
  pub kind_code:   String,
  pub line1:       String,
  pub line2:       Option<String>,
  pub city:        String,
  pub region:      Option<String>,
  pub postal_code: Option<String>,
  pub country:     Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmergencyContact {
  pub name:              String,
  pub relationship_code: String,
  pub phone:             String,
  pub address:           Option<NewAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelatedPerson {
  pub name:              String,
  pub relationship_code: String,
  pub birth_year:        Option<i32>,
  pub occupation:        Option<String>,
  pub cohabiting:        bool,
  pub phone:             Option<String>,
  pub address:           Option<NewAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFamilyBackground {
  pub guardian_name:              String,
  pub guardian_relationship_code: Option<String>,
  pub father_alive:               bool,
  pub mother_alive:               bool,
  pub sibling_count:              i32,
  pub household_notes:            Option<String>,
  /// Sibling-support junction set; replaced wholesale.
  pub support_types:              Vec<String>,
  pub related_persons:            Vec<NewRelatedPerson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEducation {
  pub previous_school:     String,
  pub graduated_on:        Option<NaiveDate>,
  pub admission_type_code: Option<String>,
  pub course_code:         Option<String>,
  pub notes:               Option<String>,
  pub school_details:      Vec<NewSchoolDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSchoolDetail {
  pub school_name: String,
  pub kind_code:   String,
  pub entered_on:  Option<NaiveDate>,
  pub left_on:     Option<NaiveDate>,
  pub notes:       Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHealth {
  pub blood_type_code:    Option<String>,
  pub allergies:          Option<String>,
  pub chronic_conditions: Option<String>,
  pub physician:          Option<String>,
  pub notes:              Option<String>,
  pub consultations:      Vec<NewConsultation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConsultation {
  pub held_on:   NaiveDate,
  pub counselor: String,
  pub topic:     Option<String>,
  pub summary:   Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFinance {
  pub tuition_payer_code: Option<String>,
  pub monthly_allowance:  Option<i64>,
  pub scholarship:        Option<String>,
  pub part_time_job:      bool,
  /// Financial-support junction set; replaced wholesale.
  pub support_types:      Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
  pub name:      String,
  pub kind_code: Option<String>,
  pub role:      Option<String>,
  pub joined_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubjectPreference {
  pub subject: String,
  pub liked:   bool,
  pub reason:  Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHobby {
  pub name:  String,
  pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTestResult {
  pub test_name: String,
  pub taken_on:  Option<NaiveDate>,
  pub score:     i32,
  pub max_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSignificantNote {
  pub noted_on:      NaiveDate,
  pub category_code: Option<String>,
  pub body:          String,
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// A fully populated interview submission.
///
/// `personal` is the one mandatory block — the schema requires it, so its
/// absence is a type error rather than a runtime check. Optional 1:1 blocks
/// left `None` are not touched by the write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSubmission {
  pub student_number:      String,
  pub personal:            NewPersonalInfo,
  pub emergency_contact:   Option<NewEmergencyContact>,
  #[serde(default)]
  pub addresses:           Vec<NewAddress>,
  pub family:              Option<NewFamilyBackground>,
  pub education:           Option<NewEducation>,
  pub health:              Option<NewHealth>,
  pub finance:             Option<NewFinance>,
  #[serde(default)]
  pub activities:          Vec<NewActivity>,
  #[serde(default)]
  pub subject_preferences: Vec<NewSubjectPreference>,
  #[serde(default)]
  pub hobbies:             Vec<NewHobby>,
  #[serde(default)]
  pub test_results:        Vec<NewTestResult>,
  #[serde(default)]
  pub significant_notes:   Vec<NewSignificantNote>,
}

impl RecordSubmission {
  /// Structural validation, run before any write is issued.
  ///
  /// Checks completeness and basic well-formedness only; referential checks
  /// (lookup codes, foreign keys) are the store's job.
  pub fn validate(&self) -> Result<()> {
    if self.student_number.trim().is_empty() {
      return Err(Error::Validation("student_number must not be empty".into()));
    }
    if self.personal.family_name.trim().is_empty()
      || self.personal.given_name.trim().is_empty()
    {
      return Err(Error::Validation(
        "personal name fields must not be empty".into(),
      ));
    }

    let addresses = self
      .addresses
      .iter()
      .chain(self.emergency_contact.iter().filter_map(|c| c.address.as_ref()))
      .chain(
        self
          .family
          .iter()
          .flat_map(|f| &f.related_persons)
          .filter_map(|p| p.address.as_ref()),
      );
    for address in addresses {
      if address.line1.trim().is_empty() || address.city.trim().is_empty() {
        return Err(Error::Validation(
          "address line1 and city must not be empty".into(),
        ));
      }
    }

    if let Some(contact) = &self.emergency_contact {
      if contact.name.trim().is_empty() || contact.phone.trim().is_empty() {
        return Err(Error::Validation(
          "emergency contact needs a name and phone".into(),
        ));
      }
    }

    if let Some(family) = &self.family {
      if family.guardian_name.trim().is_empty() {
        return Err(Error::Validation("guardian_name must not be empty".into()));
      }
      if family.sibling_count < 0 {
        return Err(Error::Validation("sibling_count must not be negative".into()));
      }
      if let Some(person) = family
        .related_persons
        .iter()
        .find(|p| p.name.trim().is_empty())
      {
        return Err(Error::Validation(format!(
          "related person with relationship {:?} has an empty name",
          person.relationship_code
        )));
      }
    }

    for result in &self.test_results {
      if result.max_score <= 0 || result.score < 0 || result.score > result.max_score {
        return Err(Error::Validation(format!(
          "test result {:?} has an impossible score",
          result.test_name
        )));
      }
    }

    if self.significant_notes.iter().any(|n| n.body.trim().is_empty()) {
      return Err(Error::Validation("significant notes must have a body".into()));
    }

    Ok(())
  }
}
