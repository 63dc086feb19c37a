//! Composite view types — the read model assembled from all sub-entities of
//! one record. Never stored, always derived.
//!
//! Each `*View` pairs a persisted entity with the display entities its
//! lookup codes resolved to. A view is only ever handed out whole: the
//! assembler either fills every group or returns an error.

use serde::{Deserialize, Serialize};

use crate::{
  education::{
    Activity, EducationalBackground, Hobby, SchoolDetail, SubjectPreference,
  },
  family::FamilyBackground,
  finance::FinanceRecord,
  health::{Consultation, HealthRecord, TestResult},
  lookup::Lookup,
  notes::SignificantNote,
  person::{Address, EmergencyContact, PersonalInfo, RelatedPerson},
  record::{IntakeRecord, RecordSummary},
};

// ─── Per-entity views ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfoView {
  pub info:     PersonalInfo,
  pub gender:   Option<Lookup>,
  pub religion: Option<Lookup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContactView {
  pub contact:      EmergencyContact,
  pub relationship: Lookup,
  pub address:      Option<Address>,
}

/// One of the record's own addresses with its kind resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressView {
  pub kind:    Lookup,
  pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedPersonView {
  pub person:       RelatedPerson,
  pub relationship: Lookup,
  pub address:      Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyBackgroundView {
  pub family:                FamilyBackground,
  pub guardian_relationship: Option<Lookup>,
  /// Resolved sibling-support junction rows.
  pub support_types:         Vec<Lookup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationView {
  pub education:      EducationalBackground,
  pub admission_type: Option<Lookup>,
  pub course:         Option<Lookup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthView {
  pub health:     HealthRecord,
  pub blood_type: Option<Lookup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceView {
  pub finance:       FinanceRecord,
  pub tuition_payer: Option<Lookup>,
  /// Resolved financial-support junction rows.
  pub support_types: Vec<Lookup>,
}

// ─── Composite ───────────────────────────────────────────────────────────────

/// Everything known about one record, fetched scatter-gather on read.
///
/// 1:1 groups that were never written are `None`; 1:N groups that were never
/// written (or last written empty) are empty vectors. Collection order
/// within a group is not meaningful.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordView {
  pub record:              IntakeRecord,
  pub personal:            Option<PersonalInfoView>,
  pub emergency_contact:   Option<EmergencyContactView>,
  pub addresses:           Vec<AddressView>,
  pub family:              Option<FamilyBackgroundView>,
  pub related_persons:     Vec<RelatedPersonView>,
  pub education:           Option<EducationView>,
  pub school_details:      Vec<SchoolDetail>,
  pub health:              Option<HealthView>,
  pub consultations:       Vec<Consultation>,
  pub test_results:        Vec<TestResult>,
  pub finance:             Option<FinanceView>,
  pub activities:          Vec<Activity>,
  pub subject_preferences: Vec<SubjectPreference>,
  pub hobbies:             Vec<Hobby>,
  pub significant_notes:   Vec<SignificantNote>,
}

// ─── Enriched listing row ────────────────────────────────────────────────────

/// A listing row with its foreign-key codes resolved to display entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedSummary {
  pub summary: RecordSummary,
  pub gender:  Option<Lookup>,
  pub course:  Option<Lookup>,
}
