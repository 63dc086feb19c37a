//! The `RecordStore` trait — the storage seam the aggregation engine runs
//! over.
//!
//! The trait is implemented by storage backends (e.g. `intake-store-sqlite`).
//! Each method is one independent relational round trip; backends must be
//! safe for concurrent calls because the engine issues one parallel task per
//! sub-entity group.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`). Errors use the
//! system-wide taxonomy in [`crate::Error`] so the engine can propagate the
//! first branch failure unchanged.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  education::{
    Activity, EducationalBackground, Hobby, SchoolDetail, SubjectPreference,
  },
  family::{FamilyBackground, SiblingSupport},
  finance::{FinanceRecord, FinancialSupport},
  health::{Consultation, HealthRecord, TestResult},
  notes::SignificantNote,
  person::{
    Address, EmergencyContact, PersonalInfo, RecordAddress, RelatedPerson,
  },
  record::{IntakeRecord, RecordSummary},
};

/// Abstraction over an intake record store backend.
///
/// Write semantics, uniform across entities:
///
/// - `upsert_*` — insert-or-update keyed on the entity's unique constraint
///   (`record_id` for 1:1 children, the primary key for value objects).
///   Returns the persisted row's id: the caller-supplied one on insert, the
///   pre-existing one on collision. The primary key and `created_at` are
///   never overwritten.
/// - `replace_*` — delete every child row under the parent key, then insert
///   the supplied collection, atomically with respect to readers. An empty
///   collection clears the set.
pub trait RecordStore: Send + Sync {
  // ── Roots ─────────────────────────────────────────────────────────────

  /// Insert a new root record. Fails on a duplicate `student_number`.
  fn create_record(
    &self,
    record: IntakeRecord,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// Retrieve a root by id. Returns `None` if not found.
  fn get_record(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Option<IntakeRecord>>> + Send + '_;

  /// Bump a root's `updated_at`. Errors with `NotFound` if the root does
  /// not exist.
  fn touch_record(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// One page of listing rows, most recently updated first.
  fn list_records(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<RecordSummary>>> + Send + '_;

  // ── 1:1 reads ─────────────────────────────────────────────────────────

  fn get_personal_info(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Option<PersonalInfo>>> + Send + '_;

  fn get_emergency_contact(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Option<EmergencyContact>>> + Send + '_;

  fn get_family_background(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Option<FamilyBackground>>> + Send + '_;

  fn get_educational_background(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Option<EducationalBackground>>> + Send + '_;

  fn get_health_record(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Option<HealthRecord>>> + Send + '_;

  fn get_finance_record(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Option<FinanceRecord>>> + Send + '_;

  /// Fetch an address value object by its own id.
  fn get_address(
    &self,
    address_id: Uuid,
  ) -> impl Future<Output = Result<Option<Address>>> + Send + '_;

  // ── 1:N reads ─────────────────────────────────────────────────────────

  /// The record→address links only; the address value objects themselves
  /// are fetched in separate round trips by the assembler.
  fn list_record_addresses(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<RecordAddress>>> + Send + '_;

  fn list_related_persons(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<RelatedPerson>>> + Send + '_;

  fn list_school_details(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SchoolDetail>>> + Send + '_;

  fn list_consultations(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Consultation>>> + Send + '_;

  fn list_test_results(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TestResult>>> + Send + '_;

  fn list_activities(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Activity>>> + Send + '_;

  fn list_subject_preferences(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SubjectPreference>>> + Send + '_;

  fn list_hobbies(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Hobby>>> + Send + '_;

  fn list_significant_notes(
    &self,
    record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SignificantNote>>> + Send + '_;

  // ── Junction reads ────────────────────────────────────────────────────

  fn list_sibling_support(
    &self,
    family_background_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SiblingSupport>>> + Send + '_;

  fn list_financial_support(
    &self,
    finance_record_id: Uuid,
  ) -> impl Future<Output = Result<Vec<FinancialSupport>>> + Send + '_;

  // ── Upserts (1:1 and value objects) ───────────────────────────────────

  fn upsert_address(
    &self,
    address: Address,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn upsert_personal_info(
    &self,
    info: PersonalInfo,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn upsert_emergency_contact(
    &self,
    contact: EmergencyContact,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn upsert_family_background(
    &self,
    family: FamilyBackground,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn upsert_educational_background(
    &self,
    education: EducationalBackground,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn upsert_health_record(
    &self,
    health: HealthRecord,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  fn upsert_finance_record(
    &self,
    finance: FinanceRecord,
  ) -> impl Future<Output = Result<Uuid>> + Send + '_;

  // ── Replace-sets (1:N) ────────────────────────────────────────────────

  fn replace_record_addresses(
    &self,
    record_id: Uuid,
    links: Vec<RecordAddress>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_related_persons(
    &self,
    record_id: Uuid,
    persons: Vec<RelatedPerson>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_school_details(
    &self,
    record_id: Uuid,
    details: Vec<SchoolDetail>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_consultations(
    &self,
    record_id: Uuid,
    consultations: Vec<Consultation>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_test_results(
    &self,
    record_id: Uuid,
    results: Vec<TestResult>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_activities(
    &self,
    record_id: Uuid,
    activities: Vec<Activity>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_subject_preferences(
    &self,
    record_id: Uuid,
    preferences: Vec<SubjectPreference>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_hobbies(
    &self,
    record_id: Uuid,
    hobbies: Vec<Hobby>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_significant_notes(
    &self,
    record_id: Uuid,
    notes: Vec<SignificantNote>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Replace-sets (junctions) ──────────────────────────────────────────

  fn replace_sibling_support(
    &self,
    family_background_id: Uuid,
    support: Vec<SiblingSupport>,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  fn replace_financial_support(
    &self,
    finance_record_id: Uuid,
    support: Vec<FinancialSupport>,
  ) -> impl Future<Output = Result<()>> + Send + '_;
}
