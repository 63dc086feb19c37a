//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`] and
//! [`LookupResolver`].

use std::path::Path;

use chrono::Utc;
use intake_core::{
  Error, Result,
  education::{
    Activity, EducationalBackground, Hobby, SchoolDetail, SubjectPreference,
  },
  family::{FamilyBackground, SiblingSupport},
  finance::{FinanceRecord, FinancialSupport},
  health::{Consultation, HealthRecord, TestResult},
  lookup::{Lookup, LookupDomain, LookupResolver},
  notes::SignificantNote,
  person::{
    Address, EmergencyContact, PersonalInfo, RecordAddress, RelatedPerson,
  },
  record::{IntakeRecord, RecordSummary},
  store::RecordStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  encode::{dt_col, status_col},
  primitives::classify,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An intake record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and the
/// engine's parallel tasks may call it concurrently.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|e| Error::Storage(e.to_string()))?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(|e| Error::Storage(e.to_string()))?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
      .map_err(|e| classify("schema", e))
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  // ── Roots ─────────────────────────────────────────────────────────────

  async fn create_record(&self, record: IntakeRecord) -> Result<()> {
    self.insert_row(&record).await
  }

  async fn get_record(&self, record_id: Uuid) -> Result<Option<IntakeRecord>> {
    self.fetch_by("record_id", record_id).await
  }

  async fn touch_record(&self, record_id: Uuid) -> Result<()> {
    let id_str = record_id.hyphenated().to_string();
    let now_str = Utc::now().to_rfc3339();

    let updated = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE records SET updated_at = ?1 WHERE record_id = ?2",
          rusqlite::params![now_str, id_str],
        )?)
      })
      .await
      .map_err(|e| classify("records", e))?;

    if updated == 0 {
      return Err(Error::not_found("record", record_id));
    }
    Ok(())
  }

  async fn list_records(
    &self,
    limit: usize,
    offset: usize,
  ) -> Result<Vec<RecordSummary>> {
    let limit_val = limit as i64;
    let offset_val = offset as i64;

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             r.record_id, r.student_number, r.status, r.updated_at,
             p.family_name, p.given_name, p.gender_code,
             e.course_code
           FROM records r
           LEFT JOIN personal_info p           ON p.record_id = r.record_id
           LEFT JOIN educational_background e  ON e.record_id = r.record_id
           ORDER BY r.updated_at DESC
           LIMIT ?1 OFFSET ?2",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![limit_val, offset_val], |row| {
            let family: Option<String> = row.get(4)?;
            let given: Option<String> = row.get(5)?;
            let full_name = match (family, given) {
              (Some(f), Some(g)) => Some(format!("{f} {g}")),
              (Some(f), None) => Some(f),
              (None, Some(g)) => Some(g),
              (None, None) => None,
            };

            Ok(RecordSummary {
              record_id:      crate::encode::uuid_col(row, 0)?,
              student_number: row.get(1)?,
              status:         status_col(row, 2)?,
              updated_at:     dt_col(row, 3)?,
              full_name,
              gender_code:    row.get(6)?,
              course_code:    row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await
      .map_err(|e| classify("records", e))
  }

  // ── 1:1 reads ─────────────────────────────────────────────────────────

  async fn get_personal_info(
    &self,
    record_id: Uuid,
  ) -> Result<Option<PersonalInfo>> {
    self.fetch_by("record_id", record_id).await
  }

  async fn get_emergency_contact(
    &self,
    record_id: Uuid,
  ) -> Result<Option<EmergencyContact>> {
    self.fetch_by("record_id", record_id).await
  }

  async fn get_family_background(
    &self,
    record_id: Uuid,
  ) -> Result<Option<FamilyBackground>> {
    self.fetch_by("record_id", record_id).await
  }

  async fn get_educational_background(
    &self,
    record_id: Uuid,
  ) -> Result<Option<EducationalBackground>> {
    self.fetch_by("record_id", record_id).await
  }

  async fn get_health_record(
    &self,
    record_id: Uuid,
  ) -> Result<Option<HealthRecord>> {
    self.fetch_by("record_id", record_id).await
  }

  async fn get_finance_record(
    &self,
    record_id: Uuid,
  ) -> Result<Option<FinanceRecord>> {
    self.fetch_by("record_id", record_id).await
  }

  async fn get_address(&self, address_id: Uuid) -> Result<Option<Address>> {
    self.fetch_by("address_id", address_id).await
  }

  // ── 1:N reads ─────────────────────────────────────────────────────────

  async fn list_record_addresses(
    &self,
    record_id: Uuid,
  ) -> Result<Vec<RecordAddress>> {
    self.fetch_children(record_id).await
  }

  async fn list_related_persons(
    &self,
    record_id: Uuid,
  ) -> Result<Vec<RelatedPerson>> {
    self.fetch_children(record_id).await
  }

  async fn list_school_details(
    &self,
    record_id: Uuid,
  ) -> Result<Vec<SchoolDetail>> {
    self.fetch_children(record_id).await
  }

  async fn list_consultations(
    &self,
    record_id: Uuid,
  ) -> Result<Vec<Consultation>> {
    self.fetch_children(record_id).await
  }

  async fn list_test_results(&self, record_id: Uuid) -> Result<Vec<TestResult>> {
    self.fetch_children(record_id).await
  }

  async fn list_activities(&self, record_id: Uuid) -> Result<Vec<Activity>> {
    self.fetch_children(record_id).await
  }

  async fn list_subject_preferences(
    &self,
    record_id: Uuid,
  ) -> Result<Vec<SubjectPreference>> {
    self.fetch_children(record_id).await
  }

  async fn list_hobbies(&self, record_id: Uuid) -> Result<Vec<Hobby>> {
    self.fetch_children(record_id).await
  }

  async fn list_significant_notes(
    &self,
    record_id: Uuid,
  ) -> Result<Vec<SignificantNote>> {
    self.fetch_children(record_id).await
  }

  // ── Junction reads ────────────────────────────────────────────────────

  async fn list_sibling_support(
    &self,
    family_background_id: Uuid,
  ) -> Result<Vec<SiblingSupport>> {
    self.fetch_children(family_background_id).await
  }

  async fn list_financial_support(
    &self,
    finance_record_id: Uuid,
  ) -> Result<Vec<FinancialSupport>> {
    self.fetch_children(finance_record_id).await
  }

  // ── Upserts ───────────────────────────────────────────────────────────

  async fn upsert_address(&self, address: Address) -> Result<Uuid> {
    self.upsert(&address).await
  }

  async fn upsert_personal_info(&self, info: PersonalInfo) -> Result<Uuid> {
    self.upsert(&info).await
  }

  async fn upsert_emergency_contact(
    &self,
    contact: EmergencyContact,
  ) -> Result<Uuid> {
    self.upsert(&contact).await
  }

  async fn upsert_family_background(
    &self,
    family: FamilyBackground,
  ) -> Result<Uuid> {
    self.upsert(&family).await
  }

  async fn upsert_educational_background(
    &self,
    education: EducationalBackground,
  ) -> Result<Uuid> {
    self.upsert(&education).await
  }

  async fn upsert_health_record(&self, health: HealthRecord) -> Result<Uuid> {
    self.upsert(&health).await
  }

  async fn upsert_finance_record(&self, finance: FinanceRecord) -> Result<Uuid> {
    self.upsert(&finance).await
  }

  // ── Replace-sets ──────────────────────────────────────────────────────

  async fn replace_record_addresses(
    &self,
    record_id: Uuid,
    links: Vec<RecordAddress>,
  ) -> Result<()> {
    self.replace_set(record_id, &links).await
  }

  async fn replace_related_persons(
    &self,
    record_id: Uuid,
    persons: Vec<RelatedPerson>,
  ) -> Result<()> {
    self.replace_set(record_id, &persons).await
  }

  async fn replace_school_details(
    &self,
    record_id: Uuid,
    details: Vec<SchoolDetail>,
  ) -> Result<()> {
    self.replace_set(record_id, &details).await
  }

  async fn replace_consultations(
    &self,
    record_id: Uuid,
    consultations: Vec<Consultation>,
  ) -> Result<()> {
    self.replace_set(record_id, &consultations).await
  }

  async fn replace_test_results(
    &self,
    record_id: Uuid,
    results: Vec<TestResult>,
  ) -> Result<()> {
    self.replace_set(record_id, &results).await
  }

  async fn replace_activities(
    &self,
    record_id: Uuid,
    activities: Vec<Activity>,
  ) -> Result<()> {
    self.replace_set(record_id, &activities).await
  }

  async fn replace_subject_preferences(
    &self,
    record_id: Uuid,
    preferences: Vec<SubjectPreference>,
  ) -> Result<()> {
    self.replace_set(record_id, &preferences).await
  }

  async fn replace_hobbies(
    &self,
    record_id: Uuid,
    hobbies: Vec<Hobby>,
  ) -> Result<()> {
    self.replace_set(record_id, &hobbies).await
  }

  async fn replace_significant_notes(
    &self,
    record_id: Uuid,
    notes: Vec<SignificantNote>,
  ) -> Result<()> {
    self.replace_set(record_id, &notes).await
  }

  async fn replace_sibling_support(
    &self,
    family_background_id: Uuid,
    support: Vec<SiblingSupport>,
  ) -> Result<()> {
    self.replace_set(family_background_id, &support).await
  }

  async fn replace_financial_support(
    &self,
    finance_record_id: Uuid,
    support: Vec<FinancialSupport>,
  ) -> Result<()> {
    self.replace_set(finance_record_id, &support).await
  }
}

// ─── LookupResolver impl ─────────────────────────────────────────────────────

impl LookupResolver for SqliteStore {
  async fn resolve(&self, domain: LookupDomain, code: &str) -> Result<Lookup> {
    let domain_str = domain.as_str();
    let code_owned = code.to_owned();

    let label: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT label FROM lookups WHERE domain = ?1 AND code = ?2",
              rusqlite::params![domain_str, code_owned],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await
      .map_err(|e| classify("lookups", e))?;

    match label {
      Some(label) => {
        Ok(Lookup { domain, code: code.to_owned(), label })
      }
      None => Err(Error::lookup_not_found(domain.as_str(), code)),
    }
  }
}
