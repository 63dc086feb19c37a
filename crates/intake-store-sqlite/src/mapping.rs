//! Explicit column mapping per entity.
//!
//! Each persisted type declares its table, column list, parameter values,
//! and row decoder as compile-time constants and plain functions — the
//! generic primitives in [`crate::primitives`] derive their SQL from these
//! tables, so no per-entity statements are written by hand and nothing is
//! inspected at runtime.
//!
//! Invariant: `values()` and `from_row` use exactly the order of `COLUMNS`.

use intake_core::{
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
  record::IntakeRecord,
};
use rusqlite::{Row, types::Value};

use crate::encode::{
  bool_value, date_col, date_value, dt_col, dt_value, encode_status,
  int_value, opt_date_col, opt_date_value, opt_int_value, opt_text_value,
  opt_uuid_col, opt_uuid_value, status_col, text_value, uuid_col, uuid_value,
};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A type persisted 1:1 as a table row.
pub trait TableRecord: Sized + Send + 'static {
  const TABLE: &'static str;
  const COLUMNS: &'static [&'static str];

  /// Parameter values in `COLUMNS` order.
  fn values(&self) -> Vec<Value>;

  /// Decode a row selected in `COLUMNS` order.
  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// A row written through the keyed-upsert primitive.
pub trait KeyedRecord: TableRecord {
  /// Primary-key column, returned by the upsert.
  const KEY: &'static str;
  /// Unique-constraint columns the insert may collide on.
  const CONFLICT: &'static [&'static str];
  /// Columns never touched by the update arm (key, FK, creation metadata).
  const IMMUTABLE: &'static [&'static str];
}

/// A row written through the replace-set primitive.
pub trait ChildRecord: TableRecord {
  /// The parent-key column the collection is replaced under.
  const PARENT: &'static str;
}

// ─── Root ────────────────────────────────────────────────────────────────────

impl TableRecord for IntakeRecord {
  const TABLE: &'static str = "records";
  const COLUMNS: &'static [&'static str] =
    &["record_id", "student_number", "status", "created_at", "updated_at"];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.record_id),
      text_value(&self.student_number),
      text_value(encode_status(self.status)),
      dt_value(self.created_at),
      dt_value(self.updated_at),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:      uuid_col(row, 0)?,
      student_number: row.get(1)?,
      status:         status_col(row, 2)?,
      created_at:     dt_col(row, 3)?,
      updated_at:     dt_col(row, 4)?,
    })
  }
}

// ─── Value objects ───────────────────────────────────────────────────────────

impl TableRecord for Address {
  const TABLE: &'static str = "addresses";
  const COLUMNS: &'static [&'static str] = &[
    "address_id",
    "line1",
    "line2",
    "city",
    "region",
    "postal_code",
    "country",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.address_id),
      text_value(&self.line1),
      opt_text_value(self.line2.as_deref()),
      text_value(&self.city),
      opt_text_value(self.region.as_deref()),
      opt_text_value(self.postal_code.as_deref()),
      opt_text_value(self.country.as_deref()),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      address_id:  uuid_col(row, 0)?,
      line1:       row.get(1)?,
      line2:       row.get(2)?,
      city:        row.get(3)?,
      region:      row.get(4)?,
      postal_code: row.get(5)?,
      country:     row.get(6)?,
    })
  }
}

impl KeyedRecord for Address {
  const KEY: &'static str = "address_id";
  const CONFLICT: &'static [&'static str] = &["address_id"];
  const IMMUTABLE: &'static [&'static str] = &["address_id"];
}

// ─── 1:1 children ────────────────────────────────────────────────────────────

impl TableRecord for PersonalInfo {
  const TABLE: &'static str = "personal_info";
  const COLUMNS: &'static [&'static str] = &[
    "personal_info_id",
    "record_id",
    "family_name",
    "given_name",
    "kana",
    "birth_date",
    "gender_code",
    "religion_code",
    "nationality",
    "phone",
    "email",
    "created_at",
    "updated_at",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.personal_info_id),
      uuid_value(self.record_id),
      text_value(&self.family_name),
      text_value(&self.given_name),
      opt_text_value(self.kana.as_deref()),
      date_value(self.birth_date),
      opt_text_value(self.gender_code.as_deref()),
      opt_text_value(self.religion_code.as_deref()),
      opt_text_value(self.nationality.as_deref()),
      opt_text_value(self.phone.as_deref()),
      opt_text_value(self.email.as_deref()),
      dt_value(self.created_at),
      dt_value(self.updated_at),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      personal_info_id: uuid_col(row, 0)?,
      record_id:        uuid_col(row, 1)?,
      family_name:      row.get(2)?,
      given_name:       row.get(3)?,
      kana:             row.get(4)?,
      birth_date:       date_col(row, 5)?,
      gender_code:      row.get(6)?,
      religion_code:    row.get(7)?,
      nationality:      row.get(8)?,
      phone:            row.get(9)?,
      email:            row.get(10)?,
      created_at:       dt_col(row, 11)?,
      updated_at:       dt_col(row, 12)?,
    })
  }
}

impl KeyedRecord for PersonalInfo {
  const KEY: &'static str = "personal_info_id";
  const CONFLICT: &'static [&'static str] = &["record_id"];
  const IMMUTABLE: &'static [&'static str] =
    &["personal_info_id", "record_id", "created_at"];
}

impl TableRecord for FamilyBackground {
  const TABLE: &'static str = "family_background";
  const COLUMNS: &'static [&'static str] = &[
    "family_background_id",
    "record_id",
    "guardian_name",
    "guardian_relationship_code",
    "father_alive",
    "mother_alive",
    "sibling_count",
    "household_notes",
    "created_at",
    "updated_at",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.family_background_id),
      uuid_value(self.record_id),
      text_value(&self.guardian_name),
      opt_text_value(self.guardian_relationship_code.as_deref()),
      bool_value(self.father_alive),
      bool_value(self.mother_alive),
      int_value(self.sibling_count as i64),
      opt_text_value(self.household_notes.as_deref()),
      dt_value(self.created_at),
      dt_value(self.updated_at),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      family_background_id:       uuid_col(row, 0)?,
      record_id:                  uuid_col(row, 1)?,
      guardian_name:              row.get(2)?,
      guardian_relationship_code: row.get(3)?,
      father_alive:               row.get(4)?,
      mother_alive:               row.get(5)?,
      sibling_count:              row.get(6)?,
      household_notes:            row.get(7)?,
      created_at:                 dt_col(row, 8)?,
      updated_at:                 dt_col(row, 9)?,
    })
  }
}

impl KeyedRecord for FamilyBackground {
  const KEY: &'static str = "family_background_id";
  const CONFLICT: &'static [&'static str] = &["record_id"];
  const IMMUTABLE: &'static [&'static str] =
    &["family_background_id", "record_id", "created_at"];
}

impl TableRecord for EducationalBackground {
  const TABLE: &'static str = "educational_background";
  const COLUMNS: &'static [&'static str] = &[
    "educational_background_id",
    "record_id",
    "previous_school",
    "graduated_on",
    "admission_type_code",
    "course_code",
    "notes",
    "created_at",
    "updated_at",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.educational_background_id),
      uuid_value(self.record_id),
      text_value(&self.previous_school),
      opt_date_value(self.graduated_on),
      opt_text_value(self.admission_type_code.as_deref()),
      opt_text_value(self.course_code.as_deref()),
      opt_text_value(self.notes.as_deref()),
      dt_value(self.created_at),
      dt_value(self.updated_at),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      educational_background_id: uuid_col(row, 0)?,
      record_id:                 uuid_col(row, 1)?,
      previous_school:           row.get(2)?,
      graduated_on:              opt_date_col(row, 3)?,
      admission_type_code:       row.get(4)?,
      course_code:               row.get(5)?,
      notes:                     row.get(6)?,
      created_at:                dt_col(row, 7)?,
      updated_at:                dt_col(row, 8)?,
    })
  }
}

impl KeyedRecord for EducationalBackground {
  const KEY: &'static str = "educational_background_id";
  const CONFLICT: &'static [&'static str] = &["record_id"];
  const IMMUTABLE: &'static [&'static str] =
    &["educational_background_id", "record_id", "created_at"];
}

impl TableRecord for HealthRecord {
  const TABLE: &'static str = "health_records";
  const COLUMNS: &'static [&'static str] = &[
    "health_record_id",
    "record_id",
    "blood_type_code",
    "allergies",
    "chronic_conditions",
    "physician",
    "notes",
    "created_at",
    "updated_at",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.health_record_id),
      uuid_value(self.record_id),
      opt_text_value(self.blood_type_code.as_deref()),
      opt_text_value(self.allergies.as_deref()),
      opt_text_value(self.chronic_conditions.as_deref()),
      opt_text_value(self.physician.as_deref()),
      opt_text_value(self.notes.as_deref()),
      dt_value(self.created_at),
      dt_value(self.updated_at),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      health_record_id:   uuid_col(row, 0)?,
      record_id:          uuid_col(row, 1)?,
      blood_type_code:    row.get(2)?,
      allergies:          row.get(3)?,
      chronic_conditions: row.get(4)?,
      physician:          row.get(5)?,
      notes:              row.get(6)?,
      created_at:         dt_col(row, 7)?,
      updated_at:         dt_col(row, 8)?,
    })
  }
}

impl KeyedRecord for HealthRecord {
  const KEY: &'static str = "health_record_id";
  const CONFLICT: &'static [&'static str] = &["record_id"];
  const IMMUTABLE: &'static [&'static str] =
    &["health_record_id", "record_id", "created_at"];
}

impl TableRecord for FinanceRecord {
  const TABLE: &'static str = "finance_records";
  const COLUMNS: &'static [&'static str] = &[
    "finance_record_id",
    "record_id",
    "tuition_payer_code",
    "monthly_allowance",
    "scholarship",
    "part_time_job",
    "created_at",
    "updated_at",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.finance_record_id),
      uuid_value(self.record_id),
      opt_text_value(self.tuition_payer_code.as_deref()),
      opt_int_value(self.monthly_allowance),
      opt_text_value(self.scholarship.as_deref()),
      bool_value(self.part_time_job),
      dt_value(self.created_at),
      dt_value(self.updated_at),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      finance_record_id:  uuid_col(row, 0)?,
      record_id:          uuid_col(row, 1)?,
      tuition_payer_code: row.get(2)?,
      monthly_allowance:  row.get(3)?,
      scholarship:        row.get(4)?,
      part_time_job:      row.get(5)?,
      created_at:         dt_col(row, 6)?,
      updated_at:         dt_col(row, 7)?,
    })
  }
}

impl KeyedRecord for FinanceRecord {
  const KEY: &'static str = "finance_record_id";
  const CONFLICT: &'static [&'static str] = &["record_id"];
  const IMMUTABLE: &'static [&'static str] =
    &["finance_record_id", "record_id", "created_at"];
}

impl TableRecord for EmergencyContact {
  const TABLE: &'static str = "emergency_contacts";
  const COLUMNS: &'static [&'static str] = &[
    "emergency_contact_id",
    "record_id",
    "name",
    "relationship_code",
    "phone",
    "address_id",
    "created_at",
    "updated_at",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.emergency_contact_id),
      uuid_value(self.record_id),
      text_value(&self.name),
      text_value(&self.relationship_code),
      text_value(&self.phone),
      opt_uuid_value(self.address_id),
      dt_value(self.created_at),
      dt_value(self.updated_at),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      emergency_contact_id: uuid_col(row, 0)?,
      record_id:            uuid_col(row, 1)?,
      name:                 row.get(2)?,
      relationship_code:    row.get(3)?,
      phone:                row.get(4)?,
      address_id:           opt_uuid_col(row, 5)?,
      created_at:           dt_col(row, 6)?,
      updated_at:           dt_col(row, 7)?,
    })
  }
}

impl KeyedRecord for EmergencyContact {
  const KEY: &'static str = "emergency_contact_id";
  const CONFLICT: &'static [&'static str] = &["record_id"];
  const IMMUTABLE: &'static [&'static str] =
    &["emergency_contact_id", "record_id", "created_at"];
}

// ─── 1:N children ────────────────────────────────────────────────────────────

impl TableRecord for RecordAddress {
  const TABLE: &'static str = "record_addresses";
  const COLUMNS: &'static [&'static str] =
    &["record_address_id", "record_id", "address_id", "kind_code"];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.record_address_id),
      uuid_value(self.record_id),
      uuid_value(self.address_id),
      text_value(&self.kind_code),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_address_id: uuid_col(row, 0)?,
      record_id:         uuid_col(row, 1)?,
      address_id:        uuid_col(row, 2)?,
      kind_code:         row.get(3)?,
    })
  }
}

impl ChildRecord for RecordAddress {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for RelatedPerson {
  const TABLE: &'static str = "related_persons";
  const COLUMNS: &'static [&'static str] = &[
    "related_person_id",
    "record_id",
    "name",
    "relationship_code",
    "birth_year",
    "occupation",
    "cohabiting",
    "address_id",
    "phone",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.related_person_id),
      uuid_value(self.record_id),
      text_value(&self.name),
      text_value(&self.relationship_code),
      opt_int_value(self.birth_year.map(i64::from)),
      opt_text_value(self.occupation.as_deref()),
      bool_value(self.cohabiting),
      opt_uuid_value(self.address_id),
      opt_text_value(self.phone.as_deref()),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      related_person_id: uuid_col(row, 0)?,
      record_id:         uuid_col(row, 1)?,
      name:              row.get(2)?,
      relationship_code: row.get(3)?,
      birth_year:        row.get(4)?,
      occupation:        row.get(5)?,
      cohabiting:        row.get(6)?,
      address_id:        opt_uuid_col(row, 7)?,
      phone:             row.get(8)?,
    })
  }
}

impl ChildRecord for RelatedPerson {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for SchoolDetail {
  const TABLE: &'static str = "school_details";
  const COLUMNS: &'static [&'static str] = &[
    "school_detail_id",
    "record_id",
    "school_name",
    "kind_code",
    "entered_on",
    "left_on",
    "notes",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.school_detail_id),
      uuid_value(self.record_id),
      text_value(&self.school_name),
      text_value(&self.kind_code),
      opt_date_value(self.entered_on),
      opt_date_value(self.left_on),
      opt_text_value(self.notes.as_deref()),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      school_detail_id: uuid_col(row, 0)?,
      record_id:        uuid_col(row, 1)?,
      school_name:      row.get(2)?,
      kind_code:        row.get(3)?,
      entered_on:       opt_date_col(row, 4)?,
      left_on:          opt_date_col(row, 5)?,
      notes:            row.get(6)?,
    })
  }
}

impl ChildRecord for SchoolDetail {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for Consultation {
  const TABLE: &'static str = "consultations";
  const COLUMNS: &'static [&'static str] = &[
    "consultation_id",
    "record_id",
    "held_on",
    "counselor",
    "topic",
    "summary",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.consultation_id),
      uuid_value(self.record_id),
      date_value(self.held_on),
      text_value(&self.counselor),
      opt_text_value(self.topic.as_deref()),
      opt_text_value(self.summary.as_deref()),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      consultation_id: uuid_col(row, 0)?,
      record_id:       uuid_col(row, 1)?,
      held_on:         date_col(row, 2)?,
      counselor:       row.get(3)?,
      topic:           row.get(4)?,
      summary:         row.get(5)?,
    })
  }
}

impl ChildRecord for Consultation {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for TestResult {
  const TABLE: &'static str = "test_results";
  const COLUMNS: &'static [&'static str] = &[
    "test_result_id",
    "record_id",
    "test_name",
    "taken_on",
    "score",
    "max_score",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.test_result_id),
      uuid_value(self.record_id),
      text_value(&self.test_name),
      opt_date_value(self.taken_on),
      int_value(self.score as i64),
      int_value(self.max_score as i64),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      test_result_id: uuid_col(row, 0)?,
      record_id:      uuid_col(row, 1)?,
      test_name:      row.get(2)?,
      taken_on:       opt_date_col(row, 3)?,
      score:          row.get(4)?,
      max_score:      row.get(5)?,
    })
  }
}

impl ChildRecord for TestResult {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for Activity {
  const TABLE: &'static str = "activities";
  const COLUMNS: &'static [&'static str] =
    &["activity_id", "record_id", "name", "kind_code", "role", "joined_on"];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.activity_id),
      uuid_value(self.record_id),
      text_value(&self.name),
      opt_text_value(self.kind_code.as_deref()),
      opt_text_value(self.role.as_deref()),
      opt_date_value(self.joined_on),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      activity_id: uuid_col(row, 0)?,
      record_id:   uuid_col(row, 1)?,
      name:        row.get(2)?,
      kind_code:   row.get(3)?,
      role:        row.get(4)?,
      joined_on:   opt_date_col(row, 5)?,
    })
  }
}

impl ChildRecord for Activity {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for SubjectPreference {
  const TABLE: &'static str = "subject_preferences";
  const COLUMNS: &'static [&'static str] = &[
    "subject_preference_id",
    "record_id",
    "subject",
    "liked",
    "reason",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.subject_preference_id),
      uuid_value(self.record_id),
      text_value(&self.subject),
      bool_value(self.liked),
      opt_text_value(self.reason.as_deref()),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_preference_id: uuid_col(row, 0)?,
      record_id:             uuid_col(row, 1)?,
      subject:               row.get(2)?,
      liked:                 row.get(3)?,
      reason:                row.get(4)?,
    })
  }
}

impl ChildRecord for SubjectPreference {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for Hobby {
  const TABLE: &'static str = "hobbies";
  const COLUMNS: &'static [&'static str] =
    &["hobby_id", "record_id", "name", "notes"];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.hobby_id),
      uuid_value(self.record_id),
      text_value(&self.name),
      opt_text_value(self.notes.as_deref()),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      hobby_id:  uuid_col(row, 0)?,
      record_id: uuid_col(row, 1)?,
      name:      row.get(2)?,
      notes:     row.get(3)?,
    })
  }
}

impl ChildRecord for Hobby {
  const PARENT: &'static str = "record_id";
}

impl TableRecord for SignificantNote {
  const TABLE: &'static str = "significant_notes";
  const COLUMNS: &'static [&'static str] = &[
    "significant_note_id",
    "record_id",
    "noted_on",
    "category_code",
    "body",
  ];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.significant_note_id),
      uuid_value(self.record_id),
      date_value(self.noted_on),
      opt_text_value(self.category_code.as_deref()),
      text_value(&self.body),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      significant_note_id: uuid_col(row, 0)?,
      record_id:           uuid_col(row, 1)?,
      noted_on:            date_col(row, 2)?,
      category_code:       row.get(3)?,
      body:                row.get(4)?,
    })
  }
}

impl ChildRecord for SignificantNote {
  const PARENT: &'static str = "record_id";
}

// ─── Junctions ───────────────────────────────────────────────────────────────

impl TableRecord for SiblingSupport {
  const TABLE: &'static str = "sibling_support";
  const COLUMNS: &'static [&'static str] =
    &["family_background_id", "support_code"];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.family_background_id),
      text_value(&self.support_code),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      family_background_id: uuid_col(row, 0)?,
      support_code:         row.get(1)?,
    })
  }
}

impl ChildRecord for SiblingSupport {
  const PARENT: &'static str = "family_background_id";
}

impl TableRecord for FinancialSupport {
  const TABLE: &'static str = "financial_support";
  const COLUMNS: &'static [&'static str] =
    &["finance_record_id", "support_code"];

  fn values(&self) -> Vec<Value> {
    vec![
      uuid_value(self.finance_record_id),
      text_value(&self.support_code),
    ]
  }

  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      finance_record_id: uuid_col(row, 0)?,
      support_code:      row.get(1)?,
    })
  }
}

impl ChildRecord for FinancialSupport {
  const PARENT: &'static str = "finance_record_id";
}
