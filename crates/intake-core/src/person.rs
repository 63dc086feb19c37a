//! Personal identity sub-entities: personal info, addresses, related
//! persons, and the emergency contact.
//!
//! Addresses are value objects with their own lifecycle — a row in the
//! address table may be referenced by the student's own address links, by a
//! related person, or by the emergency contact. Replacing a referrer never
//! deletes the address it pointed at.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Personal info (1:1) ─────────────────────────────────────────────────────

/// The interviewee's identity block. At most one row per record, enforced by
/// a unique constraint on `record_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
  pub personal_info_id: Uuid,
  pub record_id:        Uuid,
  pub family_name:      String,
  pub given_name:       String,
  /// Phonetic reading of the full name, where the script needs one.
  pub kana:             Option<String>,
  pub birth_date:       NaiveDate,
  pub gender_code:      Option<String>,
  pub religion_code:    Option<String>,
  pub nationality:      Option<String>,
  pub phone:            Option<String>,
  pub email:            Option<String>,
  /// Set on first insert; preserved across upserts.
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

// ─── Addresses ───────────────────────────────────────────────────────────────

/// A postal address value object. Not keyed to any record; owners reference
/// it by `address_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub address_id:  Uuid,
  pub line1:       String,
  pub line2:       Option<String>,
  pub city:        String,
  pub region:      Option<String>,
  pub postal_code: Option<String>,
  pub country:     Option<String>,
}

/// Links a record to one of its addresses, tagged with an `address_kind`
/// code (current, permanent, boarding, ...). 1:N under `record_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordAddress {
  pub record_address_id: Uuid,
  pub record_id:         Uuid,
  pub address_id:        Uuid,
  pub kind_code:         String,
}

// ─── Related persons (1:N) ───────────────────────────────────────────────────

/// A family member or other person named in the interview. 1:N under
/// `record_id`; the optional address is a shared value object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedPerson {
  pub related_person_id: Uuid,
  pub record_id:         Uuid,
  pub name:              String,
  pub relationship_code: String,
  pub birth_year:        Option<i32>,
  pub occupation:        Option<String>,
  pub cohabiting:        bool,
  pub address_id:        Option<Uuid>,
  pub phone:             Option<String>,
}

// ─── Emergency contact (1:1) ─────────────────────────────────────────────────

/// Who to call. At most one row per record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
  pub emergency_contact_id: Uuid,
  pub record_id:            Uuid,
  pub name:                 String,
  pub relationship_code:    String,
  pub phone:                String,
  pub address_id:           Option<Uuid>,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
}
