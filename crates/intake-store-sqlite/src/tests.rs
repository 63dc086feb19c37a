//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, Utc};
use intake_core::{
  Error,
  education::Hobby,
  family::SiblingSupport,
  health::Consultation,
  lookup::{LookupDomain, LookupResolver},
  person::{Address, PersonalInfo},
  record::{IntakeRecord, RecordStatus},
  store::RecordStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn new_record() -> IntakeRecord {
  let now = Utc::now();
  IntakeRecord {
    record_id:      Uuid::new_v4(),
    student_number: format!("S-{}", Uuid::new_v4()),
    status:         RecordStatus::Draft,
    created_at:     now,
    updated_at:     now,
  }
}

fn personal_info(record_id: Uuid, given: &str) -> PersonalInfo {
  let now = Utc::now();
  PersonalInfo {
    personal_info_id: Uuid::new_v4(),
    record_id,
    family_name: "Sato".into(),
    given_name: given.into(),
    kana: None,
    birth_date: NaiveDate::from_ymd_opt(2008, 4, 2).unwrap(),
    gender_code: Some("f".into()),
    religion_code: None,
    nationality: None,
    phone: None,
    email: None,
    created_at: now,
    updated_at: now,
  }
}

fn hobby(record_id: Uuid, name: &str) -> Hobby {
  Hobby {
    hobby_id: Uuid::new_v4(),
    record_id,
    name: name.into(),
    notes: None,
  }
}

// ─── Roots ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_record() {
  let s = store().await;
  let record = new_record();

  s.create_record(record.clone()).await.unwrap();

  let fetched = s.get_record(record.record_id).await.unwrap().unwrap();
  assert_eq!(fetched.record_id, record.record_id);
  assert_eq!(fetched.student_number, record.student_number);
  assert_eq!(fetched.status, RecordStatus::Draft);
}

#[tokio::test]
async fn get_record_missing_returns_none() {
  let s = store().await;
  assert!(s.get_record(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn touch_record_missing_is_not_found() {
  let s = store().await;
  let err = s.touch_record(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn list_records_joins_summary_columns() {
  let s = store().await;
  let record = new_record();
  s.create_record(record.clone()).await.unwrap();
  s.upsert_personal_info(personal_info(record.record_id, "Yuki"))
    .await
    .unwrap();

  let page = s.list_records(10, 0).await.unwrap();
  assert_eq!(page.len(), 1);
  assert_eq!(page[0].record_id, record.record_id);
  assert_eq!(page[0].full_name.as_deref(), Some("Sato Yuki"));
  assert_eq!(page[0].gender_code.as_deref(), Some("f"));
  assert_eq!(page[0].course_code, None);
}

// ─── Keyed upsert ────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_inserts_then_updates_in_place() {
  let s = store().await;
  let record = new_record();
  s.create_record(record.clone()).await.unwrap();

  let first = personal_info(record.record_id, "Yuki");
  let first_id = s.upsert_personal_info(first.clone()).await.unwrap();
  assert_eq!(first_id, first.personal_info_id);

  // Second write carries a fresh id; the collision keeps the original row.
  let second = personal_info(record.record_id, "Haruka");
  let second_id = s.upsert_personal_info(second.clone()).await.unwrap();
  assert_eq!(second_id, first.personal_info_id);
  assert_ne!(second_id, second.personal_info_id);

  let stored = s
    .get_personal_info(record.record_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.personal_info_id, first.personal_info_id);
  assert_eq!(stored.given_name, "Haruka");
  // Creation metadata survives from the first write.
  assert_eq!(
    stored.created_at.timestamp_millis(),
    first.created_at.timestamp_millis()
  );
}

#[tokio::test]
async fn upsert_same_value_twice_is_a_noop() {
  let s = store().await;
  let record = new_record();
  s.create_record(record.clone()).await.unwrap();

  let info = personal_info(record.record_id, "Yuki");
  let a = s.upsert_personal_info(info.clone()).await.unwrap();
  let b = s.upsert_personal_info(info.clone()).await.unwrap();
  assert_eq!(a, b);

  let stored = s
    .get_personal_info(record.record_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(stored.given_name, "Yuki");
}

#[tokio::test]
async fn upsert_against_missing_root_is_referential() {
  let s = store().await;

  let err = s
    .upsert_personal_info(personal_info(Uuid::new_v4(), "Nobody"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Referential { table: "personal_info", .. }));
}

// ─── Replace-set ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_set_converges_to_latest_collection() {
  let s = store().await;
  let record = new_record();
  s.create_record(record.clone()).await.unwrap();

  let c1 = vec![
    hobby(record.record_id, "piano"),
    hobby(record.record_id, "chess"),
  ];
  s.replace_hobbies(record.record_id, c1).await.unwrap();

  // Overlapping second set: "chess" appears in both.
  let c2 = vec![
    hobby(record.record_id, "chess"),
    hobby(record.record_id, "swimming"),
    hobby(record.record_id, "calligraphy"),
  ];
  s.replace_hobbies(record.record_id, c2).await.unwrap();

  let mut names: Vec<String> = s
    .list_hobbies(record.record_id)
    .await
    .unwrap()
    .into_iter()
    .map(|h| h.name)
    .collect();
  names.sort();
  assert_eq!(names, ["calligraphy", "chess", "swimming"]);
}

#[tokio::test]
async fn replace_set_with_empty_input_clears() {
  let s = store().await;
  let record = new_record();
  s.create_record(record.clone()).await.unwrap();

  s.replace_hobbies(record.record_id, vec![hobby(record.record_id, "go")])
    .await
    .unwrap();
  s.replace_hobbies(record.record_id, vec![]).await.unwrap();

  assert!(s.list_hobbies(record.record_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_set_insert_failure_keeps_old_collection() {
  let s = store().await;
  let record = new_record();
  s.create_record(record.clone()).await.unwrap();

  s.replace_consultations(
    record.record_id,
    vec![Consultation {
      consultation_id: Uuid::new_v4(),
      record_id:       record.record_id,
      held_on:         NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
      counselor:       "Tanaka".into(),
      topic:           None,
      summary:         None,
    }],
  )
  .await
  .unwrap();

  // Second batch references a record that does not exist; the insert fails
  // and the transaction rolls back to the previous set.
  let err = s
    .replace_consultations(
      record.record_id,
      vec![Consultation {
        consultation_id: Uuid::new_v4(),
        record_id:       Uuid::new_v4(),
        held_on:         NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
        counselor:       "Suzuki".into(),
        topic:           None,
        summary:         None,
      }],
    )
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Referential { .. }));

  let kept = s.list_consultations(record.record_id).await.unwrap();
  assert_eq!(kept.len(), 1);
  assert_eq!(kept[0].counselor, "Tanaka");
}

#[tokio::test]
async fn junction_replace_keyed_on_sub_entity_parent() {
  let s = store().await;
  let record = new_record();
  s.create_record(record.clone()).await.unwrap();

  let family = intake_core::family::FamilyBackground {
    family_background_id: Uuid::new_v4(),
    record_id:            record.record_id,
    guardian_name:        "Sato Kenji".into(),
    guardian_relationship_code: Some("father".into()),
    father_alive:         true,
    mother_alive:         true,
    sibling_count:        2,
    household_notes:      None,
    created_at:           Utc::now(),
    updated_at:           Utc::now(),
  };
  let family_id = s.upsert_family_background(family).await.unwrap();

  let support = |code: &str| SiblingSupport {
    family_background_id: family_id,
    support_code:         code.into(),
  };
  s.replace_sibling_support(family_id, vec![support("scholarship")])
    .await
    .unwrap();
  s.replace_sibling_support(
    family_id,
    vec![support("scholarship"), support("relative")],
  )
  .await
  .unwrap();

  let mut codes: Vec<String> = s
    .list_sibling_support(family_id)
    .await
    .unwrap()
    .into_iter()
    .map(|row| row.support_code)
    .collect();
  codes.sort();
  assert_eq!(codes, ["relative", "scholarship"]);
}

// ─── Value objects ───────────────────────────────────────────────────────────

#[tokio::test]
async fn address_value_object_roundtrip() {
  let s = store().await;

  let address = Address {
    address_id:  Uuid::new_v4(),
    line1:       "1-2-3 Sakura-dori".into(),
    line2:       None,
    city:        "Nagoya".into(),
    region:      Some("Aichi".into()),
    postal_code: Some("460-0001".into()),
    country:     None,
  };
  let id = s.upsert_address(address.clone()).await.unwrap();
  assert_eq!(id, address.address_id);

  let fetched = s.get_address(id).await.unwrap().unwrap();
  assert_eq!(fetched, address);
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn resolve_known_code() {
  let s = store().await;
  let lookup = s.resolve(LookupDomain::Gender, "f").await.unwrap();
  assert_eq!(lookup.label, "Female");
  assert_eq!(lookup.code, "f");
}

#[tokio::test]
async fn resolve_unknown_code_is_not_found() {
  let s = store().await;
  let err = s
    .resolve(LookupDomain::BloodType, "no-such-code")
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));
}
