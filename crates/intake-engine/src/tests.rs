//! Engine-level integration tests against the in-memory SQLite store.
//!
//! The store doubles as the lookup resolver, exactly as the server wires it.

use chrono::NaiveDate;
use intake_core::{
  Error,
  context::RequestContext,
  record::{RecordStatus, RecordSummary},
  store::RecordStore,
  submission::{
    NewActivity, NewAddress, NewConsultation, NewEducation,
    NewEmergencyContact, NewFamilyBackground, NewFinance, NewHealth, NewHobby,
    NewPersonalInfo, NewRelatedPerson, NewSchoolDetail, NewSignificantNote,
    NewSubjectPreference, NewTestResult, RecordSubmission,
  },
};
use intake_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::{assemble, decompose, enrich};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn address(line1: &str, kind: &str) -> NewAddress {
  NewAddress {
    kind_code:   kind.into(),
    line1:       line1.into(),
    line2:       None,
    city:        "Matsumoto".into(),
    region:      Some("Nagano".into()),
    postal_code: None,
    country:     None,
  }
}

/// A fully populated submission using only seeded lookup codes.
fn submission() -> RecordSubmission {
  RecordSubmission {
    student_number: "2026-0412".into(),
    personal: NewPersonalInfo {
      family_name:   "Sato".into(),
      given_name:    "Yuki".into(),
      kana:          Some("サトウ ユキ".into()),
      birth_date:    date(2008, 4, 2),
      gender_code:   Some("f".into()),
      religion_code: Some("none".into()),
      nationality:   Some("Japanese".into()),
      phone:         Some("080-1111-2222".into()),
      email:         None,
    },
    emergency_contact: Some(NewEmergencyContact {
      name:              "Sato Emi".into(),
      relationship_code: "mother".into(),
      phone:             "080-3333-4444".into(),
      address:           Some(address("5-1 Hon-machi", "current")),
    }),
    addresses: vec![
      address("5-1 Hon-machi", "current"),
      address("12-8 Kita-machi", "permanent"),
    ],
    family: Some(NewFamilyBackground {
      guardian_name:              "Sato Kenji".into(),
      guardian_relationship_code: Some("father".into()),
      father_alive:               true,
      mother_alive:               true,
      sibling_count:              1,
      household_notes:            None,
      support_types:              vec!["scholarship".into()],
      related_persons:            vec![
        NewRelatedPerson {
          name:              "Sato Kenji".into(),
          relationship_code: "father".into(),
          birth_year:        Some(1975),
          occupation:        Some("Engineer".into()),
          cohabiting:        true,
          phone:             None,
          address:           Some(address("5-1 Hon-machi", "current")),
        },
        NewRelatedPerson {
          name:              "Sato Emi".into(),
          relationship_code: "mother".into(),
          birth_year:        Some(1978),
          occupation:        None,
          cohabiting:        true,
          phone:             None,
          address:           None,
        },
      ],
    }),
    education: Some(NewEducation {
      previous_school:     "Matsumoto Daini Junior High".into(),
      graduated_on:        Some(date(2026, 3, 15)),
      admission_type_code: Some("regular".into()),
      course_code:         Some("science".into()),
      notes:               None,
      school_details:      vec![
        NewSchoolDetail {
          school_name: "Hon-machi Elementary".into(),
          kind_code:   "elementary".into(),
          entered_on:  Some(date(2014, 4, 1)),
          left_on:     Some(date(2020, 3, 20)),
          notes:       None,
        },
        NewSchoolDetail {
          school_name: "Matsumoto Daini Junior High".into(),
          kind_code:   "junior_high".into(),
          entered_on:  Some(date(2020, 4, 1)),
          left_on:     Some(date(2026, 3, 15)),
          notes:       None,
        },
      ],
    }),
    health: Some(NewHealth {
      blood_type_code:    Some("a".into()),
      allergies:          Some("pollen".into()),
      chronic_conditions: None,
      physician:          None,
      notes:              None,
      consultations:      vec![NewConsultation {
        held_on:   date(2026, 4, 10),
        counselor: "Tanaka".into(),
        topic:     Some("orientation".into()),
        summary:   None,
      }],
    }),
    finance: Some(NewFinance {
      tuition_payer_code: Some("father".into()),
      monthly_allowance:  Some(5000),
      scholarship:        None,
      part_time_job:      false,
      support_types:      vec!["public_assistance".into()],
    }),
    activities: vec![NewActivity {
      name:      "Track and field".into(),
      kind_code: Some("sports".into()),
      role:      None,
      joined_on: Some(date(2026, 4, 20)),
    }],
    subject_preferences: vec![
      NewSubjectPreference {
        subject: "Mathematics".into(),
        liked:   true,
        reason:  Some("puzzles".into()),
      },
      NewSubjectPreference {
        subject: "Classics".into(),
        liked:   false,
        reason:  None,
      },
    ],
    hobbies: vec![
      NewHobby { name: "piano".into(), notes: None },
      NewHobby { name: "chess".into(), notes: None },
    ],
    test_results: vec![NewTestResult {
      test_name: "Placement exam".into(),
      taken_on:  Some(date(2026, 3, 1)),
      score:     82,
      max_score: 100,
    }],
    significant_notes: vec![NewSignificantNote {
      noted_on:      date(2026, 4, 11),
      category_code: Some("academic".into()),
      body:          "Strong in mathematics; consider advanced track.".into(),
    }],
  }
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn decompose_then_assemble_round_trips() {
  let s = store().await;
  let ctx = RequestContext::new();

  let record_id = decompose(&s, &ctx, None, submission()).await.unwrap();
  let view = assemble(&s, &s, &ctx, record_id).await.unwrap();

  // Root
  assert_eq!(view.record.record_id, record_id);
  assert_eq!(view.record.student_number, "2026-0412");
  assert_eq!(view.record.status, RecordStatus::Draft);

  // Scalars
  let personal = view.personal.as_ref().unwrap();
  assert_eq!(personal.info.given_name, "Yuki");
  assert_eq!(personal.gender.as_ref().unwrap().label, "Female");
  assert_eq!(personal.religion.as_ref().unwrap().code, "none");

  let contact = view.emergency_contact.as_ref().unwrap();
  assert_eq!(contact.contact.name, "Sato Emi");
  assert_eq!(contact.relationship.label, "Mother");
  assert_eq!(contact.address.as_ref().unwrap().line1, "5-1 Hon-machi");

  let family = view.family.as_ref().unwrap();
  assert_eq!(family.family.guardian_name, "Sato Kenji");
  assert_eq!(family.guardian_relationship.as_ref().unwrap().code, "father");
  assert_eq!(family.support_types.len(), 1);
  assert_eq!(family.support_types[0].code, "scholarship");

  let education = view.education.as_ref().unwrap();
  assert_eq!(education.course.as_ref().unwrap().code, "science");

  let health = view.health.as_ref().unwrap();
  assert_eq!(health.blood_type.as_ref().unwrap().label, "Type A");

  let finance = view.finance.as_ref().unwrap();
  assert_eq!(finance.tuition_payer.as_ref().unwrap().code, "father");
  assert_eq!(finance.support_types[0].code, "public_assistance");

  // Collections: set-equal, order-independent.
  let mut kinds: Vec<&str> =
    view.addresses.iter().map(|a| a.kind.code.as_str()).collect();
  kinds.sort();
  assert_eq!(kinds, ["current", "permanent"]);

  let mut related: Vec<&str> = view
    .related_persons
    .iter()
    .map(|p| p.person.name.as_str())
    .collect();
  related.sort();
  assert_eq!(related, ["Sato Emi", "Sato Kenji"]);
  let father = view
    .related_persons
    .iter()
    .find(|p| p.relationship.code == "father")
    .unwrap();
  assert_eq!(father.address.as_ref().unwrap().line1, "5-1 Hon-machi");

  assert_eq!(view.school_details.len(), 2);
  assert_eq!(view.consultations.len(), 1);
  assert_eq!(view.test_results.len(), 1);
  assert_eq!(view.test_results[0].score, 82);
  assert_eq!(view.activities.len(), 1);
  assert_eq!(view.subject_preferences.len(), 2);

  let mut hobbies: Vec<&str> =
    view.hobbies.iter().map(|h| h.name.as_str()).collect();
  hobbies.sort();
  assert_eq!(hobbies, ["chess", "piano"]);

  assert_eq!(view.significant_notes.len(), 1);
}

// ─── Replace-set convergence ─────────────────────────────────────────────────

#[tokio::test]
async fn second_submission_replaces_collections_exactly() {
  let s = store().await;
  let ctx = RequestContext::new();

  let record_id = decompose(&s, &ctx, None, submission()).await.unwrap();

  // Overlapping second set: "chess" survives, "piano" goes, "go" arrives.
  let mut second = submission();
  second.hobbies = vec![
    NewHobby { name: "chess".into(), notes: None },
    NewHobby { name: "go".into(), notes: None },
  ];
  decompose(&s, &ctx, Some(record_id), second).await.unwrap();

  let view = assemble(&s, &s, &ctx, record_id).await.unwrap();
  let mut hobbies: Vec<&str> =
    view.hobbies.iter().map(|h| h.name.as_str()).collect();
  hobbies.sort();
  assert_eq!(hobbies, ["chess", "go"]);
}

#[tokio::test]
async fn empty_collections_clear_prior_rows() {
  let s = store().await;
  let ctx = RequestContext::new();

  let record_id = decompose(&s, &ctx, None, submission()).await.unwrap();

  let mut second = submission();
  second.hobbies = vec![];
  second.activities = vec![];
  second.test_results = vec![];
  if let Some(family) = &mut second.family {
    family.support_types = vec![];
    family.related_persons = vec![];
  }
  decompose(&s, &ctx, Some(record_id), second).await.unwrap();

  // Empty lists, not errors.
  let view = assemble(&s, &s, &ctx, record_id).await.unwrap();
  assert!(view.hobbies.is_empty());
  assert!(view.activities.is_empty());
  assert!(view.test_results.is_empty());
  assert!(view.related_persons.is_empty());
  assert!(view.family.as_ref().unwrap().support_types.is_empty());
}

// ─── Idempotent upsert ───────────────────────────────────────────────────────

#[tokio::test]
async fn reapplied_one_to_one_keeps_identity_and_creation_metadata() {
  let s = store().await;
  let ctx = RequestContext::new();

  let record_id = decompose(&s, &ctx, None, submission()).await.unwrap();
  let first = assemble(&s, &s, &ctx, record_id).await.unwrap();
  let first_info = first.personal.as_ref().unwrap().info.clone();

  let mut second = submission();
  second.personal.given_name = "Haruka".into();
  decompose(&s, &ctx, Some(record_id), second).await.unwrap();

  let view = assemble(&s, &s, &ctx, record_id).await.unwrap();
  let info = &view.personal.as_ref().unwrap().info;
  assert_eq!(info.given_name, "Haruka");
  assert_eq!(info.personal_info_id, first_info.personal_info_id);
  assert_eq!(info.created_at, first_info.created_at);
}

#[tokio::test]
async fn missing_optional_block_leaves_entity_untouched() {
  let s = store().await;
  let ctx = RequestContext::new();

  let record_id = decompose(&s, &ctx, None, submission()).await.unwrap();

  let mut second = submission();
  second.family = None;
  decompose(&s, &ctx, Some(record_id), second).await.unwrap();

  // The family block from the first submission is still there.
  let view = assemble(&s, &s, &ctx, record_id).await.unwrap();
  let family = view.family.as_ref().unwrap();
  assert_eq!(family.family.guardian_name, "Sato Kenji");
  assert_eq!(view.related_persons.len(), 2);
}

// ─── Fail-fast join ──────────────────────────────────────────────────────────

#[tokio::test]
async fn unresolvable_code_fails_the_whole_assemble() {
  let s = store().await;
  let ctx = RequestContext::new();

  let mut bad = submission();
  bad.personal.gender_code = Some("zz".into());
  let record_id = decompose(&s, &ctx, None, bad).await.unwrap();

  let err = assemble(&s, &s, &ctx, record_id).await.unwrap_err();
  assert!(matches!(err, Error::Aggregate { operation: "assemble", .. }));
  assert!(matches!(err.root_cause(), Error::NotFound { .. }));
}

// ─── Validation & missing roots ──────────────────────────────────────────────

#[tokio::test]
async fn invalid_submission_is_rejected_before_any_write() {
  let s = store().await;
  let ctx = RequestContext::new();

  let mut bad = submission();
  bad.student_number = "  ".into();

  let err = decompose(&s, &ctx, None, bad).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  // Nothing was persisted.
  assert!(s.list_records(10, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn impossible_test_score_is_a_validation_error() {
  let s = store().await;
  let ctx = RequestContext::new();

  let mut bad = submission();
  bad.test_results[0].score = 150;

  let err = decompose(&s, &ctx, None, bad).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn decompose_against_unknown_root_is_not_found() {
  let s = store().await;
  let ctx = RequestContext::new();

  let err = decompose(&s, &ctx, Some(Uuid::new_v4()), submission())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));
}

#[tokio::test]
async fn assemble_unknown_root_is_not_found() {
  let s = store().await;
  let ctx = RequestContext::new();

  let err = assemble(&s, &s, &ctx, Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { .. }));
}

// ─── Deadline ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn expired_deadline_stops_work_before_the_store() {
  let s = store().await;
  let ctx = RequestContext::new().with_deadline(std::time::Duration::ZERO);

  let err = decompose(&s, &ctx, None, submission()).await.unwrap_err();
  assert!(matches!(err, Error::DeadlineExceeded));
  assert!(s.list_records(10, 0).await.unwrap().is_empty());
}

// ─── Enrichment ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn enrich_preserves_input_order() {
  let s = store().await;
  let ctx = RequestContext::new();

  // Three records; give them distinguishable codes via their submissions.
  for (n, gender) in [("2026-0001", "f"), ("2026-0002", "m"), ("2026-0003", "x")] {
    let mut sub = submission();
    sub.student_number = n.into();
    sub.personal.gender_code = Some(gender.into());
    decompose(&s, &ctx, None, sub).await.unwrap();
  }

  let mut rows = s.list_records(10, 0).await.unwrap();
  // Fix a deliberate order and check the output matches it index for index.
  rows.sort_by(|a, b| a.student_number.cmp(&b.student_number));
  let expected: Vec<(Uuid, Option<String>)> = rows
    .iter()
    .map(|r| (r.record_id, r.gender_code.clone()))
    .collect();

  let enriched = enrich(&s, &ctx, rows).await.unwrap();
  assert_eq!(enriched.len(), expected.len());
  for (row, (record_id, gender_code)) in enriched.iter().zip(&expected) {
    assert_eq!(row.summary.record_id, *record_id);
    assert_eq!(
      row.gender.as_ref().map(|g| g.code.clone()),
      *gender_code
    );
  }
}

#[tokio::test]
async fn enrich_fails_fast_on_unknown_code() {
  let s = store().await;
  let ctx = RequestContext::new();

  let mut sub = submission();
  sub.personal.gender_code = Some("zz".into());
  decompose(&s, &ctx, None, sub).await.unwrap();

  let rows = s.list_records(10, 0).await.unwrap();
  let err = enrich(&s, &ctx, rows).await.unwrap_err();
  assert!(matches!(err, Error::Aggregate { operation: "enrich", .. }));
}

#[tokio::test]
async fn enrich_empty_page_is_empty() {
  let s = store().await;
  let ctx = RequestContext::new();
  let enriched: Vec<_> =
    enrich(&s, &ctx, Vec::<RecordSummary>::new()).await.unwrap();
  assert!(enriched.is_empty());
}
