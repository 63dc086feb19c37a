//! Decomposition write engine.
//!
//! Validates the submission, ensures the root row exists, then fans one
//! write branch out per sub-entity group, mirroring the read grouping.
//! 1:1 entities go through the store's keyed upsert (referenced value
//! objects written first); 1:N and junction collections go through
//! replace-set, so the persisted set always equals the submitted one.
//!
//! Each store call commits its own short-lived transaction. There is no
//! transaction spanning the whole call: when a branch fails, branches that
//! already committed stay committed and the root id remains valid. Retrying
//! the full submission is safe — every write here is idempotent.

use chrono::Utc;
use intake_core::{
  Error, Result,
  context::RequestContext,
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
  record::{IntakeRecord, RecordStatus},
  store::RecordStore,
  submission::{NewAddress, RecordSubmission},
};
use uuid::Uuid;

/// Persist a full submission.
///
/// With `record_id = None` a new root is created in `draft` status; its id
/// is returned and stays valid even if a later branch fails. With
/// `Some(id)` the root must exist (`NotFound` otherwise) and its
/// `updated_at` is bumped; the root's student number is fixed at creation
/// and the submission's copy is ignored on update.
pub async fn decompose<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Option<Uuid>,
  submission: RecordSubmission,
) -> Result<Uuid> {
  submission.validate()?;
  ctx.ensure_active()?;

  let record_id = match record_id {
    Some(id) => {
      store
        .get_record(id)
        .await?
        .ok_or_else(|| Error::not_found("record", id))?;
      store.touch_record(id).await?;
      id
    }
    None => {
      let now = Utc::now();
      let record = IntakeRecord {
        record_id: Uuid::new_v4(),
        student_number: submission.student_number.clone(),
        status: RecordStatus::Draft,
        created_at: now,
        updated_at: now,
      };
      let id = record.record_id;
      store.create_record(record).await?;
      id
    }
  };

  tracing::debug!(request_id = %ctx.request_id, %record_id, "decomposing submission");

  futures::try_join!(
    personal_branch(store, ctx, record_id, &submission),
    addresses_branch(store, ctx, record_id, &submission),
    family_branch(store, ctx, record_id, &submission),
    education_branch(store, ctx, record_id, &submission),
    finance_branch(store, ctx, record_id, &submission),
    health_branch(store, ctx, record_id, &submission),
    activities_branch(store, ctx, record_id, &submission),
    test_results_branch(store, ctx, record_id, &submission),
    notes_branch(store, ctx, record_id, &submission),
  )
  .map_err(|e| Error::aggregate("decompose", e))?;

  tracing::info!(%record_id, "submission persisted");
  Ok(record_id)
}

// ─── Row construction ────────────────────────────────────────────────────────

fn address_row(new: &NewAddress) -> Address {
  Address {
    address_id:  Uuid::new_v4(),
    line1:       new.line1.clone(),
    line2:       new.line2.clone(),
    city:        new.city.clone(),
    region:      new.region.clone(),
    postal_code: new.postal_code.clone(),
    country:     new.country.clone(),
  }
}

// ─── Write branches ──────────────────────────────────────────────────────────

async fn personal_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  ctx.ensure_active()?;
  let now = Utc::now();
  let new = &submission.personal;

  store
    .upsert_personal_info(PersonalInfo {
      personal_info_id: Uuid::new_v4(),
      record_id,
      family_name: new.family_name.clone(),
      given_name: new.given_name.clone(),
      kana: new.kana.clone(),
      birth_date: new.birth_date,
      gender_code: new.gender_code.clone(),
      religion_code: new.religion_code.clone(),
      nationality: new.nationality.clone(),
      phone: new.phone.clone(),
      email: new.email.clone(),
      created_at: now,
      updated_at: now,
    })
    .await?;

  if let Some(contact) = &submission.emergency_contact {
    ctx.ensure_active()?;
    // Value object first: the contact row references the address by id.
    let address_id = match &contact.address {
      Some(address) => Some(store.upsert_address(address_row(address)).await?),
      None => None,
    };

    store
      .upsert_emergency_contact(EmergencyContact {
        emergency_contact_id: Uuid::new_v4(),
        record_id,
        name: contact.name.clone(),
        relationship_code: contact.relationship_code.clone(),
        phone: contact.phone.clone(),
        address_id,
        created_at: now,
        updated_at: now,
      })
      .await?;
  }

  Ok(())
}

async fn addresses_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  ctx.ensure_active()?;

  let mut links = Vec::with_capacity(submission.addresses.len());
  for new in &submission.addresses {
    ctx.ensure_active()?;
    let address_id = store.upsert_address(address_row(new)).await?;
    links.push(RecordAddress {
      record_address_id: Uuid::new_v4(),
      record_id,
      address_id,
      kind_code: new.kind_code.clone(),
    });
  }

  // Always issued: an empty submission clears the persisted links.
  store.replace_record_addresses(record_id, links).await
}

async fn family_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  // Optional 1:1 block absent: no update for the family entity, its
  // junction, or the related persons it owns.
  let Some(new) = &submission.family else { return Ok(()) };

  ctx.ensure_active()?;
  let now = Utc::now();

  let family_background_id = store
    .upsert_family_background(FamilyBackground {
      family_background_id: Uuid::new_v4(),
      record_id,
      guardian_name: new.guardian_name.clone(),
      guardian_relationship_code: new.guardian_relationship_code.clone(),
      father_alive: new.father_alive,
      mother_alive: new.mother_alive,
      sibling_count: new.sibling_count,
      household_notes: new.household_notes.clone(),
      created_at: now,
      updated_at: now,
    })
    .await?;

  ctx.ensure_active()?;
  let support: Vec<SiblingSupport> = new
    .support_types
    .iter()
    .map(|code| SiblingSupport {
      family_background_id,
      support_code: code.clone(),
    })
    .collect();
  store
    .replace_sibling_support(family_background_id, support)
    .await?;

  let mut persons = Vec::with_capacity(new.related_persons.len());
  for person in &new.related_persons {
    ctx.ensure_active()?;
    let address_id = match &person.address {
      Some(address) => Some(store.upsert_address(address_row(address)).await?),
      None => None,
    };
    persons.push(RelatedPerson {
      related_person_id: Uuid::new_v4(),
      record_id,
      name: person.name.clone(),
      relationship_code: person.relationship_code.clone(),
      birth_year: person.birth_year,
      occupation: person.occupation.clone(),
      cohabiting: person.cohabiting,
      address_id,
      phone: person.phone.clone(),
    });
  }
  store.replace_related_persons(record_id, persons).await
}

async fn education_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  let Some(new) = &submission.education else { return Ok(()) };

  ctx.ensure_active()?;
  let now = Utc::now();

  store
    .upsert_educational_background(EducationalBackground {
      educational_background_id: Uuid::new_v4(),
      record_id,
      previous_school: new.previous_school.clone(),
      graduated_on: new.graduated_on,
      admission_type_code: new.admission_type_code.clone(),
      course_code: new.course_code.clone(),
      notes: new.notes.clone(),
      created_at: now,
      updated_at: now,
    })
    .await?;

  ctx.ensure_active()?;
  let details: Vec<SchoolDetail> = new
    .school_details
    .iter()
    .map(|detail| SchoolDetail {
      school_detail_id: Uuid::new_v4(),
      record_id,
      school_name: detail.school_name.clone(),
      kind_code: detail.kind_code.clone(),
      entered_on: detail.entered_on,
      left_on: detail.left_on,
      notes: detail.notes.clone(),
    })
    .collect();
  store.replace_school_details(record_id, details).await
}

async fn finance_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  let Some(new) = &submission.finance else { return Ok(()) };

  ctx.ensure_active()?;
  let now = Utc::now();

  let finance_record_id = store
    .upsert_finance_record(FinanceRecord {
      finance_record_id: Uuid::new_v4(),
      record_id,
      tuition_payer_code: new.tuition_payer_code.clone(),
      monthly_allowance: new.monthly_allowance,
      scholarship: new.scholarship.clone(),
      part_time_job: new.part_time_job,
      created_at: now,
      updated_at: now,
    })
    .await?;

  ctx.ensure_active()?;
  let support: Vec<FinancialSupport> = new
    .support_types
    .iter()
    .map(|code| FinancialSupport {
      finance_record_id,
      support_code: code.clone(),
    })
    .collect();
  store
    .replace_financial_support(finance_record_id, support)
    .await
}

async fn health_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  let Some(new) = &submission.health else { return Ok(()) };

  ctx.ensure_active()?;
  let now = Utc::now();

  store
    .upsert_health_record(HealthRecord {
      health_record_id: Uuid::new_v4(),
      record_id,
      blood_type_code: new.blood_type_code.clone(),
      allergies: new.allergies.clone(),
      chronic_conditions: new.chronic_conditions.clone(),
      physician: new.physician.clone(),
      notes: new.notes.clone(),
      created_at: now,
      updated_at: now,
    })
    .await?;

  ctx.ensure_active()?;
  let consultations: Vec<Consultation> = new
    .consultations
    .iter()
    .map(|c| Consultation {
      consultation_id: Uuid::new_v4(),
      record_id,
      held_on: c.held_on,
      counselor: c.counselor.clone(),
      topic: c.topic.clone(),
      summary: c.summary.clone(),
    })
    .collect();
  store.replace_consultations(record_id, consultations).await
}

async fn activities_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  ctx.ensure_active()?;

  let activities: Vec<Activity> = submission
    .activities
    .iter()
    .map(|a| Activity {
      activity_id: Uuid::new_v4(),
      record_id,
      name: a.name.clone(),
      kind_code: a.kind_code.clone(),
      role: a.role.clone(),
      joined_on: a.joined_on,
    })
    .collect();
  store.replace_activities(record_id, activities).await?;

  ctx.ensure_active()?;
  let preferences: Vec<SubjectPreference> = submission
    .subject_preferences
    .iter()
    .map(|p| SubjectPreference {
      subject_preference_id: Uuid::new_v4(),
      record_id,
      subject: p.subject.clone(),
      liked: p.liked,
      reason: p.reason.clone(),
    })
    .collect();
  store
    .replace_subject_preferences(record_id, preferences)
    .await?;

  ctx.ensure_active()?;
  let hobbies: Vec<Hobby> = submission
    .hobbies
    .iter()
    .map(|h| Hobby {
      hobby_id: Uuid::new_v4(),
      record_id,
      name: h.name.clone(),
      notes: h.notes.clone(),
    })
    .collect();
  store.replace_hobbies(record_id, hobbies).await
}

async fn test_results_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  ctx.ensure_active()?;

  let results: Vec<TestResult> = submission
    .test_results
    .iter()
    .map(|r| TestResult {
      test_result_id: Uuid::new_v4(),
      record_id,
      test_name: r.test_name.clone(),
      taken_on: r.taken_on,
      score: r.score,
      max_score: r.max_score,
    })
    .collect();
  store.replace_test_results(record_id, results).await
}

async fn notes_branch<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
  submission: &RecordSubmission,
) -> Result<()> {
  ctx.ensure_active()?;

  let notes: Vec<SignificantNote> = submission
    .significant_notes
    .iter()
    .map(|n| SignificantNote {
      significant_note_id: Uuid::new_v4(),
      record_id,
      noted_on: n.noted_on,
      category_code: n.category_code.clone(),
      body: n.body.clone(),
    })
    .collect();
  store.replace_significant_notes(record_id, notes).await
}
