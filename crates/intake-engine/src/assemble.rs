//! Scatter-gather read assembler.
//!
//! One concurrent task per sub-entity group; tasks only suspend at store
//! round trips and touch disjoint parts of the composite, so the join needs
//! no synchronisation beyond `try_join!` itself. Within a task the order is
//! fixed: entity fetch, then lookup resolution, then referenced value
//! objects. Between tasks no ordering is guaranteed.

use intake_core::{
  Error, Result,
  context::RequestContext,
  education::{Activity, Hobby, SchoolDetail, SubjectPreference},
  health::{Consultation, TestResult},
  lookup::{LookupDomain, LookupResolver, resolve_optional},
  notes::SignificantNote,
  person::Address,
  store::RecordStore,
  view::{
    AddressView, EducationView, EmergencyContactView, FamilyBackgroundView,
    FinanceView, HealthView, PersonalInfoView, RecordView, RelatedPersonView,
  },
};
use uuid::Uuid;

/// Assemble the full composite view for `record_id`.
///
/// Returns `NotFound` if the root does not exist. Any group failure fails
/// the whole call — a partially populated view is never returned.
pub async fn assemble<S, R>(
  store: &S,
  resolver: &R,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<RecordView>
where
  S: RecordStore,
  R: LookupResolver,
{
  ctx.ensure_active()?;
  tracing::debug!(request_id = %ctx.request_id, %record_id, "assembling record view");

  let record = store
    .get_record(record_id)
    .await?
    .ok_or_else(|| Error::not_found("record", record_id))?;

  let joined = futures::try_join!(
    personal_group(store, resolver, ctx, record_id),
    addresses_group(store, resolver, ctx, record_id),
    family_group(store, resolver, ctx, record_id),
    education_group(store, resolver, ctx, record_id),
    finance_group(store, resolver, ctx, record_id),
    health_group(store, resolver, ctx, record_id),
    activities_group(store, ctx, record_id),
    test_results_group(store, ctx, record_id),
    notes_group(store, ctx, record_id),
  );

  let (
    (personal, emergency_contact),
    addresses,
    (family, related_persons),
    (education, school_details),
    finance,
    (health, consultations),
    (activities, subject_preferences, hobbies),
    test_results,
    significant_notes,
  ) = joined.map_err(|e| Error::aggregate("assemble", e))?;

  tracing::debug!(%record_id, "record view assembled");

  Ok(RecordView {
    record,
    personal,
    emergency_contact,
    addresses,
    family,
    related_persons,
    education,
    school_details,
    health,
    consultations,
    test_results,
    finance,
    activities,
    subject_preferences,
    hobbies,
    significant_notes,
  })
}

// ─── Group tasks ─────────────────────────────────────────────────────────────

/// Fetch an address a persisted row points at. The foreign key guarantees it
/// exists; a miss means the store broke its own invariant.
async fn referenced_address<S: RecordStore>(
  store: &S,
  address_id: Uuid,
) -> Result<Address> {
  store
    .get_address(address_id)
    .await?
    .ok_or_else(|| Error::not_found("address", address_id))
}

async fn personal_group<S: RecordStore, R: LookupResolver>(
  store: &S,
  resolver: &R,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<(Option<PersonalInfoView>, Option<EmergencyContactView>)> {
  ctx.ensure_active()?;

  let personal = match store.get_personal_info(record_id).await? {
    Some(info) => {
      let gender =
        resolve_optional(resolver, LookupDomain::Gender, info.gender_code.as_deref())
          .await?;
      let religion = resolve_optional(
        resolver,
        LookupDomain::Religion,
        info.religion_code.as_deref(),
      )
      .await?;
      Some(PersonalInfoView { info, gender, religion })
    }
    None => None,
  };

  ctx.ensure_active()?;

  let emergency = match store.get_emergency_contact(record_id).await? {
    Some(contact) => {
      let relationship = resolver
        .resolve(LookupDomain::Relationship, &contact.relationship_code)
        .await?;
      let address = match contact.address_id {
        Some(id) => Some(referenced_address(store, id).await?),
        None => None,
      };
      Some(EmergencyContactView { contact, relationship, address })
    }
    None => None,
  };

  Ok((personal, emergency))
}

async fn addresses_group<S: RecordStore, R: LookupResolver>(
  store: &S,
  resolver: &R,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<Vec<AddressView>> {
  ctx.ensure_active()?;

  let links = store.list_record_addresses(record_id).await?;
  let mut views = Vec::with_capacity(links.len());
  for link in links {
    ctx.ensure_active()?;
    let kind = resolver
      .resolve(LookupDomain::AddressKind, &link.kind_code)
      .await?;
    let address = referenced_address(store, link.address_id).await?;
    views.push(AddressView { kind, address });
  }
  Ok(views)
}

async fn family_group<S: RecordStore, R: LookupResolver>(
  store: &S,
  resolver: &R,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<(Option<FamilyBackgroundView>, Vec<RelatedPersonView>)> {
  ctx.ensure_active()?;

  let family = match store.get_family_background(record_id).await? {
    Some(family) => {
      let guardian_relationship = resolve_optional(
        resolver,
        LookupDomain::Relationship,
        family.guardian_relationship_code.as_deref(),
      )
      .await?;

      let junction = store
        .list_sibling_support(family.family_background_id)
        .await?;
      let mut support_types = Vec::with_capacity(junction.len());
      for row in junction {
        support_types.push(
          resolver
            .resolve(LookupDomain::SupportType, &row.support_code)
            .await?,
        );
      }

      Some(FamilyBackgroundView { family, guardian_relationship, support_types })
    }
    None => None,
  };

  ctx.ensure_active()?;

  let persons = store.list_related_persons(record_id).await?;
  let mut related = Vec::with_capacity(persons.len());
  for person in persons {
    ctx.ensure_active()?;
    let relationship = resolver
      .resolve(LookupDomain::Relationship, &person.relationship_code)
      .await?;
    let address = match person.address_id {
      Some(id) => Some(referenced_address(store, id).await?),
      None => None,
    };
    related.push(RelatedPersonView { person, relationship, address });
  }

  Ok((family, related))
}

async fn education_group<S: RecordStore, R: LookupResolver>(
  store: &S,
  resolver: &R,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<(Option<EducationView>, Vec<SchoolDetail>)> {
  ctx.ensure_active()?;

  let education = match store.get_educational_background(record_id).await? {
    Some(education) => {
      let admission_type = resolve_optional(
        resolver,
        LookupDomain::AdmissionType,
        education.admission_type_code.as_deref(),
      )
      .await?;
      let course = resolve_optional(
        resolver,
        LookupDomain::Course,
        education.course_code.as_deref(),
      )
      .await?;
      Some(EducationView { education, admission_type, course })
    }
    None => None,
  };

  ctx.ensure_active()?;
  let school_details = store.list_school_details(record_id).await?;

  Ok((education, school_details))
}

async fn finance_group<S: RecordStore, R: LookupResolver>(
  store: &S,
  resolver: &R,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<Option<FinanceView>> {
  ctx.ensure_active()?;

  match store.get_finance_record(record_id).await? {
    Some(finance) => {
      let tuition_payer = resolve_optional(
        resolver,
        LookupDomain::TuitionPayer,
        finance.tuition_payer_code.as_deref(),
      )
      .await?;

      let junction = store
        .list_financial_support(finance.finance_record_id)
        .await?;
      let mut support_types = Vec::with_capacity(junction.len());
      for row in junction {
        support_types.push(
          resolver
            .resolve(LookupDomain::SupportType, &row.support_code)
            .await?,
        );
      }

      Ok(Some(FinanceView { finance, tuition_payer, support_types }))
    }
    None => Ok(None),
  }
}

async fn health_group<S: RecordStore, R: LookupResolver>(
  store: &S,
  resolver: &R,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<(Option<HealthView>, Vec<Consultation>)> {
  ctx.ensure_active()?;

  let health = match store.get_health_record(record_id).await? {
    Some(health) => {
      let blood_type = resolve_optional(
        resolver,
        LookupDomain::BloodType,
        health.blood_type_code.as_deref(),
      )
      .await?;
      Some(HealthView { health, blood_type })
    }
    None => None,
  };

  ctx.ensure_active()?;
  let consultations = store.list_consultations(record_id).await?;

  Ok((health, consultations))
}

async fn activities_group<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<(Vec<Activity>, Vec<SubjectPreference>, Vec<Hobby>)> {
  ctx.ensure_active()?;
  let activities = store.list_activities(record_id).await?;
  ctx.ensure_active()?;
  let preferences = store.list_subject_preferences(record_id).await?;
  ctx.ensure_active()?;
  let hobbies = store.list_hobbies(record_id).await?;
  Ok((activities, preferences, hobbies))
}

async fn test_results_group<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<Vec<TestResult>> {
  ctx.ensure_active()?;
  store.list_test_results(record_id).await
}

async fn notes_group<S: RecordStore>(
  store: &S,
  ctx: &RequestContext,
  record_id: Uuid,
) -> Result<Vec<SignificantNote>> {
  ctx.ensure_active()?;
  store.list_significant_notes(record_id).await
}
