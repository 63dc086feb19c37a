//! List enrichment — resolve the foreign-key codes of a page of summaries.

use intake_core::{
  Error, Result,
  context::RequestContext,
  lookup::{LookupDomain, LookupResolver, resolve_optional},
  record::RecordSummary,
  view::EnrichedSummary,
};

/// Resolve every row's gender and course codes, one concurrent task per row.
///
/// Fail-fast: the first resolution error aborts the whole page. On success
/// the output is indexed identically to the input — `try_join_all` yields
/// results in argument order regardless of completion order.
pub async fn enrich<R: LookupResolver>(
  resolver: &R,
  ctx: &RequestContext,
  rows: Vec<RecordSummary>,
) -> Result<Vec<EnrichedSummary>> {
  tracing::debug!(request_id = %ctx.request_id, rows = rows.len(), "enriching listing page");

  let tasks = rows.into_iter().map(|summary| async move {
    ctx.ensure_active()?;
    let gender = resolve_optional(
      resolver,
      LookupDomain::Gender,
      summary.gender_code.as_deref(),
    )
    .await?;
    let course = resolve_optional(
      resolver,
      LookupDomain::Course,
      summary.course_code.as_deref(),
    )
    .await?;
    Ok(EnrichedSummary { summary, gender, course })
  });

  futures::future::try_join_all(tasks)
    .await
    .map_err(|e| Error::aggregate("enrich", e))
}
