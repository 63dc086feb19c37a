//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/records` | Optional `?limit=&offset=`; rows are enriched |
//! | `POST` | `/records` | Body: full submission; creates the root |
//! | `GET`  | `/records/:id` | Full composite view; 404 if not found |
//! | `PUT`  | `/records/:id` | Body: full submission; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use intake_core::{
  context::RequestContext,
  lookup::LookupResolver,
  store::RecordStore,
  submission::RecordSubmission,
  view::{EnrichedSummary, RecordView},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{REQUEST_BUDGET, error::ApiError};

fn request_context() -> RequestContext {
  RequestContext::new().with_deadline(REQUEST_BUDGET)
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

/// `GET /records[?limit=<n>&offset=<n>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<EnrichedSummary>>, ApiError>
where
  S: RecordStore + LookupResolver,
{
  let ctx = request_context();
  let limit = params.limit.unwrap_or(50).min(500);
  let offset = params.offset.unwrap_or(0);

  let rows = store.list_records(limit, offset).await?;
  let enriched = intake_engine::enrich(store.as_ref(), &ctx, rows).await?;
  Ok(Json(enriched))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /records` — body: a full [`RecordSubmission`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(submission): Json<RecordSubmission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + LookupResolver,
{
  let ctx = request_context();
  let record_id =
    intake_engine::decompose(store.as_ref(), &ctx, None, submission).await?;
  Ok((StatusCode::CREATED, Json(json!({ "record_id": record_id }))))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /records/:id` — body: a full [`RecordSubmission`].
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(submission): Json<RecordSubmission>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: RecordStore + LookupResolver,
{
  let ctx = request_context();
  let record_id =
    intake_engine::decompose(store.as_ref(), &ctx, Some(id), submission)
      .await?;
  Ok(Json(json!({ "record_id": record_id })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /records/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<RecordView>, ApiError>
where
  S: RecordStore + LookupResolver,
{
  let ctx = request_context();
  let view =
    intake_engine::assemble(store.as_ref(), store.as_ref(), &ctx, id).await?;
  Ok(Json(view))
}
