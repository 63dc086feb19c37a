//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as ISO 8601 dates,
//! UUIDs as hyphenated lowercase strings, booleans as 0/1 integers.
//!
//! The `*_col` readers map parse failures into
//! [`rusqlite::Error::FromSqlConversionFailure`] so row-mapping closures can
//! stay on `rusqlite::Result` and the generic fetch helpers surface one
//! error path.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{
  Row,
  types::{Type, Value},
};
use uuid::Uuid;

// ─── Value encoders (write side) ─────────────────────────────────────────────

pub fn uuid_value(id: Uuid) -> Value {
  Value::Text(id.hyphenated().to_string())
}

pub fn opt_uuid_value(id: Option<Uuid>) -> Value {
  id.map(uuid_value).unwrap_or(Value::Null)
}

pub fn text_value(s: &str) -> Value { Value::Text(s.to_owned()) }

pub fn opt_text_value(s: Option<&str>) -> Value {
  s.map(text_value).unwrap_or(Value::Null)
}

pub fn dt_value(dt: DateTime<Utc>) -> Value { Value::Text(dt.to_rfc3339()) }

pub fn date_value(d: NaiveDate) -> Value { Value::Text(d.to_string()) }

pub fn opt_date_value(d: Option<NaiveDate>) -> Value {
  d.map(date_value).unwrap_or(Value::Null)
}

pub fn bool_value(b: bool) -> Value { Value::Integer(b as i64) }

pub fn int_value(i: i64) -> Value { Value::Integer(i) }

pub fn opt_int_value(i: Option<i64>) -> Value {
  i.map(int_value).unwrap_or(Value::Null)
}

// ─── Column readers (read side) ──────────────────────────────────────────────

fn conversion_err(
  idx: usize,
  err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub fn uuid_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
  let s: String = row.get(idx)?;
  Uuid::parse_str(&s).map_err(|e| conversion_err(idx, e))
}

pub fn opt_uuid_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Uuid>> {
  let s: Option<String> = row.get(idx)?;
  s.map(|s| Uuid::parse_str(&s).map_err(|e| conversion_err(idx, e)))
    .transpose()
}

pub fn dt_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
  let s: String = row.get(idx)?;
  DateTime::parse_from_rfc3339(&s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| conversion_err(idx, e))
}

pub fn date_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
  let s: String = row.get(idx)?;
  s.parse::<NaiveDate>().map_err(|e| conversion_err(idx, e))
}

pub fn opt_date_col(
  row: &Row<'_>,
  idx: usize,
) -> rusqlite::Result<Option<NaiveDate>> {
  let s: Option<String> = row.get(idx)?;
  s.map(|s| s.parse::<NaiveDate>().map_err(|e| conversion_err(idx, e)))
    .transpose()
}

// ─── Record status ───────────────────────────────────────────────────────────

use intake_core::record::RecordStatus;

pub fn encode_status(status: RecordStatus) -> &'static str {
  match status {
    RecordStatus::Draft => "draft",
    RecordStatus::Finalized => "finalized",
  }
}

pub fn status_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<RecordStatus> {
  let s: String = row.get(idx)?;
  match s.as_str() {
    "draft" => Ok(RecordStatus::Draft),
    "finalized" => Ok(RecordStatus::Finalized),
    other => Err(rusqlite::Error::FromSqlConversionFailure(
      idx,
      Type::Text,
      format!("unknown record status: {other:?}").into(),
    )),
  }
}
