//! The two generic persistence primitives — keyed upsert and replace-set —
//! plus the generic fetch helpers and driver-error classification.
//!
//! SQL text is derived from the compile-time column tables in
//! [`crate::mapping`]; every public store method in [`crate::store`] is a
//! thin typed wrapper over one of these.

use intake_core::{Error, Result};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  mapping::{ChildRecord, KeyedRecord, TableRecord},
  store::SqliteStore,
};

// ─── Error classification ────────────────────────────────────────────────────

/// Map a driver error into the system taxonomy.
///
/// Any constraint-class failure is `Referential`: the upsert's declared
/// unique key never errors (it takes the update arm), so a constraint
/// violation that reaches us is an integrity problem — a foreign key
/// pointing at a missing row, or a unique column outside the conflict
/// target. Everything else is `Storage`.
pub fn classify_rusqlite(
  table: &'static str,
  err: rusqlite::Error,
) -> Error {
  if let rusqlite::Error::SqliteFailure(code, ref message) = err {
    if code.code == rusqlite::ErrorCode::ConstraintViolation {
      return Error::Referential {
        table,
        detail: message.clone().unwrap_or_else(|| err.to_string()),
      };
    }
  }
  Error::Storage(err.to_string())
}

pub fn classify(table: &'static str, err: tokio_rusqlite::Error) -> Error {
  match err {
    tokio_rusqlite::Error::Rusqlite(inner) => classify_rusqlite(table, inner),
    other => Error::Storage(other.to_string()),
  }
}

// ─── SQL derivation ──────────────────────────────────────────────────────────

fn placeholders(n: usize) -> String {
  (1..=n)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}

fn insert_sql<T: TableRecord>() -> String {
  format!(
    "INSERT INTO {} ({}) VALUES ({})",
    T::TABLE,
    T::COLUMNS.join(", "),
    placeholders(T::COLUMNS.len()),
  )
}

/// `INSERT .. ON CONFLICT(..) DO UPDATE SET c = excluded.c, .. RETURNING key`.
///
/// The update arm covers every column outside the conflict target and the
/// immutable set, so a collision updates the row in place while the primary
/// key and creation metadata survive from the first write.
fn upsert_sql<T: KeyedRecord>() -> String {
  let updates = T::COLUMNS
    .iter()
    .filter(|c| !T::IMMUTABLE.contains(c) && !T::CONFLICT.contains(c))
    .map(|c| format!("{c} = excluded.{c}"))
    .collect::<Vec<_>>()
    .join(", ");

  format!(
    "{} ON CONFLICT({}) DO UPDATE SET {} RETURNING {}",
    insert_sql::<T>(),
    T::CONFLICT.join(", "),
    updates,
    T::KEY,
  )
}

fn select_sql<T: TableRecord>(key_column: &str) -> String {
  format!(
    "SELECT {} FROM {} WHERE {key_column} = ?1",
    T::COLUMNS.join(", "),
    T::TABLE,
  )
}

// ─── Replace-set outcome ─────────────────────────────────────────────────────

/// What happened inside a replace-set transaction. Returned out of the
/// connection closure so the async side can classify without re-entering
/// the driver.
enum ReplaceOutcome {
  Committed,
  /// An insert failed and the rollback restored the old set.
  RolledBack(rusqlite::Error),
  /// An insert failed and the rollback failed too; the delete phase may
  /// have been left applied.
  Stranded {
    insert:   rusqlite::Error,
    rollback: rusqlite::Error,
  },
}

// ─── Primitives ──────────────────────────────────────────────────────────────

impl SqliteStore {
  /// Insert `entity`; on unique-key collision update every mutable column.
  /// Returns the persisted row's key — the caller-supplied id on a fresh
  /// insert, the pre-existing id on a collision. Idempotent.
  pub(crate) async fn upsert<T: KeyedRecord>(&self, entity: &T) -> Result<Uuid> {
    let sql = upsert_sql::<T>();
    let values = entity.values();

    let id: String = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(values),
          |row| row.get(0),
        )?)
      })
      .await
      .map_err(|e| classify(T::TABLE, e))?;

    Uuid::parse_str(&id)
      .map_err(|e| Error::Storage(format!("bad key returned by upsert: {e}")))
  }

  /// Delete every row under `parent`, then insert `rows`, in one
  /// transaction. Readers observe the old set or the new set, never a
  /// partial one. An empty `rows` clears the collection.
  pub(crate) async fn replace_set<T: ChildRecord>(
    &self,
    parent: Uuid,
    rows: &[T],
  ) -> Result<()> {
    let delete_sql = format!("DELETE FROM {} WHERE {} = ?1", T::TABLE, T::PARENT);
    let insert = insert_sql::<T>();
    let parent_str = parent.hyphenated().to_string();
    let row_values: Vec<Vec<rusqlite::types::Value>> =
      rows.iter().map(TableRecord::values).collect();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(&delete_sql, rusqlite::params![parent_str])?;

        let mut insert_err = None;
        {
          let mut stmt = tx.prepare(&insert)?;
          for values in row_values {
            if let Err(e) = stmt.execute(rusqlite::params_from_iter(values)) {
              insert_err = Some(e);
              break;
            }
          }
        }

        match insert_err {
          None => {
            tx.commit()?;
            Ok(ReplaceOutcome::Committed)
          }
          Some(insert) => match tx.rollback() {
            Ok(()) => Ok(ReplaceOutcome::RolledBack(insert)),
            Err(rollback) => Ok(ReplaceOutcome::Stranded { insert, rollback }),
          },
        }
      })
      .await
      .map_err(|e| classify(T::TABLE, e))?;

    match outcome {
      ReplaceOutcome::Committed => Ok(()),
      ReplaceOutcome::RolledBack(e) => Err(classify_rusqlite(T::TABLE, e)),
      ReplaceOutcome::Stranded { insert, rollback } => {
        Err(Error::PartialWrite {
          table:  T::TABLE,
          detail: format!(
            "insert failed ({insert}), rollback failed ({rollback})"
          ),
        })
      }
    }
  }

  /// Plain insert for rows that are created exactly once (the root).
  pub(crate) async fn insert_row<T: TableRecord>(&self, entity: &T) -> Result<()> {
    let sql = insert_sql::<T>();
    let values = entity.values();

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params_from_iter(values))?;
        Ok(())
      })
      .await
      .map_err(|e| classify(T::TABLE, e))
  }

  /// Fetch at most one row where `key_column = id`.
  pub(crate) async fn fetch_by<T: TableRecord>(
    &self,
    key_column: &'static str,
    id: Uuid,
  ) -> Result<Option<T>> {
    let sql = select_sql::<T>(key_column);
    let id_str = id.hyphenated().to_string();

    self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], T::from_row)
            .optional()?,
        )
      })
      .await
      .map_err(|e| classify(T::TABLE, e))
  }

  /// Fetch every child row under `parent`.
  pub(crate) async fn fetch_children<T: ChildRecord>(
    &self,
    parent: Uuid,
  ) -> Result<Vec<T>> {
    let sql = select_sql::<T>(T::PARENT);
    let parent_str = parent.hyphenated().to_string();

    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![parent_str], T::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(|e| classify(T::TABLE, e))
  }
}
