//! The five lookup vocabularies (roles, room status, room types,
//! reservation privacy, reservation status) share one shape, so one set of
//! queries serves them all.

use crate::error::{DbResultExt, WriteAction};
use crate::models::DbLookup;
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::i18n::{Localized, Translation, TranslationFallback};
use roomresv_core::lookup::{Lookup, LookupKind};
use sqlx::{FromRow, Pool, Sqlite};

pub async fn create_lookup(
    pool: &Pool<Sqlite>,
    kind: LookupKind,
    id: i64,
    label: &str,
) -> ResvResult<DbLookup> {
    tracing::debug!("Creating {} entry: id={}, label={}", kind.table(), id, label);

    let sql = format!(
        "INSERT INTO {table} ({key}, label) VALUES ($1, $2) RETURNING {key} AS id, label",
        table = kind.table(),
        key = kind.key_column(),
    );

    let row = sqlx::query_as::<_, DbLookup>(&sql)
        .bind(id)
        .bind(label)
        .fetch_one(pool)
        .await
        .on_write(WriteAction::Insert, kind.table())?;

    Ok(row)
}

pub async fn get_lookup(pool: &Pool<Sqlite>, kind: LookupKind, id: i64) -> ResvResult<Option<DbLookup>> {
    let sql = format!(
        "SELECT {key} AS id, label FROM {table} WHERE {key} = $1",
        table = kind.table(),
        key = kind.key_column(),
    );

    let row = sqlx::query_as::<_, DbLookup>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .on_read()?;

    Ok(row)
}

pub async fn list_lookups(pool: &Pool<Sqlite>, kind: LookupKind) -> ResvResult<Vec<DbLookup>> {
    let sql = format!(
        "SELECT {key} AS id, label FROM {table} ORDER BY {key} ASC",
        table = kind.table(),
        key = kind.key_column(),
    );

    let rows = sqlx::query_as::<_, DbLookup>(&sql)
        .fetch_all(pool)
        .await
        .on_read()?;

    Ok(rows)
}

pub async fn relabel_lookup(
    pool: &Pool<Sqlite>,
    kind: LookupKind,
    id: i64,
    label: &str,
) -> ResvResult<DbLookup> {
    let sql = format!(
        "UPDATE {table} SET label = $2 WHERE {key} = $1 RETURNING {key} AS id, label",
        table = kind.table(),
        key = kind.key_column(),
    );

    sqlx::query_as::<_, DbLookup>(&sql)
        .bind(id)
        .bind(label)
        .fetch_optional(pool)
        .await
        .on_write(WriteAction::Update, kind.table())?
        .ok_or_else(|| ResvError::NotFound(format!("{} {}", kind.table(), id)))
}

/// Changes the key of a lookup value. Rows referencing the old key are
/// moved to the new one by the engine.
pub async fn rekey_lookup(
    pool: &Pool<Sqlite>,
    kind: LookupKind,
    id: i64,
    new_id: i64,
) -> ResvResult<DbLookup> {
    tracing::debug!("Re-keying {} {} -> {}", kind.table(), id, new_id);

    let sql = format!(
        "UPDATE {table} SET {key} = $2 WHERE {key} = $1 RETURNING {key} AS id, label",
        table = kind.table(),
        key = kind.key_column(),
    );

    sqlx::query_as::<_, DbLookup>(&sql)
        .bind(id)
        .bind(new_id)
        .fetch_optional(pool)
        .await
        .on_write(WriteAction::Update, kind.table())?
        .ok_or_else(|| ResvError::NotFound(format!("{} {}", kind.table(), id)))
}

pub async fn delete_lookup(pool: &Pool<Sqlite>, kind: LookupKind, id: i64) -> ResvResult<()> {
    let sql = format!(
        "DELETE FROM {table} WHERE {key} = $1",
        table = kind.table(),
        key = kind.key_column(),
    );

    let result = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .on_write(WriteAction::Delete, kind.table())?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("{} {}", kind.table(), id)));
    }
    Ok(())
}

#[derive(Debug, FromRow)]
struct LocalizedLookupRow {
    id: i64,
    label: String,
    trans_label: Option<String>,
    fallback_label: Option<String>,
}

/// Lists a vocabulary with each value's label in `lang_code`.
pub async fn list_localized_lookups(
    pool: &Pool<Sqlite>,
    kind: LookupKind,
    lang_code: &str,
    fallback: &TranslationFallback,
) -> ResvResult<Vec<Localized<Lookup>>> {
    let entity = kind.trans_entity();
    let sql = format!(
        "SELECT b.{key} AS id, b.label, t.label AS trans_label, f.label AS fallback_label \
         FROM {table} b \
         LEFT JOIN {trans} t ON t.{key} = b.{key} AND t.lang_code = $1 \
         LEFT JOIN {trans} f ON f.{key} = b.{key} AND f.lang_code = $2 \
         ORDER BY b.{key} ASC",
        key = kind.key_column(),
        table = kind.table(),
        trans = entity.trans_table(),
    );

    let fallback_code = fallback.locale_for(lang_code);
    let rows = sqlx::query_as::<_, LocalizedLookupRow>(&sql)
        .bind(lang_code)
        .bind(fallback_code)
        .fetch_all(pool)
        .await
        .on_read()?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let translation = match (row.trans_label, row.fallback_label) {
                (Some(label), _) => Some(Translation {
                    lang_code: lang_code.to_string(),
                    label,
                    detail: None,
                }),
                (None, Some(label)) => Some(Translation {
                    lang_code: fallback_code.to_string(),
                    label,
                    detail: None,
                }),
                (None, None) => None,
            };
            Localized {
                base: Lookup {
                    id: row.id,
                    label: row.label,
                },
                translation,
            }
        })
        .collect())
}
