//! Translation rows for every translatable entity.
//!
//! Base rows and their translations are written independently: upserting or
//! deleting a translation never touches the base row, and a base row cannot
//! be deleted while translations reference it.

use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::i18n::{EntityKey, TransEntity, Translation, TranslationFallback, TranslationText};
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Pool, Sqlite};

use crate::error::{DbResultExt, WriteAction};
use crate::models::DbTranslation;

/// Binds the columns of `key` in key-column order.
pub(crate) fn bind_key<'q, O>(
    query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    key: &EntityKey,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    match key {
        EntityKey::Id(id) => query.bind(*id),
        EntityKey::Name(name) => query.bind(name.clone()),
        EntityKey::Owned { username, id } => query.bind(username.clone()).bind(*id),
    }
}

/// `alias.k1 = $1 AND alias.k2 = $2`
pub(crate) fn key_filter(entity: TransEntity, alias: &str) -> String {
    entity
        .key_columns()
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{alias}.{column} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `left.k1 = right.k1 AND left.k2 = right.k2`
pub(crate) fn key_join(entity: TransEntity, left: &str, right: &str) -> String {
    entity
        .key_columns()
        .iter()
        .map(|column| format!("{left}.{column} = {right}.{column}"))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Selects the detail column under `alias`, or NULL for label-only entities.
pub(crate) fn detail_expr(entity: TransEntity, alias: &str) -> String {
    match entity.detail_column() {
        Some(column) => format!("{alias}.{column}"),
        None => "NULL".to_string(),
    }
}

fn projection(entity: TransEntity) -> String {
    format!(
        "lang_code, {} AS label, {} AS detail",
        entity.label_column(),
        entity.detail_column().unwrap_or("NULL")
    )
}

pub async fn upsert_translation(
    pool: &Pool<Sqlite>,
    entity: TransEntity,
    key: &EntityKey,
    lang_code: &str,
    text: &TranslationText,
) -> ResvResult<Translation> {
    key.check_for(entity)?;
    if text.detail.is_some() && entity.detail_column().is_none() {
        return Err(ResvError::Validation(format!(
            "{} has no detail text",
            entity.trans_table()
        )));
    }

    let keys = entity.key_columns();
    let mut columns: Vec<&str> = keys.to_vec();
    columns.push("lang_code");
    columns.push(entity.label_column());
    let mut updates = vec![format!("{0} = excluded.{0}", entity.label_column())];
    if let Some(detail) = entity.detail_column() {
        columns.push(detail);
        updates.push(format!("{0} = excluded.{0}", detail));
    }
    let placeholders = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "INSERT INTO {table} ({columns}) VALUES ({placeholders}) \
         ON CONFLICT ({keys}, lang_code) DO UPDATE SET {updates} \
         RETURNING {projection}",
        table = entity.trans_table(),
        columns = columns.join(", "),
        keys = keys.join(", "),
        updates = updates.join(", "),
        projection = projection(entity),
    );

    tracing::debug!(
        "Upserting {} translation: key={:?}, lang={}",
        entity.trans_table(),
        key,
        lang_code
    );

    let mut query = bind_key(sqlx::query_as::<_, DbTranslation>(&sql), key)
        .bind(lang_code.to_string())
        .bind(text.label.clone());
    if entity.detail_column().is_some() {
        query = query.bind(text.detail.clone());
    }

    let row = query
        .fetch_one(pool)
        .await
        .on_write(WriteAction::Insert, entity.trans_table())?;

    Ok(row.into())
}

pub async fn get_translation(
    pool: &Pool<Sqlite>,
    entity: TransEntity,
    key: &EntityKey,
    lang_code: &str,
) -> ResvResult<Option<Translation>> {
    key.check_for(entity)?;
    let sql = format!(
        "SELECT {projection} FROM {table} t WHERE {filter} AND t.lang_code = ${lang}",
        projection = projection(entity),
        table = entity.trans_table(),
        filter = key_filter(entity, "t"),
        lang = entity.key_columns().len() + 1,
    );

    let row = bind_key(sqlx::query_as::<_, DbTranslation>(&sql), key)
        .bind(lang_code.to_string())
        .fetch_optional(pool)
        .await
        .on_read()?;

    Ok(row.map(Into::into))
}

pub async fn list_translations(
    pool: &Pool<Sqlite>,
    entity: TransEntity,
    key: &EntityKey,
) -> ResvResult<Vec<Translation>> {
    key.check_for(entity)?;
    let sql = format!(
        "SELECT {projection} FROM {table} t WHERE {filter} ORDER BY t.lang_code ASC",
        projection = projection(entity),
        table = entity.trans_table(),
        filter = key_filter(entity, "t"),
    );

    let rows = bind_key(sqlx::query_as::<_, DbTranslation>(&sql), key)
        .fetch_all(pool)
        .await
        .on_read()?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn delete_translation(
    pool: &Pool<Sqlite>,
    entity: TransEntity,
    key: &EntityKey,
    lang_code: &str,
) -> ResvResult<()> {
    key.check_for(entity)?;
    let sql = format!(
        "DELETE FROM {table} WHERE {filter} AND lang_code = ${lang} RETURNING {projection}",
        table = entity.trans_table(),
        filter = key_filter(entity, entity.trans_table()),
        lang = entity.key_columns().len() + 1,
        projection = projection(entity),
    );

    let deleted = bind_key(sqlx::query_as::<_, DbTranslation>(&sql), key)
        .bind(lang_code.to_string())
        .fetch_optional(pool)
        .await
        .on_write(WriteAction::Delete, entity.trans_table())?;

    match deleted {
        Some(_) => Ok(()),
        None => Err(ResvError::NotFound(format!(
            "{} translation {:?} for {}",
            entity.trans_table(),
            key,
            lang_code
        ))),
    }
}

#[derive(Debug, FromRow)]
struct LocalizedRow {
    label: Option<String>,
    detail: Option<String>,
    fallback_label: Option<String>,
    fallback_detail: Option<String>,
}

/// Reads the text of one base row in `lang_code`.
///
/// Returns `NotFound` when the base row does not exist and `Ok(None)` when
/// neither the requested locale nor the fallback locale has a translation.
pub async fn localized_text(
    pool: &Pool<Sqlite>,
    entity: TransEntity,
    key: &EntityKey,
    lang_code: &str,
    fallback: &TranslationFallback,
) -> ResvResult<Option<Translation>> {
    key.check_for(entity)?;
    let n = entity.key_columns().len();
    let sql = format!(
        "SELECT t.{label} AS label, {t_detail} AS detail, \
                f.{label} AS fallback_label, {f_detail} AS fallback_detail \
         FROM {base} b \
         LEFT JOIN {trans} t ON {t_join} AND t.lang_code = ${lang} \
         LEFT JOIN {trans} f ON {f_join} AND f.lang_code = ${fallback} \
         WHERE {filter}",
        label = entity.label_column(),
        t_detail = detail_expr(entity, "t"),
        f_detail = detail_expr(entity, "f"),
        base = entity.base_table(),
        trans = entity.trans_table(),
        t_join = key_join(entity, "t", "b"),
        f_join = key_join(entity, "f", "b"),
        filter = key_filter(entity, "b"),
        lang = n + 1,
        fallback = n + 2,
    );

    let fallback_code = fallback.locale_for(lang_code);
    let row = bind_key(sqlx::query_as::<_, LocalizedRow>(&sql), key)
        .bind(lang_code.to_string())
        .bind(fallback_code.to_string())
        .fetch_optional(pool)
        .await
        .on_read()?
        .ok_or_else(|| {
            ResvError::NotFound(format!("{} row {:?}", entity.base_table(), key))
        })?;

    Ok(pick_translation(row, lang_code, fallback_code))
}

fn pick_translation(row: LocalizedRow, lang_code: &str, fallback_code: &str) -> Option<Translation> {
    if let Some(label) = row.label {
        return Some(Translation {
            lang_code: lang_code.to_string(),
            label,
            detail: row.detail,
        });
    }
    row.fallback_label.map(|label| Translation {
        lang_code: fallback_code.to_string(),
        label,
        detail: row.fallback_detail,
    })
}
