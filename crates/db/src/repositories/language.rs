use crate::error::{DbResultExt, WriteAction};
use crate::models::DbLanguage;
use roomresv_core::errors::{ResvError, ResvResult};
use sqlx::{Pool, Sqlite};

pub async fn create_language(
    pool: &Pool<Sqlite>,
    lang_code: &str,
    name: &str,
) -> ResvResult<DbLanguage> {
    tracing::debug!("Creating language: lang_code={}, name={}", lang_code, name);

    let language = sqlx::query_as::<_, DbLanguage>(
        r#"
        INSERT INTO languages (lang_code, name)
        VALUES ($1, $2)
        RETURNING lang_code, name
        "#,
    )
    .bind(lang_code)
    .bind(name)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "languages")?;

    Ok(language)
}

pub async fn get_language(pool: &Pool<Sqlite>, lang_code: &str) -> ResvResult<Option<DbLanguage>> {
    let language = sqlx::query_as::<_, DbLanguage>(
        r#"
        SELECT lang_code, name
        FROM languages
        WHERE lang_code = $1
        "#,
    )
    .bind(lang_code)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(language)
}

pub async fn list_languages(pool: &Pool<Sqlite>) -> ResvResult<Vec<DbLanguage>> {
    let languages = sqlx::query_as::<_, DbLanguage>(
        r#"
        SELECT lang_code, name
        FROM languages
        ORDER BY lang_code ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(languages)
}

/// Changes a locale code; every translation row follows it.
pub async fn rekey_language(
    pool: &Pool<Sqlite>,
    lang_code: &str,
    new_code: &str,
) -> ResvResult<DbLanguage> {
    tracing::debug!("Re-keying language {} -> {}", lang_code, new_code);

    sqlx::query_as::<_, DbLanguage>(
        r#"
        UPDATE languages
        SET lang_code = $2
        WHERE lang_code = $1
        RETURNING lang_code, name
        "#,
    )
    .bind(lang_code)
    .bind(new_code)
    .fetch_optional(pool)
    .await
    .on_write(WriteAction::Update, "languages")?
    .ok_or_else(|| ResvError::NotFound(format!("language {}", lang_code)))
}

pub async fn delete_language(pool: &Pool<Sqlite>, lang_code: &str) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM languages
        WHERE lang_code = $1
        "#,
    )
    .bind(lang_code)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "languages")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("language {}", lang_code)));
    }
    Ok(())
}
