use crate::error::{DbResultExt, WriteAction};
use crate::models::DbNotice;
use chrono::Utc;
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::keys::NoticeKey;
use roomresv_core::models::notice::{NewNotice, NoticeUpdate};
use sqlx::{Pool, Sqlite};

/// Publishes a notice authored by `username`; `notice_id` is allocated per
/// author.
pub async fn create_notice(
    pool: &Pool<Sqlite>,
    username: &str,
    notice: &NewNotice,
) -> ResvResult<DbNotice> {
    let now = Utc::now();

    let created = sqlx::query_as::<_, DbNotice>(
        r#"
        INSERT INTO notices (username, notice_id, title, content, create_time, update_time)
        SELECT $1, COALESCE(MAX(notice_id), 0) + 1, $2, $3, $4, $4
        FROM notices
        WHERE username = $1
        RETURNING username, notice_id, title, content, create_time, update_time
        "#,
    )
    .bind(username)
    .bind(&notice.title)
    .bind(&notice.content)
    .bind(now)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "notices")?;

    tracing::debug!("Notice created: {}", created.key());
    Ok(created)
}

pub async fn get_notice(pool: &Pool<Sqlite>, key: &NoticeKey) -> ResvResult<Option<DbNotice>> {
    let notice = sqlx::query_as::<_, DbNotice>(
        r#"
        SELECT username, notice_id, title, content, create_time, update_time
        FROM notices
        WHERE username = $1 AND notice_id = $2
        "#,
    )
    .bind(&key.username)
    .bind(key.notice_id)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(notice)
}

/// Lists notices, optionally by one author, oldest first.
pub async fn list_notices(pool: &Pool<Sqlite>, username: Option<&str>) -> ResvResult<Vec<DbNotice>> {
    let notices = sqlx::query_as::<_, DbNotice>(
        r#"
        SELECT username, notice_id, title, content, create_time, update_time
        FROM notices
        WHERE $1 IS NULL OR username = $1
        ORDER BY create_time ASC, update_time ASC
        "#,
    )
    .bind(username)
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(notices)
}

pub async fn update_notice(
    pool: &Pool<Sqlite>,
    key: &NoticeKey,
    update: &NoticeUpdate,
) -> ResvResult<DbNotice> {
    let notice = get_notice(pool, key)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("notice {}", key)))?;

    let updated = sqlx::query_as::<_, DbNotice>(
        r#"
        UPDATE notices
        SET title = $3, content = $4, update_time = $5
        WHERE username = $1 AND notice_id = $2
        RETURNING username, notice_id, title, content, create_time, update_time
        "#,
    )
    .bind(&key.username)
    .bind(key.notice_id)
    .bind(update.title.as_deref().unwrap_or(&notice.title))
    .bind(update.content.as_deref().unwrap_or(&notice.content))
    .bind(Utc::now().max(notice.create_time))
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Update, "notices")?;

    Ok(updated)
}

pub async fn delete_notice(pool: &Pool<Sqlite>, key: &NoticeKey) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM notices
        WHERE username = $1 AND notice_id = $2
        "#,
    )
    .bind(&key.username)
    .bind(key.notice_id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "notices")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("notice {}", key)));
    }
    Ok(())
}
