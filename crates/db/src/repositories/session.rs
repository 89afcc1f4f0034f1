use crate::error::{DbResultExt, WriteAction};
use crate::models::DbSession;
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::models::session::{NewSession, SessionUpdate};
use sqlx::{Pool, Sqlite};

/// Creates a session. A session created as current takes the flag from
/// every other session.
pub async fn create_session(pool: &Pool<Sqlite>, session: &NewSession) -> ResvResult<DbSession> {
    tracing::debug!(
        "Creating session: session_id={:?}, name={}, start={}, end={}",
        session.session_id,
        session.name,
        session.start_time,
        session.end_time
    );

    let mut tx = pool.begin().await.on_read()?;

    if session.is_current {
        sqlx::query("UPDATE sessions SET is_current = 0 WHERE is_current = 1")
            .execute(&mut *tx)
            .await
            .on_write(WriteAction::Update, "sessions")?;
    }

    let created = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (session_id, name, start_time, end_time, is_current)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING session_id, name, start_time, end_time, is_current
        "#,
    )
    .bind(session.session_id)
    .bind(&session.name)
    .bind(session.start_time)
    .bind(session.end_time)
    .bind(session.is_current)
    .fetch_one(&mut *tx)
    .await
    .on_write(WriteAction::Insert, "sessions")?;

    tx.commit().await.on_read()?;
    Ok(created)
}

pub async fn get_session(pool: &Pool<Sqlite>, session_id: i64) -> ResvResult<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT session_id, name, start_time, end_time, is_current
        FROM sessions
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(session)
}

pub async fn list_sessions(pool: &Pool<Sqlite>) -> ResvResult<Vec<DbSession>> {
    let sessions = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT session_id, name, start_time, end_time, is_current
        FROM sessions
        ORDER BY start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(sessions)
}

pub async fn get_current_session(pool: &Pool<Sqlite>) -> ResvResult<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT session_id, name, start_time, end_time, is_current
        FROM sessions
        WHERE is_current = 1
        ORDER BY start_time DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(session)
}

/// Marks `session_id` as the current session and clears the flag on every
/// other session, atomically.
pub async fn set_current_session(pool: &Pool<Sqlite>, session_id: i64) -> ResvResult<DbSession> {
    let mut tx = pool.begin().await.on_read()?;

    sqlx::query("UPDATE sessions SET is_current = 0 WHERE session_id <> $1")
        .bind(session_id)
        .execute(&mut *tx)
        .await
        .on_write(WriteAction::Update, "sessions")?;

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        UPDATE sessions
        SET is_current = 1
        WHERE session_id = $1
        RETURNING session_id, name, start_time, end_time, is_current
        "#,
    )
    .bind(session_id)
    .fetch_optional(&mut *tx)
    .await
    .on_write(WriteAction::Update, "sessions")?
    .ok_or_else(|| ResvError::NotFound(format!("session {}", session_id)))?;

    tx.commit().await.on_read()?;
    tracing::debug!("Current session is now {}", session_id);
    Ok(session)
}

pub async fn update_session(
    pool: &Pool<Sqlite>,
    session_id: i64,
    update: &SessionUpdate,
) -> ResvResult<DbSession> {
    let session = get_session(pool, session_id)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("session {}", session_id)))?;

    let updated = sqlx::query_as::<_, DbSession>(
        r#"
        UPDATE sessions
        SET name = $2, start_time = $3, end_time = $4
        WHERE session_id = $1
        RETURNING session_id, name, start_time, end_time, is_current
        "#,
    )
    .bind(session_id)
    .bind(update.name.as_deref().unwrap_or(&session.name))
    .bind(update.start_time.unwrap_or(session.start_time))
    .bind(update.end_time.unwrap_or(session.end_time))
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Update, "sessions")?;

    Ok(updated)
}

pub async fn rekey_session(
    pool: &Pool<Sqlite>,
    session_id: i64,
    new_id: i64,
) -> ResvResult<DbSession> {
    sqlx::query_as::<_, DbSession>(
        r#"
        UPDATE sessions
        SET session_id = $2
        WHERE session_id = $1
        RETURNING session_id, name, start_time, end_time, is_current
        "#,
    )
    .bind(session_id)
    .bind(new_id)
    .fetch_optional(pool)
    .await
    .on_write(WriteAction::Update, "sessions")?
    .ok_or_else(|| ResvError::NotFound(format!("session {}", session_id)))
}

pub async fn delete_session(pool: &Pool<Sqlite>, session_id: i64) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "sessions")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("session {}", session_id)));
    }
    Ok(())
}
