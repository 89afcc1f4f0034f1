use crate::error::{DbResultExt, WriteAction};
use crate::models::DbPeriod;
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::models::period::{NewPeriod, PeriodUpdate};
use sqlx::{Pool, Sqlite};

pub async fn create_period(pool: &Pool<Sqlite>, period: &NewPeriod) -> ResvResult<DbPeriod> {
    tracing::debug!(
        "Creating period: period_id={:?}, start={}, end={}",
        period.period_id,
        period.start_time,
        period.end_time
    );

    let created = sqlx::query_as::<_, DbPeriod>(
        r#"
        INSERT INTO periods (period_id, start_time, end_time)
        VALUES ($1, $2, $3)
        RETURNING period_id, start_time, end_time
        "#,
    )
    .bind(period.period_id)
    .bind(period.start_time)
    .bind(period.end_time)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "periods")?;

    Ok(created)
}

pub async fn get_period(pool: &Pool<Sqlite>, period_id: i64) -> ResvResult<Option<DbPeriod>> {
    let period = sqlx::query_as::<_, DbPeriod>(
        r#"
        SELECT period_id, start_time, end_time
        FROM periods
        WHERE period_id = $1
        "#,
    )
    .bind(period_id)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(period)
}

/// Lists periods in time-of-day order.
pub async fn list_periods(pool: &Pool<Sqlite>) -> ResvResult<Vec<DbPeriod>> {
    let periods = sqlx::query_as::<_, DbPeriod>(
        r#"
        SELECT period_id, start_time, end_time
        FROM periods
        ORDER BY start_time ASC, end_time ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(periods)
}

pub async fn update_period(
    pool: &Pool<Sqlite>,
    period_id: i64,
    update: &PeriodUpdate,
) -> ResvResult<DbPeriod> {
    let period = get_period(pool, period_id)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("period {}", period_id)))?;

    let updated = sqlx::query_as::<_, DbPeriod>(
        r#"
        UPDATE periods
        SET start_time = $2, end_time = $3
        WHERE period_id = $1
        RETURNING period_id, start_time, end_time
        "#,
    )
    .bind(period_id)
    .bind(update.start_time.unwrap_or(period.start_time))
    .bind(update.end_time.unwrap_or(period.end_time))
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Update, "periods")?;

    Ok(updated)
}

pub async fn delete_period(pool: &Pool<Sqlite>, period_id: i64) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM periods
        WHERE period_id = $1
        "#,
    )
    .bind(period_id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "periods")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("period {}", period_id)));
    }
    Ok(())
}
