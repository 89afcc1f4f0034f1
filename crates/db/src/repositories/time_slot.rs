use crate::error::{DbResultExt, WriteAction};
use crate::models::DbTimeSlot;
use chrono::{DateTime, NaiveDate, Utc};
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::keys::{ReservationKey, TimeSlotKey};
use roomresv_core::models::time_slot::NewTimeSlot;
use sqlx::{Pool, Sqlite};

/// Adds a slot to a reservation. `slot_id` is allocated within the
/// reservation.
pub async fn create_time_slot(
    pool: &Pool<Sqlite>,
    reservation: &ReservationKey,
    slot: &NewTimeSlot,
) -> ResvResult<DbTimeSlot> {
    tracing::debug!(
        "Creating time slot: reservation={}, start={}, end={}",
        reservation,
        slot.start_time,
        slot.end_time
    );

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (username, resv_id, slot_id, status, start_time, end_time)
        SELECT $1, $2, COALESCE(MAX(slot_id), 0) + 1, $3, $4, $5
        FROM time_slots
        WHERE username = $1 AND resv_id = $2
        RETURNING username, resv_id, slot_id, status, start_time, end_time
        "#,
    )
    .bind(&reservation.username)
    .bind(reservation.resv_id)
    .bind(slot.status)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "time_slots")?;

    Ok(time_slot)
}

pub async fn get_time_slots_by_reservation(
    pool: &Pool<Sqlite>,
    reservation: &ReservationKey,
) -> ResvResult<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT username, resv_id, slot_id, status, start_time, end_time
        FROM time_slots
        WHERE username = $1 AND resv_id = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(&reservation.username)
    .bind(reservation.resv_id)
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(time_slots)
}

pub async fn update_time_slot_status(
    pool: &Pool<Sqlite>,
    key: &TimeSlotKey,
    status: i64,
) -> ResvResult<DbTimeSlot> {
    sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET status = $4
        WHERE username = $1 AND resv_id = $2 AND slot_id = $3
        RETURNING username, resv_id, slot_id, status, start_time, end_time
        "#,
    )
    .bind(&key.username)
    .bind(key.resv_id)
    .bind(key.slot_id)
    .bind(status)
    .fetch_optional(pool)
    .await
    .on_write(WriteAction::Update, "time_slots")?
    .ok_or_else(|| ResvError::NotFound(format!("time slot {}", key)))
}

pub async fn delete_time_slot(pool: &Pool<Sqlite>, key: &TimeSlotKey) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE username = $1 AND resv_id = $2 AND slot_id = $3
        "#,
    )
    .bind(&key.username)
    .bind(key.resv_id)
    .bind(key.slot_id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "time_slots")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("time slot {}", key)));
    }
    Ok(())
}

pub async fn delete_time_slots_by_reservation(
    pool: &Pool<Sqlite>,
    reservation: &ReservationKey,
) -> ResvResult<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE username = $1 AND resv_id = $2
        "#,
    )
    .bind(&reservation.username)
    .bind(reservation.resv_id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "time_slots")?;

    Ok(result.rows_affected())
}

/// Slots owned by `username` that start on `date` (UTC).
pub async fn list_user_slots_on(
    pool: &Pool<Sqlite>,
    username: &str,
    date: NaiveDate,
) -> ResvResult<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT username, resv_id, slot_id, status, start_time, end_time
        FROM time_slots
        WHERE username = $1 AND date(start_time) = $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(username)
    .bind(date)
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(time_slots)
}

/// Slots booked in `room_id` that intersect `[start, end)`.
///
/// This is a read-only check; the store itself does not forbid overlapping
/// slots.
pub async fn find_overlapping_slots(
    pool: &Pool<Sqlite>,
    room_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ResvResult<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT ts.username, ts.resv_id, ts.slot_id, ts.status, ts.start_time, ts.end_time
        FROM time_slots ts
        JOIN reservations r ON r.username = ts.username AND r.resv_id = ts.resv_id
        WHERE r.room_id = $1 AND ts.start_time < $3 AND ts.end_time > $2
        ORDER BY ts.start_time ASC
        "#,
    )
    .bind(room_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(time_slots)
}
