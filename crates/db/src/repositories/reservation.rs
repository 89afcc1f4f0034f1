use crate::error::{DbResultExt, WriteAction};
use crate::models::{DbReservation, DbSlotListing};
use chrono::{DateTime, Utc};
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::keys::ReservationKey;
use roomresv_core::models::reservation::{
    NewReservation, ReservationQuery, ReservationUpdate, SlotListing,
};
use sqlx::{Pool, QueryBuilder, Sqlite};

/// Creates a reservation owned by `username`.
///
/// `resv_id` is allocated within the owner's namespace (one past the
/// highest id they hold) by the inserting statement itself.
pub async fn create_reservation(
    pool: &Pool<Sqlite>,
    username: &str,
    reservation: &NewReservation,
) -> ResvResult<DbReservation> {
    create_reservation_at(pool, username, reservation, Utc::now()).await
}

/// Same as [`create_reservation`] with an explicit creation time.
pub async fn create_reservation_at(
    pool: &Pool<Sqlite>,
    username: &str,
    reservation: &NewReservation,
    now: DateTime<Utc>,
) -> ResvResult<DbReservation> {
    tracing::debug!(
        "Creating reservation: username={}, room_id={}, title={}",
        username,
        reservation.room_id,
        reservation.title
    );

    let created = sqlx::query_as::<_, DbReservation>(
        r#"
        INSERT INTO reservations
            (username, resv_id, room_id, privacy, session_id, title, note, create_time, update_time)
        SELECT $1, COALESCE(MAX(resv_id), 0) + 1, $2, $3, $4, $5, $6, $7, $7
        FROM reservations
        WHERE username = $1
        RETURNING username, resv_id, room_id, privacy, session_id, title, note, create_time, update_time
        "#,
    )
    .bind(username)
    .bind(reservation.room_id)
    .bind(reservation.privacy)
    .bind(reservation.session_id)
    .bind(&reservation.title)
    .bind(&reservation.note)
    .bind(now)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "reservations")?;

    tracing::debug!("Reservation created: {}", created.key());
    Ok(created)
}

pub async fn get_reservation(
    pool: &Pool<Sqlite>,
    key: &ReservationKey,
) -> ResvResult<Option<DbReservation>> {
    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT username, resv_id, room_id, privacy, session_id, title, note, create_time, update_time
        FROM reservations
        WHERE username = $1 AND resv_id = $2
        "#,
    )
    .bind(&key.username)
    .bind(key.resv_id)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(reservation)
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &ReservationQuery) {
    builder.push(" WHERE 1 = 1");
    if let Some(username) = &query.username {
        builder.push(" AND r.username = ").push_bind(username.clone());
    }
    if let Some(room_id) = query.room_id {
        builder.push(" AND r.room_id = ").push_bind(room_id);
    }
    if let Some(session_id) = query.session_id {
        builder.push(" AND r.session_id = ").push_bind(session_id);
    }
    if let Some(privacy) = query.privacy {
        builder.push(" AND r.privacy = ").push_bind(privacy);
    }
    if let Some(date) = query.create_date {
        builder.push(" AND date(r.create_time) = ").push_bind(date);
    }
    if let Some(date) = query.update_date {
        builder.push(" AND date(r.update_time) = ").push_bind(date);
    }
}

/// Lists reservations matching `query`, oldest first.
pub async fn list_reservations(
    pool: &Pool<Sqlite>,
    query: &ReservationQuery,
) -> ResvResult<Vec<DbReservation>> {
    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT r.username, r.resv_id, r.room_id, r.privacy, r.session_id, r.title, r.note, \
         r.create_time, r.update_time FROM reservations r",
    );
    push_filters(&mut builder, query);
    if let Some(date) = query.slot_date {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM time_slots ts \
                 WHERE ts.username = r.username AND ts.resv_id = r.resv_id \
                 AND date(ts.start_time) = ",
            )
            .push_bind(date)
            .push(")");
    }
    builder.push(" ORDER BY r.create_time ASC, r.username ASC, r.resv_id ASC");

    let reservations = builder
        .build_query_as::<DbReservation>()
        .fetch_all(pool)
        .await
        .on_read()?;

    Ok(reservations)
}

/// Lists the slots of reservations matching `query` as other users may see
/// them: each listing is masked according to its reservation's privacy.
pub async fn list_public_slots(
    pool: &Pool<Sqlite>,
    query: &ReservationQuery,
) -> ResvResult<Vec<SlotListing>> {
    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT r.username, r.resv_id, ts.slot_id, r.title, r.room_id, r.privacy, ts.status, \
         ts.start_time, ts.end_time \
         FROM reservations r \
         JOIN time_slots ts ON ts.username = r.username AND ts.resv_id = r.resv_id",
    );
    push_filters(&mut builder, query);
    if let Some(date) = query.slot_date {
        builder.push(" AND date(ts.start_time) = ").push_bind(date);
    }
    builder.push(" ORDER BY ts.start_time ASC, ts.end_time ASC");

    let rows = builder
        .build_query_as::<DbSlotListing>()
        .fetch_all(pool)
        .await
        .on_read()?;

    Ok(rows
        .into_iter()
        .map(|row| SlotListing::from(row).masked())
        .collect())
}

/// Applies `update` and stamps `update_time`.
pub async fn update_reservation(
    pool: &Pool<Sqlite>,
    key: &ReservationKey,
    update: &ReservationUpdate,
) -> ResvResult<DbReservation> {
    let reservation = get_reservation(pool, key)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("reservation {}", key)))?;

    if update.is_empty() {
        return Ok(reservation);
    }

    let updated = sqlx::query_as::<_, DbReservation>(
        r#"
        UPDATE reservations
        SET room_id = $3, privacy = $4, session_id = $5, title = $6, note = $7, update_time = $8
        WHERE username = $1 AND resv_id = $2
        RETURNING username, resv_id, room_id, privacy, session_id, title, note, create_time, update_time
        "#,
    )
    .bind(&key.username)
    .bind(key.resv_id)
    .bind(update.room_id.unwrap_or(reservation.room_id))
    .bind(update.privacy.unwrap_or(reservation.privacy))
    .bind(update.session_id.unwrap_or(reservation.session_id))
    .bind(update.title.as_deref().unwrap_or(&reservation.title))
    .bind(match &update.note {
        Some(note) => note.as_deref(),
        None => reservation.note.as_deref(),
    })
    .bind(Utc::now().max(reservation.create_time))
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Update, "reservations")?;

    Ok(updated)
}

pub async fn delete_reservation(pool: &Pool<Sqlite>, key: &ReservationKey) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM reservations
        WHERE username = $1 AND resv_id = $2
        "#,
    )
    .bind(&key.username)
    .bind(key.resv_id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "reservations")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("reservation {}", key)));
    }
    Ok(())
}
