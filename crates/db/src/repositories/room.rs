use crate::error::{DbResultExt, WriteAction};
use crate::models::DbRoom;
use crate::repositories::translation::localized_text;
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::i18n::{EntityKey, Localized, TransEntity, TranslationFallback};
use roomresv_core::models::room::{NewRoom, RoomFilter, RoomUpdate};
use sqlx::{Pool, Sqlite};

pub async fn create_room(pool: &Pool<Sqlite>, room: &NewRoom) -> ResvResult<DbRoom> {
    tracing::debug!(
        "Creating room: room_id={:?}, name={}, type={}",
        room.room_id,
        room.name,
        room.room_type
    );

    let created = sqlx::query_as::<_, DbRoom>(
        r#"
        INSERT INTO rooms (room_id, status, name, capacity, type, image)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING room_id, status, name, capacity, type, image
        "#,
    )
    .bind(room.room_id)
    .bind(room.status)
    .bind(&room.name)
    .bind(room.capacity)
    .bind(room.room_type)
    .bind(&room.image)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "rooms")?;

    Ok(created)
}

pub async fn get_room(pool: &Pool<Sqlite>, room_id: i64) -> ResvResult<Option<DbRoom>> {
    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT room_id, status, name, capacity, type, image
        FROM rooms
        WHERE room_id = $1
        "#,
    )
    .bind(room_id)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(room)
}

pub async fn list_rooms(pool: &Pool<Sqlite>, filter: &RoomFilter) -> ResvResult<Vec<DbRoom>> {
    let rooms = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT room_id, status, name, capacity, type, image
        FROM rooms
        WHERE ($1 IS NULL OR status = $1)
          AND ($2 IS NULL OR type = $2)
        ORDER BY room_id ASC
        "#,
    )
    .bind(filter.status)
    .bind(filter.room_type)
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(rooms)
}

pub async fn update_room(
    pool: &Pool<Sqlite>,
    room_id: i64,
    update: &RoomUpdate,
) -> ResvResult<DbRoom> {
    let room = get_room(pool, room_id)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("room {}", room_id)))?;

    let updated = sqlx::query_as::<_, DbRoom>(
        r#"
        UPDATE rooms
        SET status = $2, name = $3, capacity = $4, type = $5, image = $6
        WHERE room_id = $1
        RETURNING room_id, status, name, capacity, type, image
        "#,
    )
    .bind(room_id)
    .bind(update.status.unwrap_or(room.status))
    .bind(update.name.as_deref().unwrap_or(&room.name))
    .bind(update.capacity.unwrap_or(room.capacity))
    .bind(update.room_type.unwrap_or(room.room_type))
    .bind(match &update.image {
        Some(image) => image.as_deref(),
        None => room.image.as_deref(),
    })
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Update, "rooms")?;

    Ok(updated)
}

/// Changes a room's id; reservations and translations follow it.
pub async fn rekey_room(pool: &Pool<Sqlite>, room_id: i64, new_id: i64) -> ResvResult<DbRoom> {
    sqlx::query_as::<_, DbRoom>(
        r#"
        UPDATE rooms
        SET room_id = $2
        WHERE room_id = $1
        RETURNING room_id, status, name, capacity, type, image
        "#,
    )
    .bind(room_id)
    .bind(new_id)
    .fetch_optional(pool)
    .await
    .on_write(WriteAction::Update, "rooms")?
    .ok_or_else(|| ResvError::NotFound(format!("room {}", room_id)))
}

pub async fn delete_room(pool: &Pool<Sqlite>, room_id: i64) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM rooms
        WHERE room_id = $1
        "#,
    )
    .bind(room_id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "rooms")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("room {}", room_id)));
    }
    Ok(())
}

/// Reads a room together with its name in `lang_code`.
pub async fn get_localized_room(
    pool: &Pool<Sqlite>,
    room_id: i64,
    lang_code: &str,
    fallback: &TranslationFallback,
) -> ResvResult<Localized<DbRoom>> {
    let room = get_room(pool, room_id)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("room {}", room_id)))?;

    let translation = localized_text(
        pool,
        TransEntity::Room,
        &EntityKey::Id(room_id),
        lang_code,
        fallback,
    )
    .await?;

    Ok(Localized {
        base: room,
        translation,
    })
}
