#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use roomresv_core::lookup::{LookupKind, resv_privacy, resv_status, role, room_status};
use roomresv_core::models::reservation::NewReservation;
use roomresv_core::models::room::NewRoom;
use roomresv_core::models::time_slot::NewTimeSlot;
use roomresv_core::models::user::NewUser;
use roomresv_db::DbPool;
use roomresv_db::models::{DbReservation, DbRoom, DbUser};
use roomresv_db::repositories::{lookup, reservation, room, user};

pub const CLASSROOM: i64 = 1;

/// 2024-05-01 at `hour:minute` UTC.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0).unwrap()
}

pub async fn add_user(pool: &DbPool, username: &str) -> DbUser {
    user::create_user(
        pool,
        &NewUser {
            username: username.to_string(),
            name: format!("{} Example", username),
            password: "secret".to_string(),
            role: role::BASIC,
            email: format!("{}@example.com", username),
        },
    )
    .await
    .expect("Failed to create user")
}

pub async fn add_room_type(pool: &DbPool) {
    lookup::create_lookup(pool, LookupKind::RoomType, CLASSROOM, "Classroom")
        .await
        .expect("Failed to create room type");
}

pub fn new_room(room_id: i64, name: &str) -> NewRoom {
    NewRoom {
        room_id: Some(room_id),
        status: room_status::AVAILABLE,
        name: name.to_string(),
        capacity: 12,
        room_type: CLASSROOM,
        image: None,
    }
}

pub async fn add_room(pool: &DbPool, room_id: i64) -> DbRoom {
    room::create_room(pool, &new_room(room_id, &format!("Room {}", room_id)))
        .await
        .expect("Failed to create room")
}

pub fn meeting(room_id: i64, privacy: i64) -> NewReservation {
    NewReservation {
        room_id,
        privacy,
        session_id: None,
        title: "Meeting".to_string(),
        note: None,
    }
}

pub async fn add_reservation(pool: &DbPool, username: &str, room_id: i64) -> DbReservation {
    reservation::create_reservation_at(
        pool,
        username,
        &meeting(room_id, resv_privacy::PUBLIC),
        at(8, 0),
    )
    .await
    .expect("Failed to create reservation")
}

pub fn slot(start: DateTime<Utc>, end: DateTime<Utc>) -> NewTimeSlot {
    NewTimeSlot {
        status: resv_status::PENDING,
        start_time: start,
        end_time: end,
    }
}

/// Room type 1, room 5 and user "alice".
pub async fn basic_fixture(pool: &DbPool) {
    add_room_type(pool).await;
    add_room(pool, 5).await;
    add_user(pool, "alice").await;
}
