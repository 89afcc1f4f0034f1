use chrono::{DateTime, NaiveTime, Utc};
use roomresv_core::i18n::Translation;
use roomresv_core::keys::{NoticeKey, ReservationKey, TimeSlotKey};
use roomresv_core::lookup::Lookup;
use roomresv_core::models::reservation::SlotListing;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbLanguage {
    pub lang_code: String,
    pub name: String,
}

/// Row of any lookup table, with its key column aliased to `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbLookup {
    pub id: i64,
    pub label: String,
}

impl From<DbLookup> for Lookup {
    fn from(row: DbLookup) -> Self {
        Lookup {
            id: row.id,
            label: row.label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: i64,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub room_id: i64,
    pub status: i64,
    pub name: String,
    pub capacity: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub room_type: i64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub session_id: i64,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub username: String,
    pub resv_id: i64,
    pub room_id: i64,
    pub privacy: i64,
    pub session_id: Option<i64>,
    pub title: String,
    pub note: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl DbReservation {
    pub fn key(&self) -> ReservationKey {
        ReservationKey::new(self.username.clone(), self.resv_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub username: String,
    pub resv_id: i64,
    pub slot_id: i64,
    pub status: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl DbTimeSlot {
    pub fn key(&self) -> TimeSlotKey {
        TimeSlotKey {
            username: self.username.clone(),
            resv_id: self.resv_id,
            slot_id: self.slot_id,
        }
    }
}

/// A slot joined with the reservation it belongs to.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbSlotListing {
    pub username: String,
    pub resv_id: i64,
    pub slot_id: i64,
    pub title: String,
    pub room_id: i64,
    pub privacy: i64,
    pub status: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<DbSlotListing> for SlotListing {
    fn from(row: DbSlotListing) -> Self {
        SlotListing {
            username: Some(row.username),
            resv_id: Some(row.resv_id),
            slot_id: Some(row.slot_id),
            title: Some(row.title),
            room_id: row.room_id,
            privacy: row.privacy,
            status: row.status,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbNotice {
    pub username: String,
    pub notice_id: i64,
    pub title: String,
    pub content: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl DbNotice {
    pub fn key(&self) -> NoticeKey {
        NoticeKey::new(self.username.clone(), self.notice_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbSetting {
    pub id: i64,
    pub name: String,
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbPeriod {
    pub period_id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Translation row with its text columns aliased to `label`/`detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DbTranslation {
    pub lang_code: String,
    pub label: String,
    pub detail: Option<String>,
}

impl From<DbTranslation> for Translation {
    fn from(row: DbTranslation) -> Self {
        Translation {
            lang_code: row.lang_code,
            label: row.label,
            detail: row.detail,
        }
    }
}
