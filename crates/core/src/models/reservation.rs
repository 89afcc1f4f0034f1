use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::lookup::resv_privacy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub room_id: i64,
    pub privacy: i64,
    pub session_id: Option<i64>,
    pub title: String,
    pub note: Option<String>,
}

/// Partial update. For the nullable `session_id` and `note`, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub room_id: Option<i64>,
    pub privacy: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_id: Option<Option<i64>>,
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<Option<String>>,
}

impl ReservationUpdate {
    pub fn is_empty(&self) -> bool {
        self.room_id.is_none()
            && self.privacy.is_none()
            && self.session_id.is_none()
            && self.title.is_none()
            && self.note.is_none()
    }
}

/// Filters for reservation listings. Unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationQuery {
    pub username: Option<String>,
    pub room_id: Option<i64>,
    pub session_id: Option<i64>,
    pub privacy: Option<i64>,
    /// Calendar day (UTC) the reservation was created on.
    pub create_date: Option<NaiveDate>,
    pub update_date: Option<NaiveDate>,
    /// Calendar day (UTC) one of its slots starts on.
    pub slot_date: Option<NaiveDate>,
}

/// One time slot as shown on a shared calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotListing {
    pub username: Option<String>,
    pub resv_id: Option<i64>,
    pub slot_id: Option<i64>,
    pub title: Option<String>,
    pub room_id: i64,
    pub privacy: i64,
    pub status: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl SlotListing {
    /// Strips what the reservation's privacy level hides from other users.
    ///
    /// Anonymous reservations lose their owner; private ones keep only the
    /// room, the time range and the status.
    pub fn masked(mut self) -> Self {
        match self.privacy {
            resv_privacy::ANONYMOUS => {
                self.username = None;
            }
            resv_privacy::PRIVATE => {
                self.username = None;
                self.resv_id = None;
                self.slot_id = None;
                self.title = None;
            }
            _ => {}
        }
        self
    }
}
