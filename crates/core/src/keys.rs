//! Compound keys for rows whose identity is scoped to their owner.
//!
//! Reservation and notice ids are only unique within one user's namespace,
//! and slot ids only within one reservation, so the full key always travels
//! together.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationKey {
    pub username: String,
    pub resv_id: i64,
}

impl ReservationKey {
    pub fn new(username: impl Into<String>, resv_id: i64) -> Self {
        Self {
            username: username.into(),
            resv_id,
        }
    }

    /// Key of the `slot_id`-th slot of this reservation.
    pub fn slot(&self, slot_id: i64) -> TimeSlotKey {
        TimeSlotKey {
            username: self.username.clone(),
            resv_id: self.resv_id,
            slot_id,
        }
    }
}

impl fmt::Display for ReservationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.username, self.resv_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlotKey {
    pub username: String,
    pub resv_id: i64,
    pub slot_id: i64,
}

impl TimeSlotKey {
    pub fn reservation(&self) -> ReservationKey {
        ReservationKey::new(self.username.clone(), self.resv_id)
    }
}

impl fmt::Display for TimeSlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.username, self.resv_id, self.slot_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoticeKey {
    pub username: String,
    pub notice_id: i64,
}

impl NoticeKey {
    pub fn new(username: impl Into<String>, notice_id: i64) -> Self {
        Self {
            username: username.into(),
            notice_id,
        }
    }
}

impl fmt::Display for NoticeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.username, self.notice_id)
    }
}
