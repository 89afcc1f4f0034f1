//! Lookup tables: small vocabularies of integer keys with a label.

use serde::{Deserialize, Serialize};

use crate::i18n::TransEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    UserRole,
    RoomStatus,
    RoomType,
    ResvPrivacy,
    ResvStatus,
}

impl LookupKind {
    pub const ALL: [LookupKind; 5] = [
        LookupKind::UserRole,
        LookupKind::RoomStatus,
        LookupKind::RoomType,
        LookupKind::ResvPrivacy,
        LookupKind::ResvStatus,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Self::UserRole => "user_roles",
            Self::RoomStatus => "room_status",
            Self::RoomType => "room_types",
            Self::ResvPrivacy => "resv_privacy",
            Self::ResvStatus => "resv_status",
        }
    }

    /// Name of the integer primary key column.
    pub fn key_column(self) -> &'static str {
        match self {
            Self::UserRole => "role",
            Self::RoomStatus | Self::ResvStatus => "status",
            Self::RoomType => "type",
            Self::ResvPrivacy => "privacy",
        }
    }

    pub fn trans_entity(self) -> TransEntity {
        match self {
            Self::UserRole => TransEntity::UserRole,
            Self::RoomStatus => TransEntity::RoomStatus,
            Self::RoomType => TransEntity::RoomType,
            Self::ResvPrivacy => TransEntity::ResvPrivacy,
            Self::ResvStatus => TransEntity::ResvStatus,
        }
    }

    /// Values seeded into a fresh database.
    pub fn default_vocabulary(self) -> &'static [(i64, &'static str)] {
        match self {
            Self::UserRole => &[
                (role::BLOCKED, "Blocked"),
                (role::RESTRICTED, "Restricted"),
                (role::BASIC, "Basic"),
                (role::ADVANCED, "Advanced"),
                (role::ADMIN, "Admin"),
            ],
            Self::RoomStatus => &[
                (room_status::UNAVAILABLE, "Unavailable"),
                (room_status::AVAILABLE, "Available"),
            ],
            Self::RoomType => &[],
            Self::ResvPrivacy => &[
                (resv_privacy::PUBLIC, "Public"),
                (resv_privacy::ANONYMOUS, "Anonymous"),
                (resv_privacy::PRIVATE, "Private"),
            ],
            Self::ResvStatus => &[
                (resv_status::PENDING, "Pending"),
                (resv_status::CONFIRMED, "Confirmed"),
                (resv_status::CANCELLED, "Cancelled"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub id: i64,
    pub label: String,
}

/// Permission tiers, ordered from least to most privileged.
pub mod role {
    pub const BLOCKED: i64 = -1;
    pub const RESTRICTED: i64 = 0;
    pub const BASIC: i64 = 1;
    pub const ADVANCED: i64 = 2;
    pub const ADMIN: i64 = 3;
}

pub mod room_status {
    pub const UNAVAILABLE: i64 = 0;
    pub const AVAILABLE: i64 = 1;
}

pub mod resv_privacy {
    pub const PUBLIC: i64 = 0;
    /// Listed without the owner.
    pub const ANONYMOUS: i64 = 1;
    /// Listed as an opaque occupied range.
    pub const PRIVATE: i64 = 2;
}

pub mod resv_status {
    pub const PENDING: i64 = 0;
    pub const CONFIRMED: i64 = 1;
    pub const CANCELLED: i64 = 2;
}
