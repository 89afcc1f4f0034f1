//! # Translations
//!
//! Every user-facing label lives once in a language-neutral base table and
//! once per locale in a paired `*_trans` table keyed by the base key plus
//! `lang_code`. This module describes those pairs so the storage layer can
//! handle all eleven of them with one set of queries.

use serde::{Deserialize, Serialize};

use crate::errors::{ResvError, ResvResult};
use crate::keys::{NoticeKey, ReservationKey};

/// Shape of the base key of a translatable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    /// Single integer column.
    Integer,
    /// Single text column (usernames).
    Text,
    /// `(username, id)` pair.
    Owned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransEntity {
    Setting,
    UserRole,
    User,
    Notice,
    Session,
    RoomStatus,
    RoomType,
    Room,
    ResvPrivacy,
    ResvStatus,
    Reservation,
}

impl TransEntity {
    pub const ALL: [TransEntity; 11] = [
        TransEntity::Setting,
        TransEntity::UserRole,
        TransEntity::User,
        TransEntity::Notice,
        TransEntity::Session,
        TransEntity::RoomStatus,
        TransEntity::RoomType,
        TransEntity::Room,
        TransEntity::ResvPrivacy,
        TransEntity::ResvStatus,
        TransEntity::Reservation,
    ];

    pub fn base_table(self) -> &'static str {
        match self {
            Self::Setting => "settings",
            Self::UserRole => "user_roles",
            Self::User => "users",
            Self::Notice => "notices",
            Self::Session => "sessions",
            Self::RoomStatus => "room_status",
            Self::RoomType => "room_types",
            Self::Room => "rooms",
            Self::ResvPrivacy => "resv_privacy",
            Self::ResvStatus => "resv_status",
            Self::Reservation => "reservations",
        }
    }

    pub fn trans_table(self) -> &'static str {
        match self {
            Self::Setting => "setting_trans",
            Self::UserRole => "user_role_trans",
            Self::User => "user_trans",
            Self::Notice => "notice_trans",
            Self::Session => "session_trans",
            Self::RoomStatus => "room_status_trans",
            Self::RoomType => "room_type_trans",
            Self::Room => "room_trans",
            Self::ResvPrivacy => "resv_privacy_trans",
            Self::ResvStatus => "resv_status_trans",
            Self::Reservation => "resv_trans",
        }
    }

    /// Key columns, identical in the base and the translation table.
    pub fn key_columns(self) -> &'static [&'static str] {
        match self {
            Self::Setting => &["id"],
            Self::UserRole => &["role"],
            Self::User => &["username"],
            Self::Notice => &["username", "notice_id"],
            Self::Session => &["session_id"],
            Self::RoomStatus | Self::ResvStatus => &["status"],
            Self::RoomType => &["type"],
            Self::Room => &["room_id"],
            Self::ResvPrivacy => &["privacy"],
            Self::Reservation => &["username", "resv_id"],
        }
    }

    pub fn key_shape(self) -> KeyShape {
        match self {
            Self::User => KeyShape::Text,
            Self::Notice | Self::Reservation => KeyShape::Owned,
            _ => KeyShape::Integer,
        }
    }

    /// Required text column of the translation table.
    pub fn label_column(self) -> &'static str {
        match self {
            Self::Setting | Self::User | Self::Session | Self::Room => "name",
            Self::Notice | Self::Reservation => "title",
            Self::UserRole
            | Self::RoomStatus
            | Self::RoomType
            | Self::ResvPrivacy
            | Self::ResvStatus => "label",
        }
    }

    /// Optional long-form text column, if the entity has one.
    pub fn detail_column(self) -> Option<&'static str> {
        match self {
            Self::Setting => Some("description"),
            Self::Notice => Some("content"),
            Self::Reservation => Some("note"),
            _ => None,
        }
    }
}

/// Base key of a translatable row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityKey {
    Id(i64),
    Name(String),
    Owned { username: String, id: i64 },
}

impl EntityKey {
    pub fn shape(&self) -> KeyShape {
        match self {
            Self::Id(_) => KeyShape::Integer,
            Self::Name(_) => KeyShape::Text,
            Self::Owned { .. } => KeyShape::Owned,
        }
    }

    /// Rejects a key whose shape does not fit `entity`.
    pub fn check_for(&self, entity: TransEntity) -> ResvResult<()> {
        if self.shape() == entity.key_shape() {
            Ok(())
        } else {
            Err(ResvError::Validation(format!(
                "key {:?} does not identify a row of {}",
                self,
                entity.base_table()
            )))
        }
    }
}

impl From<i64> for EntityKey {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for EntityKey {
    fn from(username: &str) -> Self {
        Self::Name(username.to_string())
    }
}

impl From<ReservationKey> for EntityKey {
    fn from(key: ReservationKey) -> Self {
        Self::Owned {
            username: key.username,
            id: key.resv_id,
        }
    }
}

impl From<NoticeKey> for EntityKey {
    fn from(key: NoticeKey) -> Self {
        Self::Owned {
            username: key.username,
            id: key.notice_id,
        }
    }
}

/// Text of a translation row in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationText {
    pub label: String,
    pub detail: Option<String>,
}

impl TranslationText {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub lang_code: String,
    pub label: String,
    pub detail: Option<String>,
}

/// What to read when a row has no translation for the requested locale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranslationFallback {
    /// Report the text as missing.
    #[default]
    None,
    /// Read this locale instead.
    Locale(String),
}

impl TranslationFallback {
    /// Locale consulted second when `requested` has no translation.
    pub fn locale_for<'a>(&'a self, requested: &'a str) -> &'a str {
        match self {
            Self::None => requested,
            Self::Locale(code) => code,
        }
    }
}

/// A base row together with the translation chosen for a locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localized<T> {
    #[serde(flatten)]
    pub base: T,
    pub translation: Option<Translation>,
}

impl<T> Localized<T> {
    pub fn label(&self) -> Option<&str> {
        self.translation.as_ref().map(|t| t.label.as_str())
    }
}
