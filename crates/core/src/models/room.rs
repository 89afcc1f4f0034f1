use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoom {
    /// Explicit id, or `None` to let the store assign one.
    pub room_id: Option<i64>,
    pub status: i64,
    pub name: String,
    pub capacity: i64,
    #[serde(rename = "type")]
    pub room_type: i64,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub status: Option<i64>,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    #[serde(rename = "type")]
    pub room_type: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilter {
    pub status: Option<i64>,
    #[serde(rename = "type")]
    pub room_type: Option<i64>,
}
