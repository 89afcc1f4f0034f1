use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimeSlot {
    pub status: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
