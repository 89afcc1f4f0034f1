use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPeriod {
    pub period_id: Option<i64>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodUpdate {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}
