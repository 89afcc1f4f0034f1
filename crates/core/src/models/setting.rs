use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSetting {
    pub id: Option<i64>,
    pub name: String,
    pub value: String,
    pub description: Option<String>,
}

/// Partial update; the id is never patched here (see `rekey_setting`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingUpdate {
    pub name: Option<String>,
    pub value: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}
