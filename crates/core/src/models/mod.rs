pub mod notice;
pub mod period;
pub mod reservation;
pub mod room;
pub mod session;
pub mod setting;
pub mod time_slot;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Reads a patch field of a nullable column: an absent field stays `None`
/// (keep the stored value) and an explicit `null` becomes `Some(None)`
/// (clear it).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
