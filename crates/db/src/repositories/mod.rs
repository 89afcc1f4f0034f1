pub mod language;
pub mod lookup;
pub mod notice;
pub mod period;
pub mod reservation;
pub mod room;
pub mod session;
pub mod setting;
pub mod time_slot;
pub mod translation;
pub mod user;
