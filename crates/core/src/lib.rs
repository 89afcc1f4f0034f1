//! # RoomResv Core
//!
//! Domain types shared by the storage layer and its callers: compound keys,
//! lookup vocabularies, translation descriptors, write requests and the
//! error type that classifies constraint violations.

pub mod errors;
pub mod i18n;
pub mod keys;
pub mod lookup;
pub mod models;
