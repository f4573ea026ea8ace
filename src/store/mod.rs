//! Persistence layer — libSQL-backed phone record lookup.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::{PhoneRecord, RecordStore, normalize_phone_number};
