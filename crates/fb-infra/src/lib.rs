//! # fb-infra
//!
//! Infrastructure for FileBridge: the SQLite-backed recent store and the
//! system clock.

pub mod db;
pub mod store;
pub mod time;

pub use store::LocalStore;
pub use time::SystemClock;
