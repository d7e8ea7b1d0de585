//! Persistent icon and catalog store (SQLite via sqlx).
//!
//! Holds icon blobs (bytes, MIME type, digest) and the catalog entries that
//! reference them.

mod db;
mod entries;
mod icons;
mod types;

pub use db::Store;
pub use types::*;

#[cfg(test)]
pub(crate) use db::open_memory;
