//! Persistence adapters for the plastics schema.
//!
//! `postgres` wraps a single sqlx transaction; `memory` keeps rows in
//! process for tests and dry runs; `admin` covers catalog queries and the
//! reset-all-tables operation.

pub mod admin;
pub mod memory;
pub mod postgres;

pub use memory::{MemData, MemStore};
pub use postgres::PostgresStore;
