//! Persistence for status and user records (SQLite via a pooled connection).

pub mod db;

pub use db::{create_pool, get_connection, DbConnection, DbPool};
