//! Infrastructure: SQLite connection, migrations, transactions.

pub mod db;

pub use db::{get_connection, init_db, with_transaction, DbPool};
