//! Persistence of accepted submissions.
//!
//! - `db`: the SQLite table and the blocking queries against it.
//! - `state`: the shared status map and the writer task that drains the
//!   submission queue into `db`.

pub mod db;
pub mod state;
