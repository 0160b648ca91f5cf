//! Persistence boundary for games and sessions.
//!
//! ## Core Types
//!
//! - [`Game`] — A persisted ledger owned by one member
//! - [`GameRepository`] — Load, upsert and close a member's games
//! - [`SessionRepository`] — Load and replace a member's sessions
//! - [`Memory`] — In-process backend for tests and offline play
//!
//! With the `database` feature, both repositories are implemented for a
//! shared `tokio_postgres::Client`, and [`Schema`] describes the tables.
mod game;
mod memory;
mod repository;

pub use game::*;
pub use memory::*;
pub use repository::*;

#[cfg(feature = "database")]
mod postgres;
#[cfg(feature = "database")]
mod schema;
#[cfg(feature = "database")]
pub use postgres::*;
#[cfg(feature = "database")]
pub use schema::*;
