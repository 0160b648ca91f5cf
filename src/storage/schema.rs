/// Schema metadata for PostgreSQL tables.
///
/// Purely describes table structure; the repositories do the I/O.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
    /// Returns `TRUNCATE TABLE` statement for clearing data.
    fn truncates() -> &'static str;
}

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:    &str = "users";
/// Table for game ledgers, one active row per user.
#[rustfmt::skip]
pub const GAMES:    &str = "games";
/// Table for recorded playing sessions.
#[rustfmt::skip]
pub const SESSIONS: &str = "sessions";
