use super::Session;
use crate::ID;

/// A tracker operation that was refused. State is unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("hours must be a positive number (got {0})")]
    InvalidHours(f64),
    #[error("profit must be a number (got {0})")]
    InvalidProfit(f64),
    #[error("no session with id {0}")]
    UnknownSession(ID<Session>),
}
