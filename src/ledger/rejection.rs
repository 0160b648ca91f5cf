use super::Player;
use crate::Dollars;
use crate::ID;

/// A ledger operation that was refused. State is unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("player name is empty")]
    EmptyName,
    #[error("a player named {0:?} is already in the game")]
    DuplicateName(String),
    #[error("no player with id {0}")]
    UnknownPlayer(ID<Player>),
    #[error("amount must be a positive number (got {0})")]
    InvalidAmount(Dollars),
    #[error("not enough money in the pot (asked ${amount:.2}, available ${pot:.2})")]
    InsufficientPot { amount: Dollars, pot: Dollars },
    #[error("{0} has already cashed out")]
    AlreadyCashed(String),
}
