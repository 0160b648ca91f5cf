//! Cash ledger for a single live game.
//!
//! Tracks who is in the game, every buy-in they make, and how cash-outs
//! are settled against the shared pot.
mod ledger;
mod player;
mod policy;
mod rejection;
mod standing;
mod status;

pub use ledger::*;
pub use player::*;
pub use policy::*;
pub use rejection::*;
pub use standing::*;
pub use status::*;
