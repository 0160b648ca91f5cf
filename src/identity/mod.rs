//! Who the ledger and tracker belong to.
//!
//! Sign-in itself happens elsewhere; this crate only needs to know which
//! member is signed in right now.
mod account;
mod member;

pub use account::*;
pub use member::*;
