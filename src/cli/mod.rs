//! Interactive terminal front end for the desks.
mod cli;
mod command;

pub use cli::*;
pub use command::*;
