//! Personal session history and income statistics.
mod confirm;
mod rejection;
mod session;
mod summary;
mod tracker;

pub use confirm::*;
pub use rejection::*;
pub use session::*;
pub use summary::*;
pub use tracker::*;
