//! Background persistence: mark dirty, flush on a timer or on demand.
//!
//! - [`Debounce`] — Deadline tracking for the quiet period
//! - [`Sink`] — Where snapshots end up
//! - [`Autosave`] — Handle to the task that coalesces and writes snapshots
//! - [`Health`] — Last known outcome, watched by the caller
mod autosave;
mod debounce;
mod health;
mod sink;

pub use autosave::*;
pub use debounce::*;
pub use health::*;
pub use sink::*;
