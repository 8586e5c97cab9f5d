//! Per-console page state, the flows that drive it, and the clock ticker.

pub mod flows;
mod state;
mod ticker;

pub use state::{Action, ConsoleState};
pub use ticker::{ClockSnapshot, ClockTicker};
