//! Application state management
//!
//! - `DashboardState`: the view state of one run (agents, report, flags)
//! - `reducer`: the transition applied for each pipeline event

mod dashboard;
pub mod reducer;

pub use dashboard::DashboardState;
pub use reducer::{reduce, ReduceError, Transition};
