//! Data model shared by the reducer, the controller, and the UI.

pub mod agent;
mod report;
mod request;

pub use agent::{AgentInfo, AgentRegistry, AgentStatus, DEFAULT_AGENTS};
pub use report::{Report, StructuredReport};
pub use request::{RunRequest, RunResponse};
