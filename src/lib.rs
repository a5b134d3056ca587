//! agentdash - a live terminal dashboard for multi-agent pipeline runs
//!
//! This library exposes modules for use in the binary, integration tests,
//! and benchmarks.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod logging;
pub mod models;
pub mod sse;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
