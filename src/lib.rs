//! Fetch a batch of demo users, aggregate them, and chart the result

pub mod cli;
pub mod config;
pub mod logging;
pub mod services;
pub mod tui;
pub mod types;
