// src/cli/handlers/mod.rs

// One module per CLI action.

pub mod args;
pub mod chmod;
pub mod commons;
pub mod recent;
pub mod run;
pub mod session;
pub mod toggle;
