//! # Host Surfaces
//!
//! Everything the runner consumes from its environment lives behind a trait
//! here, with one real implementation for the command line. The core logic in
//! `crate::core` only ever talks to these traits.
//!
//! ## Modules
//!
//! - **`editor`**: the active document (`FileEditor` for the CLI).
//! - **`fs`**: permission bits and existence checks.
//! - **`prompt`**: input boxes, confirmations, notifications and UI context signalling.
//! - **`store`**: durable key-value state, persisted as a single `bincode` file.
//! - **`terminal`**: the reusable terminal, hosted by a shell child process.

pub mod editor;
pub mod fs;
pub mod prompt;
pub mod store;
pub mod terminal;
