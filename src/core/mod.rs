// src/core/mod.rs

pub mod arg_cache;
pub mod command;
pub mod config_loader;
pub mod controller;
pub mod paths;
