//! TwinStudio CLI library.
//!
//! This crate provides the core functionality for the `twinstudio` binary:
//! input loading, logging setup and the command implementations.

pub mod commands;
pub mod input;
pub mod logging;
