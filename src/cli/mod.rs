//! Command-line front-end for the gridmark engine
//!
//! Play interactively, ask for a single decision, or compare how the
//! pruning switches affect one position.

pub mod commands;
pub mod config;
pub mod output;
