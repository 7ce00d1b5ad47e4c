//! EveNerd CLI library.
//!
//! Command handlers and output formatting for the `evenerd-cli` binary. The
//! binary only parses arguments and dispatches into this crate.

pub mod commands;
pub mod output;
