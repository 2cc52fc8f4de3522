//! Lexenvc - walkthrough host for the lexical environment engine.
//!
//! Embeds `lexenv_env` the way a tree-walking interpreter would: a small
//! dynamic [`Value`] type, function values built from engine closures, and a
//! set of scenarios that drive scopes through the same shapes as everyday
//! programs (package globals, call frames, blocks, loop iterations, returned
//! closures).
//!
//! The `lexenv` binary lists and runs the scenarios; see [`config`] for the
//! accepted arguments.

pub mod commands;
pub mod config;
pub mod dump;
mod host;
pub mod scenarios;
mod session;
pub mod tracing_setup;
mod value;

pub use host::{function, HostError, HostResult};
pub use session::{Report, Session};
pub use value::{Func, Value};
