// src/exec/mod.rs

//! Step actions executed as tasks on the [`TaskRunner`](crate::runner::TaskRunner).
//!
//! - [`command`] runs a process and captures its combined output.
//! - [`files`] copies and writes files.
//! - [`step`] dispatches a validated [`Step`](crate::config::Step) to the
//!   right action and attaches the step name to any failure.

pub mod command;
pub mod files;
pub mod step;

pub use command::execute;
pub use step::run_step;
