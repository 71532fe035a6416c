//! CLI module - entry point plumbing
//!
//! Argument parsing, stdout framing, stdin reading, and the two drivers.

pub mod args;
pub mod console;
pub mod daemon;
pub mod input;
pub mod oneshot;

pub use args::{parse_runner_args, CommonArgs, DaemonArgs, Invocation, RunnerArgs, RUNNER_USAGE};
pub use console::{Console, Tag, DONE_SENTINEL};
pub use daemon::{Daemon, DaemonReport};
pub use input::{LineSource, StdinLines};
pub use oneshot::run_once;
