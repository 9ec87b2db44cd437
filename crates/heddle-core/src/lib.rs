//! heddle-core
//!
//! Building blocks for the heddle task runner.
//!
//! - **args**: raw token list into positionals plus options (aliases,
//!   flags, `--` terminator, stop-at-positional)
//! - **registry**: ordered task set with selection and timed execution
//! - **trigger**: one-shot deferred runs with shared-outcome fan-out
//! - **context / shell / style / timing / duration**: the capability
//!   bundle handed to task bodies
//! - **cli**: the standard flag set and the host-binary boot path
//!
//! # Example
//!
//! ```ignore
//! let outcome = cli::execute(std::env::args().skip(1).collect(), |tasks| {
//!     tasks.add_fn("build", "compile everything", |_args, ctx| async move {
//!         ctx.shell.run("cargo build").await?;
//!         Ok(TaskValue::Null)
//!     });
//! })
//! .await;
//! ```

pub mod args;
pub mod cli;
pub mod context;
pub mod duration;
pub mod error;
pub mod registry;
pub mod shell;
pub mod style;
pub mod timing;
pub mod trigger;

pub use args::{parse, ArgValue, ParsedArgs, ParserConfig};
pub use context::TaskContext;
pub use duration::format_duration;
pub use error::TaskError;
pub use registry::{FnHandler, TaskEntry, TaskHandler, TaskRegistry, TaskValue, DEFAULT_TASK};
pub use shell::{CommandOutput, Shell, StdioMode};
pub use style::Palette;
pub use timing::{log_line, TaskTimer, Timing};
pub use trigger::{ExecutionTrigger, RunResult};
