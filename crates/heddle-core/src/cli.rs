//! Process-boundary wiring for host binaries.

use std::sync::Arc;

use crate::args::{parse, ParserConfig};
use crate::registry::TaskRegistry;
use crate::trigger::RunResult;

/// The standard runner flag set: boolean `run`, `quiet`, and `list`, each
/// with a single-dash alias.
pub fn standard_config() -> ParserConfig {
    ParserConfig::new()
        .flag("run")
        .flag("quiet")
        .flag("list")
        .alias("-r", "--run")
        .alias("-l", "--list")
        .alias("-q", "--quiet")
}

/// Boot path for a host binary: parse `tokens` with the standard flag
/// set, let `setup` register its tasks, then fire one trigger and wait
/// for the shared outcome.
pub async fn execute<F>(tokens: Vec<String>, setup: F) -> Arc<RunResult>
where
    F: FnOnce(&TaskRegistry),
{
    let args = parse(tokens, &standard_config());
    let tasks = TaskRegistry::new(args);
    setup(&tasks);
    tasks.trigger().outcome().await
}

/// Process exit status for an outcome: the error's numeric code, zero on
/// success (including the ran-nothing cases).
pub fn exit_status(outcome: &RunResult) -> i32 {
    match outcome {
        Ok(_) => 0,
        Err(err) => err.exit_code(),
    }
}
