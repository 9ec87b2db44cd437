use async_trait::async_trait;
use serde::Serialize;

use heddle_core::cli::{execute, exit_status};
use heddle_core::{
    log_line, ParsedArgs, Shell, TaskContext, TaskError, TaskHandler, TaskRegistry, TaskValue,
};

/// Workspace chores for this repository, written as a taskfile would be:
/// `heddle` runs the default task, `heddle test --quiet` runs another
/// without timing lines, `heddle list` shows what exists.
fn register(tasks: &TaskRegistry) {
    tasks
        .add_list_task()
        .add_fn("check", "Type-check the workspace", check)
        .add_fn("test", "Run the test suite", test)
        .add_fn("ci", "Check, then test", |_args, ctx| async move {
            ctx.tasks.run(Some("check")).await?;
            ctx.tasks.run(Some("test")).await?;
            Ok(TaskValue::Null)
        })
        .add_fn("default", "What a bare invocation runs", |_args, ctx| async move {
            let value = ctx.tasks.run(Some("check")).await?;
            Ok(value.unwrap_or(TaskValue::Null))
        })
        .add_fn("fail", "Exercise the failure path", |_args, _ctx| async move {
            Err::<TaskValue, _>(TaskError::msg("this task always fails"))
        })
        .add(
            "tools",
            "Report toolchain availability",
            ToolProbe {
                tools: vec!["cargo", "rustfmt", "clippy-driver"],
            },
        );
}

async fn check(args: ParsedArgs, ctx: TaskContext) -> Result<TaskValue, TaskError> {
    let mut command = String::from("cargo check --workspace");
    if args.is_enabled("release") {
        command.push_str(" --release");
    }
    ctx.shell.run(&command).await?;
    Ok(TaskValue::Null)
}

async fn test(args: ParsedArgs, ctx: TaskContext) -> Result<TaskValue, TaskError> {
    let mut command = String::from("cargo test --workspace");
    if let Some(filter) = args.text("filter") {
        command.push(' ');
        command.push_str(filter);
    }
    ctx.shell.run(&command).await?;
    Ok(TaskValue::Null)
}

#[derive(Debug, Serialize)]
struct ToolReport {
    tool: String,
    available: bool,
    version: String,
}

/// Probes the programs the other tasks lean on, without failing the run
/// when one is missing.
struct ToolProbe {
    tools: Vec<&'static str>,
}

#[async_trait]
impl TaskHandler for ToolProbe {
    async fn run(&self, _args: ParsedArgs, ctx: TaskContext) -> Result<TaskValue, TaskError> {
        // Probe quietly even though the run's own shell inherits stdio.
        let probe = Shell::capture();
        let mut reports = Vec::new();
        for tool in &self.tools {
            let output = probe.safe(&format!("{tool} --version")).await;
            reports.push(ToolReport {
                tool: tool.to_string(),
                available: output.success(),
                version: output.stdout.lines().next().unwrap_or("").trim().to_string(),
            });
        }
        log_line(&ctx.style, &format!("probed {} tools", reports.len()));
        Ok(serde_json::to_value(reports)?)
    }
}

#[tokio::main]
async fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let outcome = execute(tokens, register).await;

    if let Err(err) = outcome.as_ref() {
        eprintln!("{err}");
        std::process::exit(exit_status(&outcome));
    }
}
