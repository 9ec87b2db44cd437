//! Task registration, selection, and timed execution.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::args::ParsedArgs;
use crate::context::TaskContext;
use crate::error::TaskError;
use crate::shell::Shell;
use crate::style::Palette;
use crate::timing::Timing;
use crate::trigger::ExecutionTrigger;

/// What a task body produces. `Null` for tasks that are all side effect.
pub type TaskValue = serde_json::Value;

/// Name used when neither the caller nor the positionals pick a task.
pub const DEFAULT_TASK: &str = "default";

/// A task body.
///
/// Implement it directly for handlers with state; closures and async fns
/// go through [`TaskRegistry::add_fn`].
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn run(&self, args: ParsedArgs, ctx: TaskContext) -> Result<TaskValue, TaskError>;
}

/// Adapter turning an async closure into a [`TaskHandler`].
pub struct FnHandler<F> {
    body: F,
}

impl<F> FnHandler<F> {
    pub fn new(body: F) -> Self {
        Self { body }
    }
}

#[async_trait]
impl<F, Fut> TaskHandler for FnHandler<F>
where
    F: Fn(ParsedArgs, TaskContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<TaskValue, TaskError>> + Send,
{
    async fn run(&self, args: ParsedArgs, ctx: TaskContext) -> Result<TaskValue, TaskError> {
        (self.body)(args, ctx).await
    }
}

/// One registered task: its name, a listing description, and the handler.
#[derive(Clone)]
pub struct TaskEntry {
    pub name: String,
    pub description: String,
    handler: Arc<dyn TaskHandler>,
}

struct RegistryInner {
    entries: Vec<TaskEntry>,
    args: ParsedArgs,
}

/// Ordered, nameable set of task handlers over one parsed argument set.
///
/// Handles are cheap to clone and share the same underlying set, which is
/// how the context's `tasks` field supports nested dispatch. All locking
/// is synchronous and never held across an await.
#[derive(Clone)]
pub struct TaskRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    shell: Shell,
    style: Palette,
}

impl TaskRegistry {
    /// Registry over already-parsed arguments, with detected capabilities
    /// (inherited stdio, color iff stderr is a terminal).
    pub fn new(args: ParsedArgs) -> Self {
        Self::with_capabilities(args, Shell::inherit(), Palette::detect())
    }

    pub fn with_capabilities(args: ParsedArgs, shell: Shell, style: Palette) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                entries: Vec::new(),
                args,
            })),
            shell,
            style,
        }
    }

    /// A new registry with independent entries and its own arguments,
    /// sharing this registry's capabilities.
    pub fn child(&self, args: ParsedArgs) -> TaskRegistry {
        Self::with_capabilities(args, self.shell.clone(), self.style)
    }

    /// Register a task. Re-adding a name keeps its original listing
    /// position; the newest handler and description win.
    pub fn add<H>(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: H,
    ) -> &Self
    where
        H: TaskHandler + 'static,
    {
        let entry = TaskEntry {
            name: name.into(),
            description: description.into(),
            handler: Arc::new(handler),
        };
        let mut inner = self.lock();
        if let Some(existing) = inner.entries.iter_mut().find(|e| e.name == entry.name) {
            *existing = entry;
        } else {
            inner.entries.push(entry);
        }
        self
    }

    /// Register an async closure (or async fn) as a task.
    pub fn add_fn<F, Fut>(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        body: F,
    ) -> &Self
    where
        F: Fn(ParsedArgs, TaskContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<TaskValue, TaskError>> + Send + 'static,
    {
        self.add(name, description, FnHandler::new(body))
    }

    /// Register the synthetic listing task under the name `list`.
    pub fn add_list_task(&self) -> &Self {
        self.add_list_task_as("list")
    }

    /// Register the synthetic listing task under `name`. When invoked it
    /// prints the registry's contents at that moment, so tasks added
    /// after it still show up.
    pub fn add_list_task_as(&self, name: impl Into<String>) -> &Self {
        self.add_fn(name, "List available tasks", |_args, ctx| async move {
            eprintln!("\nAvailable tasks:\n{}", ctx.tasks.listing());
            Ok(TaskValue::Null)
        })
    }

    /// Render the flat task list, one `* name: description` line per entry
    /// in insertion order. Descriptionless tasks get just `* name`.
    pub fn listing(&self) -> String {
        render_listing(&self.lock().entries)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Snapshot of the registry's current arguments.
    pub fn args(&self) -> ParsedArgs {
        self.lock().args.clone()
    }

    /// Execute one selected task.
    ///
    /// Selection takes the explicit `name` if given, else consumes the
    /// front positional, else falls back to [`DEFAULT_TASK`]. An empty
    /// registry is a no-op and an unknown name prints the listing; neither
    /// is an error. A handler failure propagates unchanged, and its
    /// finish line is never logged.
    pub async fn run(&self, name: Option<&str>) -> Result<Option<TaskValue>, TaskError> {
        let (entry, args, timing) = {
            let mut inner = self.lock();
            if inner.entries.is_empty() {
                return Ok(None);
            }
            let selected = match name {
                Some(name) => name.to_string(),
                None => inner
                    .args
                    .shift()
                    .filter(|front| !front.is_empty())
                    .unwrap_or_else(|| DEFAULT_TASK.to_string()),
            };
            let Some(entry) = inner.entries.iter().find(|e| e.name == selected).cloned() else {
                let listing = render_listing(&inner.entries);
                drop(inner);
                eprintln!("\nAvailable tasks:\n{listing}");
                return Ok(None);
            };
            let quiet = inner.args.is_enabled("quiet");
            (entry, inner.args.clone(), Timing::new(quiet, self.style))
        };

        let ctx = TaskContext {
            tasks: self.clone(),
            shell: self.shell.clone(),
            style: self.style,
            timing,
        };

        let timer = timing.start(&entry.name);
        let value = entry.handler.run(args, ctx).await?;
        timer.finish();
        Ok(Some(value))
    }

    /// Schedule exactly one `run(None)` on the executor and hand back the
    /// trigger observing it.
    pub fn trigger(&self) -> ExecutionTrigger {
        ExecutionTrigger::schedule(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        // Poisoning only marks a panicked writer; the entries themselves
        // stay usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn render_listing(entries: &[TaskEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str("* ");
        out.push_str(&entry.name);
        if !entry.description.is_empty() {
            out.push_str(": ");
            out.push_str(&entry.description);
        }
        out.push('\n');
    }
    out
}
