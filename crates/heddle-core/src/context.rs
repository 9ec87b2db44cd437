//! The capability bundle handed to every task invocation.

use std::time::Duration;

use crate::registry::TaskRegistry;
use crate::shell::Shell;
use crate::style::Palette;
use crate::timing::Timing;

/// Fixed-shape bundle a handler receives next to its arguments.
///
/// `tasks` is the owning registry itself, which is what makes nested
/// dispatch (`ctx.tasks.run(..)` from inside a task) work. The rest are
/// the run-scoped capabilities: command execution, styling, and a timer
/// factory already bound to the quiet setting.
#[derive(Clone)]
pub struct TaskContext {
    pub tasks: TaskRegistry,
    pub shell: Shell,
    pub style: Palette,
    pub timing: Timing,
}

impl TaskContext {
    /// Elapsed-time formatting, same rendering the finish lines use.
    pub fn format_duration(&self, duration: Duration) -> String {
        crate::duration::format_duration(duration)
    }
}
