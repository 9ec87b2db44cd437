//! Start/finish diagnostics with wall-clock stamps.
//!
//! Lines go to stderr as `[HH:MM:SS] message`, keeping stdout clean for
//! whatever the tasks themselves print.

use std::time::Instant;

use chrono::{DateTime, Local, TimeZone};

use crate::duration::format_duration;
use crate::style::Palette;

/// Builds task timers bound to one run's quiet setting and palette.
///
/// Quiet suppresses the start and finish lines entirely; it does not
/// touch anything a task prints on its own.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    quiet: bool,
    style: Palette,
}

impl Timing {
    pub fn new(quiet: bool, style: Palette) -> Self {
        Self { quiet, style }
    }

    /// Log `Starting '<name>' ...` (unless quiet) and start the clock.
    pub fn start(&self, name: &str) -> TaskTimer {
        if !self.quiet {
            log_line(&self.style, &starting_message(&self.style, name));
        }
        TaskTimer {
            name: name.to_string(),
            started: Instant::now(),
            timing: *self,
        }
    }
}

/// One running task's clock. Dropping it without calling [`finish`]
/// reports nothing, which is exactly what a failed task wants.
///
/// [`finish`]: TaskTimer::finish
#[derive(Debug)]
pub struct TaskTimer {
    name: String,
    started: Instant,
    timing: Timing,
}

impl TaskTimer {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Log `Finished '<name>' (<elapsed>)` unless the run is quiet.
    pub fn finish(self) {
        if self.timing.quiet {
            return;
        }
        let elapsed = format_duration(self.started.elapsed());
        let message = finished_message(&self.timing.style, &self.name, &elapsed);
        log_line(&self.timing.style, &message);
    }
}

/// Write one stamped line to the diagnostic stream.
pub fn log_line(style: &Palette, message: &str) {
    eprintln!("{}", render_line(style, Local::now(), message));
}

/// Pure rendering, split out so stamps stay testable.
fn render_line<Tz: TimeZone>(style: &Palette, now: DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = now.format("%H:%M:%S").to_string();
    format!("[{}] {}", style.gray(&stamp), message)
}

fn starting_message(style: &Palette, name: &str) -> String {
    format!("Starting '{}' ...", style.cyan(name))
}

fn finished_message(style: &Palette, name: &str, elapsed: &str) -> String {
    format!("Finished '{}' ({})", style.cyan(name), style.magenta(elapsed))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn renders_a_bracketed_stamp_before_the_message() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 5).unwrap();
        let line = render_line(&Palette::plain(), at, "Starting 'build' ...");
        assert_eq!(line, "[12:30:05] Starting 'build' ...");
    }

    #[test]
    fn start_and_finish_messages_have_the_reported_shape() {
        let style = Palette::plain();
        assert_eq!(starting_message(&style, "build"), "Starting 'build' ...");
        assert_eq!(
            finished_message(&style, "build", "250ms"),
            "Finished 'build' (250ms)"
        );
    }

    #[test]
    fn quiet_timers_stay_silent() {
        // Nothing to capture here; the quiet path just must not print or
        // panic on the way through.
        let timer = Timing::new(true, Palette::plain()).start("noisy");
        assert_eq!(timer.name(), "noisy");
        timer.finish();
    }
}
