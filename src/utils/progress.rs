//! Progress reporting side channel.
//!
//! Progress never influences the produced document; it only lets a caller
//! (or the log) follow long conversions of large images.

use log::info;

/// Receives progress updates: task name, current step, total steps.
pub trait ProgressSink {
    fn report(&mut self, task: &str, current: u64, total: u64);
}

impl<F> ProgressSink for F
where
    F: FnMut(&str, u64, u64),
{
    fn report(&mut self, task: &str, current: u64, total: u64) {
        (*self)(task, current, total)
    }
}

/// A sink that writes whole-percent updates to the log at info level.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, task: &str, current: u64, total: u64) {
        info!("{task}... {}%", percentage(current, total));
    }
}

/// Integer percentage, `100` for an empty task.
pub fn percentage(current: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    (current.min(total) * 100 / total) as u32
}

/// Tracks row-by-row progress of a task and forwards it to a sink only when
/// the whole-percent value changes.
pub struct RowProgress<'a> {
    task: &'static str,
    rows: u64,
    last_percent: Option<u32>,
    sink: Option<&'a mut dyn ProgressSink>,
}

impl<'a> RowProgress<'a> {
    pub fn new(task: &'static str, rows: u32, sink: Option<&'a mut dyn ProgressSink>) -> Self {
        Self {
            task,
            rows: rows as u64,
            last_percent: None,
            sink,
        }
    }

    /// Records that processing reached row `y`.
    pub fn row(&mut self, y: u32) {
        self.update(y as u64);
    }

    /// Records completion of the task.
    pub fn finish(&mut self) {
        self.update(self.rows);
    }

    fn update(&mut self, current: u64) {
        let Some(sink) = self.sink.as_deref_mut() else {
            return;
        };
        let percent = percentage(current, self.rows);
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            sink.report(self.task, current, self.rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 4), 0);
        assert_eq!(percentage(1, 4), 25);
        assert_eq!(percentage(5, 4), 100);
        assert_eq!(percentage(0, 0), 100);
    }

    #[test]
    fn test_row_progress_deduplicates() {
        let mut seen = Vec::new();
        let mut sink = |_: &str, current: u64, total: u64| seen.push(percentage(current, total));
        {
            let mut progress = RowProgress::new("Placing rectangles", 200, Some(&mut sink));
            progress.row(0);
            progress.row(1);
            progress.row(2);
            progress.row(100);
            progress.finish();
        }
        assert_eq!(seen, vec![0, 1, 50, 100]);
    }

    #[test]
    fn test_row_progress_without_sink() {
        let mut progress = RowProgress::new("Placing rectangles", 10, None);
        progress.row(3);
        progress.finish();
    }
}
