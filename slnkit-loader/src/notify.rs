//! Operator-facing notification sink.
//!
//! Notifications are single informational lines (the migration advisory).
//! They are not log records: they are always shown, whatever the log filter.

use std::cell::RefCell;

pub trait Notifier {
    fn notify(&self, line: &str);
}

/// Writes each line to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    lines: RefCell<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_owned());
    }
}
