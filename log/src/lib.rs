//! Process wide log of configuration and setup events.
//!
//! Lines go into a fixed size ring buffer and are rendered as an [`egui`] layout, so front
//! ends can show them without a terminal.

use std::sync::{Mutex, MutexGuard};

use egui::text::LayoutJob;
use once_cell::sync::Lazy;

/// Severity of a line, which also decides its color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Notify,
    Strong,
    Warn,
    Trace,
}

impl Level {
    fn color(self) -> egui::Color32 {
        match self {
            Level::Notify => egui::Color32::LIGHT_GREEN,
            Level::Strong => egui::Color32::RED,
            Level::Warn => egui::Color32::GOLD,
            Level::Trace => egui::Color32::LIGHT_GRAY,
        }
    }
}

#[macro_export]
macro_rules! notify {
    () => {};

    ($($arg:tt)*) => {{
        $crate::logger().append(format!($($arg)*), $crate::Level::Notify);
    }};
}

#[macro_export]
macro_rules! strong {
    () => {};

    ($($arg:tt)*) => {{
        $crate::logger().append(format!($($arg)*), $crate::Level::Strong);
    }};
}

#[macro_export]
macro_rules! warn {
    () => {};

    ($($arg:tt)*) => {{
        $crate::logger().append(format!($($arg)*), $crate::Level::Warn);
    }};
}

#[macro_export]
macro_rules! trace {
    () => {};

    ($($arg:tt)*) => {{
        $crate::logger().append(format!($($arg)*), $crate::Level::Trace);
    }};
}

pub static LOGGER: Lazy<Mutex<Logger<300>>> = Lazy::new(|| Mutex::new(Logger::new()));

/// Locks the global logger.
///
/// A panic while the lock was held leaves the buffer intact, so a poisoned lock is taken over
/// rather than propagated.
pub fn logger() -> MutexGuard<'static, Logger<300>> {
    LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ring buffer of the last `N` lines.
pub struct Logger<const N: usize> {
    lines: [(String, Level); N],
    head: usize,
    len: usize,
}

impl<const N: usize> Logger<N> {
    pub fn new() -> Self {
        Self {
            lines: std::array::from_fn(|_| (String::new(), Level::Trace)),
            head: 0,
            len: 0,
        }
    }

    pub fn append(&mut self, line: String, level: Level) {
        self.lines[self.head] = (line + "\n", level);
        self.head = (self.head + 1) % N;
        self.len = (self.len + 1).min(N);
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slices(&self) -> (&[(String, Level)], &[(String, Level)]) {
        if self.len < N {
            (&self.lines[0..self.len], &[])
        } else {
            // wrapped around, oldest line is at head
            let (a, b) = self.lines.split_at(self.head);

            (b, a)
        }
    }

    /// Lines from oldest to newest, without their trailing newline.
    pub fn lines(&self) -> impl Iterator<Item = (&str, Level)> {
        let (a, b) = self.slices();
        a.iter()
            .chain(b)
            .map(|(line, level)| (line.trim_end_matches('\n'), *level))
    }

    pub fn format(&self) -> LayoutJob {
        let mut layout = LayoutJob::default();
        let (a, b) = self.slices();

        for (line, level) in a.iter().chain(b) {
            layout.append(
                line,
                0.0,
                egui::TextFormat {
                    font_id: egui::FontId {
                        size: 12.0,
                        family: egui::FontFamily::Monospace,
                    },
                    color: level.color(),
                    ..Default::default()
                },
            );
        }

        layout
    }
}

impl<const N: usize> Default for Logger<N> {
    fn default() -> Self {
        Self::new()
    }
}
