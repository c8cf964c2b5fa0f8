//! Headless rendering of a date graph
//!
//! One line per day: a bar for hang time and a bar for hang count, each
//! scaled to the maximum over the displayed range.
//!
//! ```text
//! 20170801  ▓▓▓▓▓▓▓▓░░░░░░░░░░░░   312.0 ms hanging / hr  ▓▓▓▓░░░░░░    41.0 hangs / kuh
//! ```

// Bar widths are computed from ratios in f64
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

use crate::analysis::{DateGraph, OneToManyIndex, StackSelection};
use crate::domain::DayId;
use crate::profile::Thread;
use std::str::FromStr;

const TIME_BAR_WIDTH: usize = 20;
const COUNT_BAR_WIDTH: usize = 10;

/// Inclusive range of date indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: usize,
    pub end: usize,
}

impl DateRange {
    /// The whole axis of `len` days, or `None` if it is empty.
    pub fn full(len: usize) -> Option<Self> {
        len.checked_sub(1).map(|end| Self { start: 0, end })
    }

    /// Clip to an axis of `len` days.
    pub fn clamp(self, len: usize) -> Option<Self> {
        let last = len.checked_sub(1)?;
        let end = self.end.min(last);
        (self.start <= end).then_some(Self { start: self.start, end })
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once(':').ok_or_else(|| format!("expected START:END, got {s:?}"))?;
        let start: usize = start.trim().parse().map_err(|e| format!("invalid start {start:?}: {e}"))?;
        let end: usize = end.trim().parse().map_err(|e| format!("invalid end {end:?}: {e}"))?;
        if start > end {
            return Err(format!("start {start} is after end {end}"));
        }
        Ok(Self { start, end })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GraphMaxima {
    pub hang_ms: f64,
    pub hang_count: f64,
}

/// Largest total time and total count within `range`.
pub fn range_maxima(graph: &DateGraph, range: DateRange) -> GraphMaxima {
    let mut maxima = GraphMaxima::default();
    for i in range.start..=range.end.min(graph.len().saturating_sub(1)) {
        maxima.hang_ms = maxima.hang_ms.max(graph.total_time.get(i).copied().unwrap_or(0.0));
        maxima.hang_count = maxima.hang_count.max(graph.total_count.get(i).copied().unwrap_or(0.0));
    }
    maxima
}

pub fn time_tooltip(hang_ms: f64) -> String {
    format!("{hang_ms:.1} ms hanging / hr")
}

/// Hang counts are per hour of usage; shown per thousand usage hours.
pub fn count_tooltip(hang_count: f64) -> String {
    format!("{:.1} hangs / kuh", 1000.0 * hang_count)
}

fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 { ((value / max) * width as f64).round() as usize } else { 0 };
    let filled = filled.min(width);
    format!("{}{}", "▓".repeat(filled), "░".repeat(width - filled))
}

/// One text line per day in `range`.
pub fn render_date_graph(dates: &[DayId], graph: &DateGraph, range: DateRange) -> Vec<String> {
    let Some(range) = range.clamp(graph.len().min(dates.len())) else {
        return Vec::new();
    };
    let maxima = range_maxima(graph, range);

    (range.start..=range.end)
        .map(|i| {
            let time = graph.total_time[i];
            let count = graph.total_count[i];
            format!(
                "{}  {} {:>26}  {} {:>20}",
                dates[i],
                bar(time, maxima.hang_ms, TIME_BAR_WIDTH),
                time_tooltip(time),
                bar(count, maxima.hang_count, COUNT_BAR_WIDTH),
                count_tooltip(count),
            )
        })
        .collect()
}

/// Direct children of the selected stack (roots for the whole tree).
pub fn render_children(thread: &Thread, selection: StackSelection) -> Vec<String> {
    let index = OneToManyIndex::new(thread.stack_table.len(), &thread.stack_table.prefix);
    let children = match selection {
        StackSelection::All => index.roots(),
        StackSelection::Stack(stack) => index.children_of(stack),
    };
    children
        .iter()
        .map(|&child| {
            let name = thread.func_name(child).unwrap_or("<unknown>");
            let depth = thread.stack_table.depth[child];
            format!("  [{child}] {name} (depth {depth})")
        })
        .collect()
}
