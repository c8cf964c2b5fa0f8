//! JSON export of a selected date graph.

use crate::analysis::{DateGraph, StackSelection};
use crate::domain::{DayId, ExportError};
use crate::profile::{Profile, Thread};
use serde::Serialize;
use std::io::Write;

/// A date graph together with the axis and selection it was computed for.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateGraphReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<&'a str>,
    /// `null` when the whole call tree was selected.
    pub selected_stack: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_func: Option<&'a str>,
    pub dates: &'a [DayId],
    pub total_time: &'a [f64],
    pub total_count: &'a [f64],
}

impl<'a> DateGraphReport<'a> {
    pub fn new(profile: &'a Profile, thread: &'a Thread, selection: StackSelection, graph: &'a DateGraph) -> Self {
        let selected_stack = match selection {
            StackSelection::All => None,
            StackSelection::Stack(stack) => Some(stack),
        };
        Self {
            uuid: profile.uuid.as_deref(),
            thread: thread.name.as_deref(),
            selected_stack,
            selected_func: selected_stack.and_then(|s| thread.func_name(s).ok()),
            dates: &profile.dates,
            total_time: &graph.total_time,
            total_count: &graph.total_count,
        }
    }
}

/// Write `report` as pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn export_date_graph<W: Write>(mut writer: W, report: &DateGraphReport<'_>) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{StackTable, UniqueStringArray};

    #[test]
    fn test_export_creates_valid_json() {
        let profile = Profile { dates: vec![DayId(1), DayId(2)], uuid: Some("u".to_string()), ..Profile::default() };
        let thread = Thread {
            name: Some("Gecko".to_string()),
            stack_table: StackTable { prefix: vec![None], func: vec![0], depth: vec![0] },
            string_table: UniqueStringArray::from_strings(vec!["main".to_string()]),
            ..Thread::default()
        };
        let graph = DateGraph { total_time: vec![1.5, 0.0], total_count: vec![1.0, 0.0] };
        let report = DateGraphReport::new(&profile, &thread, StackSelection::Stack(0), &graph);

        let mut buffer = Vec::new();
        export_date_graph(&mut buffer, &report).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(parsed["thread"], "Gecko");
        assert_eq!(parsed["selectedStack"], 0);
        assert_eq!(parsed["selectedFunc"], "main");
        assert_eq!(parsed["dates"], serde_json::json!([1, 2]));
        assert_eq!(parsed["totalTime"], serde_json::json!([1.5, 0.0]));
    }

    #[test]
    fn test_all_stacks_exports_null_selection() {
        let profile = Profile::default();
        let thread = Thread::default();
        let graph = DateGraph::default();
        let report = DateGraphReport::new(&profile, &thread, StackSelection::All, &graph);

        let mut buffer = Vec::new();
        export_date_graph(&mut buffer, &report).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert!(parsed["selectedStack"].is_null());
        assert!(parsed.get("selectedFunc").is_none());
    }
}
