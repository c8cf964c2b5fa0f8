//! Per-day hang totals for a call-tree subtree.
//!
//! Given a normalized thread and a selected stack, sums hang time and hang
//! count for every day on the thread's date axis, over the samples whose
//! stack lies in the selected subtree.
//!
//! ## Data Flow
//!
//! ```text
//! StackTable.prefix ──► OneToManyIndex ──► subtree membership (bitmap)
//!                                                  │
//! DayTable × SampleTable.stack ────────────────────┴──► DateGraph { total_time, total_count }
//! ```
//!
//! # Performance
//!
//! - Index build and subtree walk: O(stacks)
//! - Aggregation: O(days × samples), one membership lookup per sample

use super::one_to_many::OneToManyIndex;
use crate::domain::GraphError;
use crate::profile::Thread;
use serde::Serialize;

/// Which part of the call tree to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackSelection {
    /// The whole table, including samples without a stack.
    #[default]
    All,
    /// A stack node and all of its descendants.
    Stack(usize),
}

impl From<Option<usize>> for StackSelection {
    fn from(stack: Option<usize>) -> Self {
        stack.map_or(StackSelection::All, StackSelection::Stack)
    }
}

/// Totals aligned 1:1 with the thread's date axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateGraph {
    pub total_time: Vec<f64>,
    pub total_count: Vec<f64>,
}

impl DateGraph {
    pub fn len(&self) -> usize {
        self.total_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_time.is_empty()
    }
}

/// Compute the date graph of `thread` restricted to `selection`.
///
/// # Errors
/// Returns `InvalidSelection` if the selected stack is outside the stack table.
pub fn build_date_graph(thread: &Thread, selection: StackSelection) -> Result<DateGraph, GraphError> {
    let in_subtree = match selection {
        StackSelection::All => None,
        StackSelection::Stack(root) => Some(subtree_membership(thread, root)?),
    };

    let samples = &thread.sample_table.stack;
    let counts_sample = |j: usize| match (&in_subtree, samples.get(j)) {
        (None, _) => true,
        (Some(members), Some(&Some(stack))) => members[stack],
        (Some(_), _) => false,
    };

    let mut graph = DateGraph {
        total_time: Vec::with_capacity(thread.dates.len()),
        total_count: Vec::with_capacity(thread.dates.len()),
    };
    for day in &thread.dates {
        let mut time = 0.0f64;
        let mut count = 0.0f64;
        for (j, (&ms, &n)) in day.sample_hang_ms.iter().zip(&day.sample_hang_count).enumerate() {
            if counts_sample(j) {
                time += f64::from(ms);
                count += f64::from(n);
            }
        }
        graph.total_time.push(time);
        graph.total_count.push(count);
    }

    Ok(graph)
}

/// Mark `root` and every descendant of it.
fn subtree_membership(thread: &Thread, root: usize) -> Result<Vec<bool>, GraphError> {
    let stack_count = thread.stack_table.len();
    if root >= stack_count {
        return Err(GraphError::InvalidSelection { stack: root, stack_count });
    }

    let children = OneToManyIndex::new(stack_count, &thread.stack_table.prefix);
    let mut members = vec![false; stack_count];
    let mut pending = vec![root];
    while let Some(stack) = pending.pop() {
        if std::mem::replace(&mut members[stack], true) {
            continue;
        }
        pending.extend_from_slice(children.children_of(stack));
    }

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DayId;
    use crate::profile::{DayTable, SampleTable, StackTable};

    //  0 ─┬─ 1 ── 3
    //     └─ 2
    //  4
    // samples hit stacks [0, 1, 2, 3, 4, none]
    fn test_thread() -> Thread {
        let prefix = vec![None, Some(0), Some(0), Some(1), None];
        let depth = vec![0, 1, 1, 2, 0];
        let day = |date: u64, ms: [f32; 6], count: [f32; 6]| DayTable {
            date: DayId(date),
            sample_hang_ms: ms.to_vec(),
            sample_hang_count: count.to_vec(),
        };
        Thread {
            name: Some("Gecko".to_string()),
            stack_table: StackTable { prefix, func: vec![0, 1, 2, 3, 4], depth },
            sample_table: SampleTable {
                length: 6,
                stack: vec![Some(0), Some(1), Some(2), Some(3), Some(4), None],
                sample_hang_ms: vec![11.0, 22.0, 33.0, 44.0, 55.0, 66.0],
                sample_hang_count: vec![2.0, 2.0, 2.0, 2.0, 2.0, 2.0],
            },
            dates: vec![
                day(1, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0], [1.0; 6]),
                day(2, [10.0, 20.0, 30.0, 40.0, 50.0, 60.0], [1.0; 6]),
            ],
            string_table: Default::default(),
        }
    }

    #[test]
    fn test_all_matches_plain_day_sums() {
        let thread = test_thread();
        let graph = build_date_graph(&thread, StackSelection::All).unwrap();
        assert_eq!(graph.total_time, vec![21.0, 210.0]);
        assert_eq!(graph.total_count, vec![6.0, 6.0]);
    }

    #[test]
    fn test_subtree_includes_descendants() {
        let thread = test_thread();
        let graph = build_date_graph(&thread, StackSelection::Stack(0)).unwrap();
        // stacks 0, 1, 2, 3
        assert_eq!(graph.total_time, vec![10.0, 100.0]);
        assert_eq!(graph.total_count, vec![4.0, 4.0]);
    }

    #[test]
    fn test_inner_node_subtree() {
        let thread = test_thread();
        let graph = build_date_graph(&thread, StackSelection::Stack(1)).unwrap();
        // stacks 1, 3
        assert_eq!(graph.total_time, vec![6.0, 60.0]);
    }

    #[test]
    fn test_leaf_selection() {
        let thread = test_thread();
        let graph = build_date_graph(&thread, StackSelection::Stack(4)).unwrap();
        assert_eq!(graph.total_time, vec![5.0, 50.0]);
        assert_eq!(graph.total_count, vec![1.0, 1.0]);
    }

    #[test]
    fn test_invalid_selection() {
        let thread = test_thread();
        let err = build_date_graph(&thread, StackSelection::Stack(5)).unwrap_err();
        assert_eq!(err, GraphError::InvalidSelection { stack: 5, stack_count: 5 });
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let thread = test_thread();
        let first = build_date_graph(&thread, StackSelection::Stack(0)).unwrap();
        let second = build_date_graph(&thread, StackSelection::Stack(0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_selection_from_option() {
        assert_eq!(StackSelection::from(None), StackSelection::All);
        assert_eq!(StackSelection::from(Some(3)), StackSelection::Stack(3));
    }
}
