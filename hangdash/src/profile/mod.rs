//! Canonical, densely indexed profile
//!
//! Tables stay columnar: each column is a flat buffer indexed in parallel,
//! never an array of per-row records. Everything here is built once by
//! [`normalize`] and treated as an immutable snapshot afterwards.

pub mod normalize;
pub mod raw;
pub mod string_table;

use crate::domain::{DayId, StringTableError};
use std::collections::BTreeMap;

pub use normalize::{
    merge_fragments, merge_split_fragments, normalize_fragments, normalize_profile, normalize_split_fragments,
    union_dates,
};
pub use raw::{RawDay, RawProfile, RawSampleTable, RawStackTable, RawThread, RawThreads};
pub use string_table::UniqueStringArray;

/// Call tree of one thread.
///
/// `prefix[i]` is the parent of stack `i` (`None` for a root) and is always a
/// smaller index, so `depth[i] == depth[prefix[i]] + 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackTable {
    pub prefix: Vec<Option<usize>>,
    pub func: Vec<u32>,
    pub depth: Vec<u32>,
}

impl StackTable {
    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }
}

/// All-days hang totals per sample position, plus the stack each sample hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    pub length: usize,
    pub stack: Vec<Option<usize>>,
    pub sample_hang_ms: Vec<f32>,
    pub sample_hang_count: Vec<f32>,
}

/// Hang data for one day, positionally aligned with the [`SampleTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct DayTable {
    pub date: DayId,
    pub sample_hang_ms: Vec<f32>,
    pub sample_hang_count: Vec<f32>,
}

impl DayTable {
    /// A day with no hangs recorded for any sample.
    pub fn zeroed(date: DayId, length: usize) -> Self {
        Self { date, sample_hang_ms: vec![0.0; length], sample_hang_count: vec![0.0; length] }
    }

    pub fn len(&self) -> usize {
        self.sample_hang_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_hang_ms.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Thread {
    pub name: Option<String>,
    pub stack_table: StackTable,
    pub sample_table: SampleTable,
    /// One entry per day of the profile's date axis, ascending.
    pub dates: Vec<DayTable>,
    pub string_table: UniqueStringArray,
}

impl Thread {
    /// Resolve the function name of a stack node through the string table.
    ///
    /// # Errors
    /// Returns `OutOfRange` if the stack's function handle is not in the table,
    /// or if `stack` itself is past the end of the stack table.
    pub fn func_name(&self, stack: usize) -> Result<&str, StringTableError> {
        let Some(&func) = self.stack_table.func.get(stack) else {
            return Err(StringTableError::OutOfRange { handle: stack, len: self.stack_table.len() });
        };
        self.string_table.resolve(func as usize)
    }

    pub fn date_axis(&self) -> Vec<DayId> {
        self.dates.iter().map(|d| d.date).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub threads: Vec<Thread>,
    /// Shared date axis: ascending, deduplicated, identical for every thread.
    pub dates: Vec<DayId>,
    pub usage_hours_by_date: Option<BTreeMap<String, f64>>,
    pub uuid: Option<String>,
}
