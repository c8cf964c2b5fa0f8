//! Raw fragment wire format
//!
//! Field names and array layout match what the aggregation jobs publish, so a
//! fragment deserializes straight from the fetched JSON document:
//!
//! ```json
//! {
//!   "threads": [{
//!     "name": "Gecko",
//!     "stackTable": { "length": 2, "prefix": [null, 0], "func": [0, 1] },
//!     "sampleTable": { "length": 1, "stack": [1] },
//!     "stringArray": ["main", "poll"],
//!     "dates": [{ "date": "20170801", "sampleHangMs": [5.0], "sampleHangCount": [1.0] }]
//!   }],
//!   "usageHoursByDate": { "20170801": 1234.5 },
//!   "uuid": "..."
//! }
//! ```
//!
//! A split index fragment sets `"isSplit": true` and lists thread names in
//! `threads` instead of thread objects.

use crate::domain::DayId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One fetched profile document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default)]
    pub threads: RawThreads,
    #[serde(default)]
    pub is_split: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_hours_by_date: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// The `threads` field: full thread objects, or thread names in a split index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawThreads {
    Threads(Vec<RawThread>),
    Names(Vec<String>),
}

impl Default for RawThreads {
    fn default() -> Self {
        RawThreads::Threads(Vec::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawThread {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub stack_table: RawStackTable,
    pub sample_table: RawSampleTable,
    #[serde(default)]
    pub string_array: Vec<String>,
    #[serde(default)]
    pub dates: Vec<RawDay>,
}

/// Columnar stack table; `prefix` is `null` for roots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStackTable {
    pub length: usize,
    pub prefix: Vec<Option<i64>>,
    pub func: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSampleTable {
    pub length: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack: Vec<Option<i64>>,
}

/// Hang data for one day, aligned with the thread's sample positions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    pub date: DayId,
    #[serde(default)]
    pub sample_hang_ms: Vec<f32>,
    #[serde(default)]
    pub sample_hang_count: Vec<f32>,
}
