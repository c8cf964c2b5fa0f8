//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep day identifiers and worker identity from being
//! confused with the plain indices that fill the stack and sample tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day identifier on the date axis
///
/// Producers emit days as `YYYYMMDD` values, either as JSON numbers or as
/// numeric strings. Ordering is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WireDate", into = "u64")]
pub struct DayId(pub u64);

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DayId> for u64 {
    fn from(day: DayId) -> Self {
        day.0
    }
}

impl From<u64> for DayId {
    fn from(day: u64) -> Self {
        DayId(day)
    }
}

/// A date as it appears on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum WireDate {
    Number(u64),
    Text(String),
}

impl TryFrom<WireDate> for DayId {
    type Error = String;

    fn try_from(value: WireDate) -> Result<Self, Self::Error> {
        match value {
            WireDate::Number(n) => Ok(DayId(n)),
            WireDate::Text(s) => s
                .trim()
                .parse::<u64>()
                .map(DayId)
                .map_err(|e| format!("invalid date {s:?}: {e}")),
        }
    }
}

/// Identity of a background worker among its peers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerInfo {
    pub worker_index: usize,
    pub num_workers: usize,
}

impl fmt::Display for WorkerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Worker#{}/{}", self.worker_index, self.num_workers)
    }
}
