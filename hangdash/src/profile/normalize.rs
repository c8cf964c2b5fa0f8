//! Profile normalization
//!
//! Turns one or more fetched fragments into a single canonical [`Profile`]:
//!
//! ```text
//! fragments ──► merge_fragments ──► RawProfile ──► normalize_profile ──► Profile
//!                (split case)                        │
//!                                                    ├─ union_dates (shared date axis)
//!                                                    └─ per thread:
//!                                                         stack table  (prefix, func, depth)
//!                                                         day tables   (copied or zero-filled)
//!                                                         all-days totals
//!                                                         string table
//! ```
//!
//! Normalization does no I/O. Stack tables are validated eagerly: every
//! prefix must point at an earlier index, which also rules out cycles.

use super::raw::{RawDay, RawProfile, RawSampleTable, RawStackTable, RawThread, RawThreads};
use super::{DayTable, Profile, SampleTable, StackTable, Thread, UniqueStringArray};
use crate::domain::{DayId, ProfileError};
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

/// Merge fetched fragments into one raw profile.
///
/// A single fragment passes through. Several fragments are merged as a
/// split profile, see [`merge_split_fragments`].
///
/// # Errors
/// Fails on an empty input, a fragment without threads, or a fragment that
/// still lists thread names.
pub fn merge_fragments(fragments: Vec<RawProfile>) -> Result<RawProfile, ProfileError> {
    match fragments.len() {
        0 => Err(ProfileError::NoFragments),
        1 => Ok(fragments.into_iter().next().unwrap_or_default()),
        _ => merge_split_fragments(fragments),
    }
}

/// Merge the per-thread fragments of a split profile.
///
/// The metadata comes from the first fragment and each fragment contributes
/// its first thread, in fragment order, however many fragments there are.
///
/// # Errors
/// Fails on an empty input, a fragment without threads, or a fragment that
/// still lists thread names.
pub fn merge_split_fragments(fragments: Vec<RawProfile>) -> Result<RawProfile, ProfileError> {
    let Some(first) = fragments.first() else {
        return Err(ProfileError::NoFragments);
    };
    let usage_hours_by_date = first.usage_hours_by_date.clone();
    let uuid = first.uuid.clone();
    let mut threads = Vec::with_capacity(fragments.len());

    for (index, fragment) in fragments.into_iter().enumerate() {
        if fragment.uuid != uuid {
            debug!("Fragment {index} has uuid {:?}, keeping {uuid:?} from the first fragment", fragment.uuid);
        }
        let RawThreads::Threads(fragment_threads) = fragment.threads else {
            return Err(ProfileError::UnexpectedThreadNames);
        };
        let thread = fragment_threads.into_iter().next().ok_or(ProfileError::EmptyFragment(index))?;
        threads.push(thread);
    }

    Ok(RawProfile { threads: RawThreads::Threads(threads), is_split: false, usage_hours_by_date, uuid })
}

/// Merge and normalize in one step.
///
/// # Errors
/// See [`merge_fragments`] and [`normalize_profile`].
pub fn normalize_fragments(fragments: Vec<RawProfile>) -> Result<Profile, ProfileError> {
    normalize_profile(merge_fragments(fragments)?)
}

/// Merge and normalize the per-thread fragments of a split profile.
///
/// # Errors
/// See [`merge_split_fragments`] and [`normalize_profile`].
pub fn normalize_split_fragments(fragments: Vec<RawProfile>) -> Result<Profile, ProfileError> {
    normalize_profile(merge_split_fragments(fragments)?)
}

/// Union of every thread's dates, ascending and deduplicated.
pub fn union_dates(threads: &[RawThread]) -> Vec<DayId> {
    threads
        .iter()
        .flat_map(|t| t.dates.iter().map(|d| d.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build the canonical profile from a raw profile holding thread objects.
///
/// # Errors
/// Returns a [`ProfileError`] if any thread's stack or sample table is
/// malformed, or if the profile only lists thread names.
pub fn normalize_profile(raw: RawProfile) -> Result<Profile, ProfileError> {
    let RawThreads::Threads(raw_threads) = raw.threads else {
        return Err(ProfileError::UnexpectedThreadNames);
    };

    let all_dates = union_dates(&raw_threads);
    let threads = raw_threads
        .into_iter()
        .map(|thread| normalize_thread(thread, &all_dates))
        .collect::<Result<Vec<_>, _>>()?;

    let dates = threads.first().map(Thread::date_axis).unwrap_or_default();
    info!(
        "Normalized profile: {} threads, {} dates, {} stacks",
        threads.len(),
        dates.len(),
        threads.iter().map(|t| t.stack_table.len()).sum::<usize>()
    );

    Ok(Profile { threads, dates, usage_hours_by_date: raw.usage_hours_by_date, uuid: raw.uuid })
}

fn normalize_thread(raw: RawThread, all_dates: &[DayId]) -> Result<Thread, ProfileError> {
    let stack_table = build_stack_table(&raw.stack_table)?;
    let length = raw.sample_table.length;
    let stack = build_sample_stacks(&raw.sample_table, stack_table.len())?;

    let mut all_hang_ms = vec![0.0f32; length];
    let mut all_hang_count = vec![0.0f32; length];

    // First entry wins when a producer repeats a date.
    let mut by_date: HashMap<DayId, &RawDay> = HashMap::with_capacity(raw.dates.len());
    for day in &raw.dates {
        by_date.entry(day.date).or_insert(day);
    }

    let mut dates = Vec::with_capacity(all_dates.len());
    let mut backfilled = 0usize;
    for &date in all_dates {
        let Some(day) = by_date.get(&date) else {
            backfilled += 1;
            dates.push(DayTable::zeroed(date, length));
            continue;
        };

        let sample_hang_ms = copy_day_column(&day.sample_hang_ms, length, date, "sampleHangMs")?;
        let sample_hang_count = copy_day_column(&day.sample_hang_count, length, date, "sampleHangCount")?;
        for (total, v) in all_hang_ms.iter_mut().zip(&sample_hang_ms) {
            *total += v;
        }
        for (total, v) in all_hang_count.iter_mut().zip(&sample_hang_count) {
            *total += v;
        }
        dates.push(DayTable { date, sample_hang_ms, sample_hang_count });
    }
    dates.sort_by_key(|d| d.date);

    debug!(
        "Thread {}: {} stacks, {length} samples, {} days ({backfilled} zero-filled)",
        raw.name.as_deref().unwrap_or("<unnamed>"),
        stack_table.len(),
        dates.len()
    );

    Ok(Thread {
        name: raw.name,
        stack_table,
        sample_table: SampleTable {
            length,
            stack,
            sample_hang_ms: all_hang_ms,
            sample_hang_count: all_hang_count,
        },
        dates,
        string_table: UniqueStringArray::from_strings(raw.string_array),
    })
}

/// Rebuild the dense stack table, computing depths in one forward pass.
fn build_stack_table(raw: &RawStackTable) -> Result<StackTable, ProfileError> {
    check_column_len("stackTable", "prefix", raw.length, raw.prefix.len())?;
    check_column_len("stackTable", "func", raw.length, raw.func.len())?;

    let mut prefix = Vec::with_capacity(raw.length);
    let mut depth: Vec<u32> = Vec::with_capacity(raw.length);

    for (index, &raw_prefix) in raw.prefix.iter().enumerate() {
        match raw_prefix {
            None => {
                prefix.push(None);
                depth.push(0);
            }
            Some(p) => {
                let parent = usize::try_from(p).map_err(|_| ProfileError::MalformedStackTable {
                    index,
                    prefix: p,
                    reason: "is negative",
                })?;
                if parent >= index {
                    return Err(ProfileError::MalformedStackTable {
                        index,
                        prefix: p,
                        reason: "does not precede its child",
                    });
                }
                prefix.push(Some(parent));
                depth.push(depth[parent] + 1);
            }
        }
    }

    Ok(StackTable { prefix, func: raw.func.clone(), depth })
}

/// Map each sample to its stack. Without a stack column, sample `j` hit stack `j`.
fn build_sample_stacks(raw: &RawSampleTable, stack_count: usize) -> Result<Vec<Option<usize>>, ProfileError> {
    if raw.stack.is_empty() {
        if raw.length > stack_count {
            return Err(ProfileError::MalformedSampleTable(format!(
                "no stack column and {} samples exceed {stack_count} stacks",
                raw.length
            )));
        }
        return Ok((0..raw.length).map(Some).collect());
    }

    check_column_len("sampleTable", "stack", raw.length, raw.stack.len())?;
    raw.stack
        .iter()
        .enumerate()
        .map(|(sample, &stack)| match stack {
            None => Ok(None),
            Some(s) => usize::try_from(s)
                .ok()
                .filter(|&s| s < stack_count)
                .map(Some)
                .ok_or_else(|| {
                    ProfileError::MalformedSampleTable(format!(
                        "sample {sample} references stack {s} (table has {stack_count})"
                    ))
                }),
        })
        .collect()
}

/// Copy a per-day column into a zero-filled buffer of the thread's sample count.
fn copy_day_column(column: &[f32], length: usize, date: DayId, name: &str) -> Result<Vec<f32>, ProfileError> {
    if column.len() > length {
        return Err(ProfileError::MalformedSampleTable(format!(
            "{name} for {date} has {} entries, thread has {length} samples",
            column.len()
        )));
    }
    let mut buf = vec![0.0f32; length];
    buf[..column.len()].copy_from_slice(column);
    Ok(buf)
}

fn check_column_len(table: &'static str, column: &'static str, expected: usize, actual: usize) -> Result<(), ProfileError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ProfileError::ColumnLengthMismatch { table, column, expected, actual })
    }
}
