//! Per-thread string interner
//!
//! Function and file names repeat heavily across a thread's stack table, so
//! the profile stores each distinct string once and refers to it by handle.
//! Handles are dense and sequential from 0; the table only grows.

use crate::domain::StringTableError;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct UniqueStringArray {
    strings: Vec<String>,
    handles: HashMap<String, usize>,
}

impl UniqueStringArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table whose handles are the positions in `strings`.
    ///
    /// A repeated string keeps the handle of its first occurrence for
    /// `intern`, but every position still resolves.
    pub fn from_strings(strings: Vec<String>) -> Self {
        let mut handles = HashMap::with_capacity(strings.len());
        for (index, s) in strings.iter().enumerate() {
            handles.entry(s.clone()).or_insert(index);
        }
        Self { strings, handles }
    }

    /// If a string is already known to the table, return its handle. Otherwise,
    /// insert it and return its newly allocated handle.
    pub fn intern(&mut self, value: &str) -> usize {
        if let Some(&handle) = self.handles.get(value) {
            return handle;
        }
        let handle = self.strings.len();
        self.strings.push(value.to_string());
        self.handles.insert(value.to_string(), handle);
        handle
    }

    /// # Errors
    /// Returns `OutOfRange` if `handle` was never allocated.
    pub fn resolve(&self, handle: usize) -> Result<&str, StringTableError> {
        self.strings
            .get(handle)
            .map(String::as_str)
            .ok_or(StringTableError::OutOfRange { handle, len: self.strings.len() })
    }

    pub fn has_string(&self, value: &str) -> bool {
        self.handles.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.strings
    }
}
