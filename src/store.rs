//! Append-only line store shared between the stream reader and the renderer.
//!
//! Every line received from the input stream lands here, indexed by arrival order.
//! Lines are never removed or mutated, so an index stays valid for the life of the
//! process. A single `parking_lot::Mutex` serializes appends against read traversals;
//! readers go through [`Snapshot`], which holds the lock for as long as it lives, so a
//! scan always sees a consistent prefix of the store and never a half-appended line.

use parking_lot::{Mutex, MutexGuard};

/// Number of lines reserved up front when no explicit hint is given.
pub const DEFAULT_CAPACITY_HINT: usize = 10_000_000;

/// Thread-safe, append-only, growable sequence of text lines.
#[derive(Debug)]
pub struct LineStore {
    lines: Mutex<Vec<String>>,
}

impl LineStore {
    /// Create an empty store with `capacity_hint` lines pre-reserved.
    ///
    /// High line-rate input would otherwise trigger repeated reallocation of the
    /// backing vector while the lock is held.
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            lines: Mutex::new(Vec::with_capacity(capacity_hint)),
        }
    }

    /// Append one line at the end of the store.
    ///
    /// Blocks only for as long as it takes to acquire the lock, which may include
    /// waiting for an in-progress render scan to finish.
    pub fn append(&self, line: String) {
        self.lines.lock().push(line);
    }

    /// Number of lines received so far.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lock the store for a read traversal.
    ///
    /// Appends are held off until the returned snapshot is dropped; keep it short-lived.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            guard: self.lines.lock(),
        }
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY_HINT)
    }
}

/// Read-only, locked view of the store.
pub struct Snapshot<'a> {
    guard: MutexGuard<'a, Vec<String>>,
}

impl<'a> Snapshot<'a> {
    /// Length of the store at the instant the lock was taken.
    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.guard.get(index).map(String::as_str)
    }

    /// Lines from the most recently appended back toward index 0.
    pub fn iter_rev(&self) -> impl Iterator<Item = &str> + '_ {
        self.guard.iter().rev().map(String::as_str)
    }
}
