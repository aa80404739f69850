// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resume cursor for long polling.

/// Offset of the next update to request.
///
/// Only moves forward: it becomes `id + 1` for any observed `id` at or past
/// the current value, so updates arriving out of order never rewind it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeCursor {
    next: i64,
}

impl ResumeCursor {
    pub fn new(start: i64) -> Self {
        Self { next: start }
    }

    pub fn value(&self) -> i64 {
        self.next
    }

    /// Records an update id. Returns `true` if the cursor advanced.
    pub fn observe(&mut self, update_id: i64) -> bool {
        if update_id >= self.next {
            self.next = update_id.saturating_add(1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unordered_batch_ends_one_past_the_maximum() {
        let mut cursor = ResumeCursor::default();
        for id in [5, 3, 9, 7] {
            cursor.observe(id);
        }
        assert_eq!(cursor.value(), 10);
    }

    #[test]
    fn never_moves_backwards() {
        let mut cursor = ResumeCursor::new(100);
        assert!(!cursor.observe(42));
        assert!(!cursor.observe(99));
        assert_eq!(cursor.value(), 100);
        assert!(cursor.observe(100));
        assert_eq!(cursor.value(), 101);
    }

    #[test]
    fn saturates_at_the_top() {
        let mut cursor = ResumeCursor::default();
        cursor.observe(i64::MAX);
        assert_eq!(cursor.value(), i64::MAX);
    }
}
