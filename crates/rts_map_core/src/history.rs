//! Fixed-capacity undo/redo storage

use std::collections::VecDeque;

/// Default depth of both history stacks
pub const HISTORY_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// Pop on a stack with nothing in it
    EmptyHistory,
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::EmptyHistory => write!(f, "History is empty"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// LIFO ring buffer. Pushing onto a full stack drops the oldest entry, so
/// depth never exceeds the capacity it was created with.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryStack<T> {
    /// Capacity is clamped to at least 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new entry, evicting the oldest one when full.
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub fn pop(&mut self) -> Result<T, HistoryError> {
        self.entries.pop_back().ok_or(HistoryError::EmptyHistory)
    }

    /// Most recent entry
    pub fn peek(&self) -> Option<&T> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T> Default for HistoryStack<T> {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_is_lifo() {
        let mut stack = HistoryStack::with_capacity(4);
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.peek(), Some(&1));
    }

    #[test]
    fn test_pop_empty_fails() {
        let mut stack: HistoryStack<u32> = HistoryStack::default();
        assert_eq!(stack.pop(), Err(HistoryError::EmptyHistory));
        assert_eq!(stack.capacity(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_push_past_capacity_evicts_oldest() {
        let mut stack = HistoryStack::with_capacity(3);
        for i in 0..3 {
            assert_eq!(stack.push(i), None);
        }
        assert_eq!(stack.push(3), Some(0));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.pop().is_err());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut stack = HistoryStack::with_capacity(2);
        stack.push("a");
        stack.push("b");
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), 2);
        stack.push("c");
        stack.push("d");
        stack.push("e");
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut stack = HistoryStack::with_capacity(0);
        stack.push(1);
        stack.push(2);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.pop(), Ok(2));
    }
}
