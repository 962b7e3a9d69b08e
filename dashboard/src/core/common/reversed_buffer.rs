// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Newest-first bounded buffer, used for line input history.
//!
//! Backed by an append-only [Vec]. Logical index 0 is the last item pushed. Eviction
//! removes the oldest item from the front of the [Vec], which is `O(n)`. History depth
//! is small (50 by default) so this is fine.

use super::RingBuffer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReversedBuffer<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> ReversedBuffer<T> {
    /// A `capacity` of 0 is bumped to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> { self.items.iter().rev() }
}

impl<T> RingBuffer<T> for ReversedBuffer<T> {
    fn capacity(&self) -> usize { self.capacity }

    fn len(&self) -> usize { self.items.len() }

    fn get(&self, index: usize) -> Option<&T> {
        let len = self.items.len();
        if index >= len {
            return None;
        }
        self.items.get(len - 1 - index)
    }

    fn add(&mut self, value: T) {
        if self.items.len() == self.capacity {
            self.items.remove(0);
        }
        self.items.push(value);
    }

    fn clear(&mut self) { self.items.clear(); }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::DashboardError;

    #[test]
    fn test_newest_first() {
        let mut buffer = ReversedBuffer::new(5);
        buffer.add("a");
        buffer.add("b");
        buffer.add("c");

        assert_eq!(buffer.get(0), Some(&"c"));
        assert_eq!(buffer.get(1), Some(&"b"));
        assert_eq!(buffer.get(2), Some(&"a"));
        assert_eq!(buffer.get(3), None);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut buffer = ReversedBuffer::new(2);
        for it in 1..=4 {
            buffer.add(it);
        }
        assert_eq!(buffer.len(), 2);
        assert!(buffer.is_full());
        assert_eq!(buffer.first(), Some(&4));
        assert_eq!(buffer.last(), Some(&3));
    }

    #[test]
    fn test_try_get_out_of_range() {
        let buffer = ReversedBuffer::<String>::new(2);
        assert!(matches!(
            buffer.try_get(0),
            Err(DashboardError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }
}
