// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DashboardError, DashboardResult};

/// Fixed capacity container. Adding beyond [`RingBuffer::capacity`] evicts the oldest
/// item. How logical indices map to items depends on the implementation:
/// - [`crate::RingBufferHeap`]: index 0 is the oldest item.
/// - [`crate::ReversedBuffer`]: index 0 is the newest item.
pub trait RingBuffer<T> {
    fn capacity(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    fn is_full(&self) -> bool { self.len() == self.capacity() }

    /// Returns [None] when `index >= len`.
    fn get(&self, index: usize) -> Option<&T>;

    /// Same as [`RingBuffer::get`] but an out of range index is an error.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::IndexOutOfRange`] if `index >= len`.
    fn try_get(&self, index: usize) -> DashboardResult<&T> {
        self.get(index).ok_or(DashboardError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    fn first(&self) -> Option<&T> { self.get(0) }

    fn last(&self) -> Option<&T> { self.len().checked_sub(1).and_then(|i| self.get(i)) }

    fn add(&mut self, value: T);

    fn clear(&mut self);
}
