// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A fixed capacity ring buffer on the heap. The capacity is chosen at runtime (eg:
//! from [`crate::DashboardConfig`]), storage is allocated lazily as items arrive.

use std::fmt::Debug;

use super::RingBuffer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingBufferHeap<T> {
    internal_storage: Vec<Option<T>>,
    capacity: usize,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T> RingBufferHeap<T> {
    /// A `capacity` of 0 is bumped to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            internal_storage: Vec::with_capacity(capacity.min(1024)),
            capacity,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Remove from tail (ie, remove the oldest item).
    pub fn remove(&mut self) -> Option<T> {
        if self.count == 0 || self.internal_storage.is_empty() {
            return None;
        }
        let value = self.internal_storage[self.tail].take();
        self.tail = (self.tail + 1) % self.capacity;
        self.count -= 1;
        value
    }

    #[must_use]
    pub fn iter(&self) -> RingBufferHeapIterator<'_, T> {
        RingBufferHeapIterator {
            ring_buffer: self,
            iterator_index: 0,
        }
    }
}

impl<T> RingBuffer<T> for RingBufferHeap<T> {
    fn capacity(&self) -> usize { self.capacity }

    fn len(&self) -> usize { self.count }

    fn get(&self, index: usize) -> Option<&T> {
        if index >= self.count {
            return None;
        }
        let actual_index = (self.tail + index) % self.capacity;
        self.internal_storage
            .get(actual_index)
            .and_then(|item| item.as_ref())
    }

    /// Insert at head (ie, insert the newest item).
    fn add(&mut self, value: T) {
        if self.count == self.capacity {
            let _unused: Option<_> = self.remove();
        }
        if self.internal_storage.len() < self.capacity {
            self.internal_storage.push(Some(value));
        } else {
            self.internal_storage[self.head] = Some(value);
        }
        self.head = (self.head + 1) % self.capacity;
        self.count += 1;
    }

    fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
        self.internal_storage.clear();
    }
}

/// This implementation allows the ring buffer to be used in a for loop directly.
impl<'a, T> IntoIterator for &'a RingBufferHeap<T> {
    type Item = &'a T;
    type IntoIter = RingBufferHeapIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Yields items oldest first.
#[derive(Debug)]
pub struct RingBufferHeapIterator<'a, T> {
    ring_buffer: &'a RingBufferHeap<T>,
    iterator_index: usize,
}

impl<'a, T> Iterator for RingBufferHeapIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.ring_buffer.get(self.iterator_index)?;
        self.iterator_index += 1;
        Some(item)
    }
}
