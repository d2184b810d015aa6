//! Bounded binary min-heap.
//!
//! Array-backed, zero-indexed (`parent(i) = (i - 1) / 2`). The heap never
//! grows past the capacity it was created with; the tree builder sizes it
//! to the number of distinct symbols, which is the most it ever holds.
//!
//! Sift-up and sift-down are loops, so heap depth never turns into call
//! stack depth.

use crate::error::{HuffmanError, Resource, Result};

#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
    capacity: usize,
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left(i: usize) -> usize {
    2 * i + 1
}

fn right(i: usize) -> usize {
    2 * i + 2
}

impl<T: Ord> MinHeap<T> {
    /// Empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Heapify `source` bottom-up in O(n).
    ///
    /// # Errors
    /// `CapacityExceeded` (heap) if `source` has more than `capacity` items.
    pub fn build(mut source: Vec<T>, capacity: usize) -> Result<Self> {
        if source.len() > capacity {
            return Err(HuffmanError::CapacityExceeded {
                resource: Resource::Heap,
                limit: capacity,
            }
            .into());
        }
        source.reserve_exact(capacity - source.len());

        let mut heap = Self {
            elements: source,
            capacity,
        };
        for i in (0..heap.len() / 2).rev() {
            heap.sift_down(i);
        }
        Ok(heap)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Append `value` and sift it up. O(log n).
    pub fn insert(&mut self, value: T) -> Result<()> {
        if self.elements.len() >= self.capacity {
            return Err(HuffmanError::CapacityExceeded {
                resource: Resource::Heap,
                limit: self.capacity,
            }
            .into());
        }
        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
        Ok(())
    }

    /// Remove and return the smallest element. O(log n).
    ///
    /// # Errors
    /// `HuffmanError::HeapUnderflow` on an empty heap.
    pub fn extract_min(&mut self) -> Result<T> {
        if self.elements.is_empty() {
            return Err(HuffmanError::HeapUnderflow.into());
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let min = self.elements.pop().ok_or(HuffmanError::HeapUnderflow)?;
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Check the heap property over the whole array.
    pub fn is_valid(&self) -> bool {
        (1..self.elements.len()).all(|i| self.elements[parent(i)] <= self.elements[i])
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = parent(i);
            if self.elements[i] >= self.elements[p] {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = left(i);
            let r = right(i);
            let mut smallest = i;

            if l < n && self.elements[l] < self.elements[smallest] {
                smallest = l;
            }
            if r < n && self.elements[r] < self.elements[smallest] {
                smallest = r;
            }
            if smallest == i {
                return;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }
}
