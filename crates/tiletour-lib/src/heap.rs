use crate::error::{Error, Result};

/// Key used to order items in the [`MinHeap`].
pub trait Priority {
    fn priority(&self) -> u32;
}

/// Array-backed binary min-heap.
///
/// Insertion sifts up while strictly smaller than the parent and extraction
/// sifts down toward the smaller child, so items with equal priority keep a
/// stable, structure-determined order. The pathfinder's tie-breaking depends
/// on exactly these rules.
#[derive(Debug)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T: Priority> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Priority> MinHeap<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item and restore the heap property along its ancestor chain.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        let mut index = self.items.len() - 1;
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index].priority() < self.items[parent].priority() {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Remove and return the minimum item, or `EmptyQueue` if there is none.
    pub fn extract_min(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(Error::EmptyQueue);
        }
        if self.items.len() == 1 {
            // Single element needs no reheapify.
            return Ok(self.items.remove(0));
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop().ok_or(Error::EmptyQueue)?;
        self.sift_down(0);
        Ok(min)
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = index * 2 + 1;
            let right = index * 2 + 2;
            let mut smallest = index;
            if left < len && self.items[left].priority() < self.items[smallest].priority() {
                smallest = left;
            }
            if right < len && self.items[right].priority() < self.items[smallest].priority() {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}
