/// Fixed-capacity array with an explicit overflow signal.
///
/// The GPU-facing arrays have build-time capacities; a push past capacity
/// must clamp, never write out of bounds. `try_push` surfaces the
/// overflow as an error and latches a sticky flag the owner can report
/// once per frame instead of once per rejected entry.

use bytemuck::Pod;

use crate::error::{Error, Result};

pub struct BoundedVec<T> {
    items: Vec<T>,
    capacity: usize,
    overflowed: bool,
}

impl<T> BoundedVec<T> {
    /// Create with a fixed capacity; storage is reserved up front.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    /// Fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries pushed since the last clear.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries still available before the capacity clamp.
    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    /// Whether any push has been rejected since the last clear.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Push a value, returning its index.
    ///
    /// At capacity the value is dropped, the sticky overflow flag is
    /// latched and `Error::CapacityExceeded` comes back.
    pub fn try_push(&mut self, value: T) -> Result<u32> {
        if self.items.len() >= self.capacity {
            self.overflowed = true;
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let index = self.items.len() as u32;
        self.items.push(value);
        Ok(index)
    }

    /// Drop all entries and reset the overflow flag. Capacity is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.overflowed = false;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Pod> BoundedVec<T> {
    /// Byte view for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.items)
    }
}

impl<T> std::ops::Index<usize> for BoundedVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

#[cfg(test)]
#[path = "bounded_vec_tests.rs"]
mod tests;
