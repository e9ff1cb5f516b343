//! `BoundedQueue` — fixed-capacity FIFO with wraparound indices.
//!
//! # Layout
//!
//! ```text
//!   slots:  [ _ _ X X X _ _ _ ]
//!                 ^     ^
//!                tail   head
//! ```
//!
//! `head` is the next insertion slot, `tail` the next removal slot; both stay
//! in `[0, capacity)`.  Because `head == tail` holds both when empty and when
//! full, the occupancy count is kept separately and every slot records its
//! own state.
//!
//! # Ownership
//!
//! The queue itself is not synchronised.  Shared queues sit behind a lock
//! owned by their caller (see `br-sim`'s `SideGate`).

use crate::{QueueError, QueueResult};

/// Direction of an occupancy pattern walk, starting from `tail`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Order {
    /// `tail, tail+1, …` — front of the queue first.
    Forward,
    /// `tail+cap-1, …, tail` — front of the queue last.
    Reverse,
}

#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    slots: Vec<Option<T>>,
    head:  usize,
    tail:  usize,
    /// Cached occupied-slot count for O(1) `len()`.
    len:   usize,
}

impl<T> BoundedQueue<T> {
    /// Allocate a queue with `capacity` empty slots.
    ///
    /// Fails with [`QueueError::ZeroCapacity`] for a zero capacity and
    /// [`QueueError::Allocation`] if the slots cannot be reserved.
    pub fn new(capacity: usize) -> QueueResult<Self> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| QueueError::Allocation { capacity })?;
        slots.resize_with(capacity, || None);
        Ok(Self { slots, head: 0, tail: 0, len: 0 })
    }

    /// Append `value` at `head`.
    ///
    /// A full queue rejects the value with [`QueueError::CapacityExceeded`];
    /// no occupant is ever overwritten.
    pub fn enqueue(&mut self, value: T) -> QueueResult<()> {
        let capacity = self.capacity();
        let slot = &mut self.slots[self.head];
        if slot.is_some() {
            return Err(QueueError::CapacityExceeded { capacity });
        }
        *slot = Some(value);
        self.head = (self.head + 1) % capacity;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the occupant at `tail`.
    pub fn dequeue(&mut self) -> QueueResult<T> {
        let value = self.slots[self.tail].take().ok_or(QueueError::Empty)?;
        self.tail = (self.tail + 1) % self.capacity();
        self.len -= 1;
        Ok(value)
    }

    /// The occupant that the next `dequeue` would return.
    pub fn peek(&self) -> Option<&T> {
        self.slots[self.tail].as_ref()
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Next insertion index.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Next removal index.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Move both indices back to slot 0.  Only allowed on an empty queue;
    /// returns `false` (and changes nothing) otherwise.
    pub fn rewind(&mut self) -> bool {
        if !self.is_empty() {
            return false;
        }
        self.head = 0;
        self.tail = 0;
        true
    }

    /// Occupancy of every slot, walked from `tail` in `order`.  Lazy and
    /// non-mutating; the display collaborator renders it as `X`/`_`.
    pub fn pattern(&self, order: Order) -> impl Iterator<Item = bool> + '_ {
        let capacity = self.capacity();
        (0..capacity).map(move |i| {
            let offset = match order {
                Order::Forward => i,
                Order::Reverse => capacity - 1 - i,
            };
            self.slots[(self.tail + offset) % capacity].is_some()
        })
    }

    /// Occupants in FIFO order (front first).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity();
        (0..self.len).filter_map(move |i| self.slots[(self.tail + i) % capacity].as_ref())
    }
}
