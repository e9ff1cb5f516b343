//! Unit and property tests for `BoundedQueue`.

#[cfg(test)]
mod construction_tests {
    use crate::{BoundedQueue, QueueError};

    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(BoundedQueue::<u32>::new(0).unwrap_err(), QueueError::ZeroCapacity);
    }

    #[test]
    fn new_queue_is_empty() {
        let q = BoundedQueue::<u32>::new(4).unwrap();
        assert!(q.is_empty());
        assert!(!q.is_full());
        assert_eq!(q.capacity(), 4);
        assert_eq!((q.head(), q.tail()), (0, 0));
    }

    #[test]
    fn absurd_capacity_is_allocation_error() {
        let err = BoundedQueue::<u64>::new(usize::MAX).unwrap_err();
        assert_eq!(err, QueueError::Allocation { capacity: usize::MAX });
    }
}

#[cfg(test)]
mod fifo_tests {
    use crate::{BoundedQueue, QueueError};

    #[test]
    fn dequeue_order_matches_enqueue_order() {
        let mut q = BoundedQueue::new(3).unwrap();
        q.enqueue(10).unwrap();
        q.enqueue(20).unwrap();
        assert_eq!(q.dequeue(), Ok(10));
        q.enqueue(30).unwrap();
        q.enqueue(40).unwrap(); // wraps to slot 0
        assert_eq!(q.head(), 1);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), [20, 30, 40]);
        assert_eq!(q.dequeue(), Ok(20));
        assert_eq!(q.dequeue(), Ok(30));
        assert_eq!(q.dequeue(), Ok(40));
    }

    #[test]
    fn full_queue_rejects_without_overwrite() {
        let mut q = BoundedQueue::new(2).unwrap();
        q.enqueue('a').unwrap();
        q.enqueue('b').unwrap();
        assert!(q.is_full());
        assert_eq!(q.enqueue('c'), Err(QueueError::CapacityExceeded { capacity: 2 }));
        assert_eq!(q.dequeue(), Ok('a'));
        assert_eq!(q.dequeue(), Ok('b'));
    }

    #[test]
    fn empty_dequeue_errors_and_keeps_indices() {
        let mut q = BoundedQueue::<u8>::new(2).unwrap();
        assert_eq!(q.dequeue(), Err(QueueError::Empty));
        assert_eq!(q.tail(), 0);
    }

    #[test]
    fn zero_value_is_an_occupant() {
        let mut q = BoundedQueue::new(2).unwrap();
        q.enqueue(0u32).unwrap();
        assert!(!q.is_empty());
        assert_eq!(q.len(), 1);
        assert_eq!(q.peek(), Some(&0));
    }

    #[test]
    fn rewind_only_when_empty() {
        let mut q = BoundedQueue::new(3).unwrap();
        q.enqueue(1).unwrap();
        q.enqueue(2).unwrap();
        assert!(!q.rewind());
        q.dequeue().unwrap();
        q.dequeue().unwrap();
        assert_eq!(q.tail(), 2);
        assert!(q.rewind());
        assert_eq!((q.head(), q.tail()), (0, 0));
    }
}

#[cfg(test)]
mod pattern_tests {
    use crate::{BoundedQueue, Order};

    #[test]
    fn pattern_starts_at_tail() {
        let mut q = BoundedQueue::new(4).unwrap();
        for v in 0..3 {
            q.enqueue(v).unwrap();
        }
        q.dequeue().unwrap();
        // Occupied slots 1 and 2; walk begins at tail = 1.
        let fwd: Vec<bool> = q.pattern(Order::Forward).collect();
        assert_eq!(fwd, [true, true, false, false]);
        let rev: Vec<bool> = q.pattern(Order::Reverse).collect();
        assert_eq!(rev, [false, false, true, true]);
    }

    #[test]
    fn pattern_does_not_mutate() {
        let mut q = BoundedQueue::new(2).unwrap();
        q.enqueue(5).unwrap();
        let _ = q.pattern(Order::Forward).count();
        assert_eq!(q.len(), 1);
        assert_eq!(q.dequeue(), Ok(5));
    }
}

#[cfg(test)]
mod property_tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;

    use crate::{BoundedQueue, Order, QueueError};

    proptest! {
        /// Against a `VecDeque` model: FIFO order holds, the count tracks
        /// enqueues minus dequeues, and occupancy never exceeds capacity.
        #[test]
        fn behaves_like_bounded_vecdeque(
            capacity in 1usize..16,
            ops in proptest::collection::vec(any::<Option<u16>>(), 0..200),
        ) {
            let mut q = BoundedQueue::new(capacity).unwrap();
            let mut model = VecDeque::new();

            for op in ops {
                match op {
                    Some(v) => {
                        let result = q.enqueue(v);
                        if model.len() < capacity {
                            prop_assert_eq!(result, Ok(()));
                            model.push_back(v);
                        } else {
                            prop_assert_eq!(result, Err(QueueError::CapacityExceeded { capacity }));
                        }
                    }
                    None => {
                        prop_assert_eq!(q.dequeue().ok(), model.pop_front());
                    }
                }
                prop_assert_eq!(q.len(), model.len());
                prop_assert!(q.len() <= capacity);
                prop_assert_eq!(q.pattern(Order::Forward).filter(|&b| b).count(), model.len());
                prop_assert!(q.head() < capacity && q.tail() < capacity);
                prop_assert!(q.iter().eq(model.iter()));
            }
        }
    }
}
