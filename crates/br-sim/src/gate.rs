//! `SideGate` — one lock per approach queue.

use br_core::{OccupantId, Side};
use br_queue::{BoundedQueue, Order, QueueResult};
use parking_lot::Mutex;

use crate::QueueView;

/// Serialises all access to one side's approach queue.  The arrival process
/// enqueues through it; the scheduler dequeues through it.
///
/// Every method takes and drops the lock internally, so no caller can hold it
/// across a delay or an observer callback.
pub struct SideGate {
    side:  Side,
    queue: Mutex<BoundedQueue<OccupantId>>,
}

impl SideGate {
    pub fn new(side: Side, queue: BoundedQueue<OccupantId>) -> Self {
        Self { side, queue: Mutex::new(queue) }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Place a new arrival at the back of the queue.
    pub fn admit(&self, occupant: OccupantId) -> QueueResult<()> {
        self.queue.lock().enqueue(occupant)
    }

    /// Take the occupant at the front of the queue.
    pub fn release_front(&self) -> QueueResult<OccupantId> {
        self.queue.lock().dequeue()
    }

    /// Occupants currently waiting.
    pub fn waiting(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.queue.lock().capacity()
    }

    /// Occupants in FIFO order, front first.
    pub fn occupants(&self) -> Vec<OccupantId> {
        self.queue.lock().iter().copied().collect()
    }

    /// Read-only view for display.  The left queue is drawn with its front
    /// nearest the crossing, i.e. reversed.
    pub(crate) fn view(&self) -> QueueView {
        let order = match self.side {
            Side::Left  => Order::Reverse,
            Side::Right => Order::Forward,
        };
        let queue = self.queue.lock();
        QueueView { waiting: queue.len(), occupancy: queue.pattern(order).collect() }
    }
}
