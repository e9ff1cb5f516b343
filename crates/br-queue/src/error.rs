use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is full ({capacity} slots occupied)")]
    CapacityExceeded { capacity: usize },

    #[error("dequeue from an empty queue")]
    Empty,

    #[error("queue capacity must be at least 1")]
    ZeroCapacity,

    #[error("could not allocate {capacity} queue slots")]
    Allocation { capacity: usize },
}

pub type QueueResult<T> = Result<T, QueueError>;
