use br_core::CoreError;
use br_queue::QueueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("queue fault: {0}")]
    Queue(#[from] QueueError),

    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{0} thread panicked")]
    ThreadPanicked(String),
}

pub type SimResult<T> = Result<T, SimError>;
