use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error("trend store error: {0}")]
    Store(String),
}
