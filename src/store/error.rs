use thiserror::Error;

/// Error type for todo store operations.
///
/// Absent matches are never errors; they show up as zero affected rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("todo store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
