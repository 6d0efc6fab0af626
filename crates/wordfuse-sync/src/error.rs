//! Error types for the sync boundary.

/// Errors from the Store or Bus collaborators.
///
/// Carried as strings because the concrete backend (and its error type)
/// lives behind the trait objects; the gateway only needs something to
/// log and retry on.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A store read or write failed.
    #[error("store operation failed: {0}")]
    Store(String),

    /// A bus publish failed.
    #[error("bus publish failed: {0}")]
    Bus(String),
}
