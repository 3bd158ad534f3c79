use thiserror::Error;

/// Errors returned by [`Binding`](super::Binding).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A compare-and-set expected a generation that is no longer current.
    #[error("stale generation: expected {expected}, binding is at {current}")]
    StaleGeneration { expected: u64, current: u64 },
}
