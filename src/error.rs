use thiserror::Error;

/// Error types for `ChunkList` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ChunkListError {
    /// Index is beyond the valid range for the requested operation
    #[error("Index out of bounds: index {index} is beyond list length {length}")]
    IndexOutOfBounds {
        /// Index that was supplied
        index: usize,
        /// Current length of the list
        length: usize,
    },
    /// Operation requires at least one element
    #[error("Operation on empty list: {operation}")]
    Empty {
        /// Name of the operation that was attempted
        operation: &'static str,
    },
    /// Internal chain bookkeeping was found inconsistent
    #[error("Corrupt node chain: {reason}")]
    CorruptChain {
        /// Description of the inconsistency
        reason: &'static str,
    },
}
