//! Error types for the water simulation core
//!
//! The simulation itself never fails: invalid coordinates return neutral
//! values and operations on an uninitialized grid are no-ops. Errors only
//! exist at the crate edges — configuration loading and snapshot I/O.

/// Result type for fallible terraflow operations
pub type WaterResult<T> = Result<T, WaterError>;

/// Errors produced at the crate edges
#[derive(Debug, thiserror::Error)]
pub enum WaterError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Corrupted snapshot: {message}")]
    CorruptedSnapshot { message: String },

    #[error("Snapshot codec error: {0}")]
    SnapshotCodec(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WaterError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        WaterError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a corrupted-snapshot error
    pub fn corrupted(message: impl Into<String>) -> Self {
        WaterError::CorruptedSnapshot {
            message: message.into(),
        }
    }
}
