use std::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced by buffer construction and scene/config loading.
///
/// Drawing never fails: out-of-range geometry is clipped silently.
#[derive(Debug, Error)]
pub enum FinchError {
    #[error("row stride {stride} is smaller than width {width}")]
    InvalidStride { width: u32, stride: u32 },

    #[error("size hint of {hint} bytes cannot hold {required} bytes of pixels")]
    SizeHintTooSmall { hint: usize, required: usize },

    #[error("pixel storage holds {len} elements but {required} are needed")]
    StorageTooSmall { len: usize, required: usize },

    #[error("failed to allocate {bytes} bytes of pixel storage")]
    Allocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FinchError>;
