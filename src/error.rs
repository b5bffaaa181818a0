//! Error types surfaced to the host

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("invalid tuning for `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },

    #[error("segment {index} does not connect to the next one: {reason}")]
    BrokenSeam { index: usize, reason: String },

    #[error("spawn point ({x}, {z}) is not inside the generated gallery")]
    SpawnNotWalkable { x: f32, z: f32 },

    #[error("gallery already entered")]
    AlreadyEntered,

    #[error("gallery is not ready (generation has not completed)")]
    NotReady,

    #[error("tuning config parse failed: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

impl GalleryError {
    pub(crate) fn tuning(field: &'static str, reason: impl Into<String>) -> Self {
        GalleryError::InvalidTuning {
            field,
            reason: reason.into(),
        }
    }
}
