//! Custom error types for stylecam.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the stylecam library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read an image file from disk.
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image is empty or otherwise unusable.
    #[error("invalid image {width}x{height}: {reason}")]
    InvalidImage {
        width: u32,
        height: u32,
        reason: String,
    },

    /// The named model asset does not exist.
    #[error("model asset {name} not found at {path}")]
    AssetNotFound { name: String, path: PathBuf },

    /// Failed to copy a model asset into the cache.
    #[error("failed to copy model asset {name} from {path}: {source}")]
    AssetCopy {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load an ONNX model.
    #[error("failed to load ONNX model {name}: {source}")]
    ModelLoad {
        name: String,
        #[source]
        source: ort::Error,
    },

    /// Model inference failed.
    #[error("model inference failed: {source}")]
    Inference {
        #[source]
        source: ort::Error,
    },

    /// Failed to create cache directory.
    #[error("failed to create cache directory {path}: {source}")]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Shape mismatch in tensor operations.
    #[error("tensor shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

/// Result type alias for stylecam operations.
pub type Result<T> = std::result::Result<T, Error>;
