//! # stylecam
//!
//! Photo style transfer with a pre-trained ONNX generator.
//!
//! A photo is rotated upright from its EXIF orientation, resized to the model's square
//! input, marshalled into a planar `[-1, 1]` tensor, run through the model, decoded
//! back into an image and resized to the requested size.
//!
//! ## Example
//!
//! ```no_run
//! use stylecam::{Config, Pipeline};
//!
//! # fn main() -> stylecam::Result<()> {
//! let config = Config::default();
//! let mut pipeline = Pipeline::new(config)?;
//!
//! pipeline.process("photo.jpg", "styled.png", None)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod model;
pub mod pipeline;

pub use error::{Error, Result};
pub use crate::image::OrientationTag;
pub use model::{IdentityBackend, InferenceBackend, ModelStore, OnnxBackend};
pub use pipeline::{Config, Pipeline};
