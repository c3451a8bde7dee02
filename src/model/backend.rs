//! Inference backends that map an input tensor to an output tensor.

use std::path::Path;

use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use crate::error::{Error, Result};
use crate::image::{tensor_len, ImageTensor};

use super::loader::{load_session_from_file, ModelStore};

/// Something that can run the style model.
///
/// Input and output are both `(1, 3, S, S)` planar tensors with values in [-1, 1].
pub trait InferenceBackend {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run the model on a single tensor.
    ///
    /// # Errors
    ///
    /// Returns an error if the input has the wrong shape or inference fails.
    fn infer(&mut self, input: &ImageTensor) -> Result<ImageTensor>;
}

/// Style model executed by ONNX Runtime.
pub struct OnnxBackend {
    name: String,
    side: u32,
    session: Session,
}

impl OnnxBackend {
    /// Load a model from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be loaded.
    pub fn load<P: AsRef<Path>>(path: P, side: u32) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let session = load_session_from_file(&name, path)?;
        Ok(Self {
            name,
            side,
            session,
        })
    }

    /// Load a named model asset through a [`ModelStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if the asset is missing or cannot be loaded.
    pub fn from_store(store: &ModelStore, name: &str, side: u32) -> Result<Self> {
        tracing::info!("Loading style model {name}...");
        let session = store.load_session(name)?;
        Ok(Self {
            name: name.to_string(),
            side,
            session,
        })
    }
}

impl InferenceBackend for OnnxBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn infer(&mut self, input: &ImageTensor) -> Result<ImageTensor> {
        let expected = tensor_len(self.side);
        if input.len() != expected {
            return Err(Error::ShapeMismatch {
                expected: format!("{expected} input values"),
                actual: format!("{} values {:?}", input.len(), input.shape()),
            });
        }

        let input_value =
            Tensor::from_array(input.clone()).map_err(|source| Error::Inference { source })?;

        let outputs = self
            .session
            .run(ort::inputs![input_value])
            .map_err(|source| Error::Inference { source })?;

        // Get first output
        let output = outputs
            .values()
            .next()
            .ok_or_else(|| Error::ShapeMismatch {
                expected: "stylized image output".to_string(),
                actual: "no output".to_string(),
            })?;

        extract_array4(&output)
    }
}

/// Backend that hands its input straight back.
///
/// Useful for checking orientation and tensor marshalling without model weights.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityBackend;

impl InferenceBackend for IdentityBackend {
    fn name(&self) -> &str {
        "identity"
    }

    fn infer(&mut self, input: &ImageTensor) -> Result<ImageTensor> {
        Ok(input.clone())
    }
}

/// Extract a 4D array from an ONNX value.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn extract_array4(value: &ort::value::ValueRef<'_>) -> Result<Array4<f32>> {
    let (shape_info, data) = value
        .try_extract_tensor::<f32>()
        .map_err(|source| Error::Inference { source })?;

    // Safe: tensor dimensions are always non-negative and within bounds
    let dims: Vec<usize> = shape_info.iter().map(|&x| x as usize).collect();

    if dims.len() != 4 {
        return Err(Error::ShapeMismatch {
            expected: "4D tensor".to_string(),
            actual: format!("{}D tensor", dims.len()),
        });
    }

    Array4::from_shape_vec((dims[0], dims[1], dims[2], dims[3]), data.to_vec()).map_err(|_| {
        Error::ShapeMismatch {
            expected: format!("{dims:?}"),
            actual: "reshape failed".to_string(),
        }
    })
}
