//! Main style transfer pipeline.

use std::path::{Path, PathBuf};

use image::{imageops, imageops::FilterType, RgbaImage};

use crate::error::{Error, Result};
use crate::image::{
    image_to_tensor, load_image, normalize, save_image, tensor_to_image, Normalization,
    OrientationTag, MODEL_INPUT_SIZE,
};
use crate::model::{InferenceBackend, ModelStore, OnnxBackend, DEFAULT_MODEL};

/// Configuration for the style transfer pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// File name of the model asset.
    pub model_name: String,

    /// Directory holding bundled model assets.
    pub assets_dir: PathBuf,

    /// Where resolved assets are cached. `None` uses the platform cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Side of the square image the model consumes and produces.
    pub model_side: u32,

    /// Per-channel normalization applied before inference.
    pub normalization: Normalization,

    /// Output JPEG quality (1-100).
    pub output_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            assets_dir: PathBuf::from("assets"),
            cache_dir: None,
            model_side: MODEL_INPUT_SIZE,
            normalization: Normalization::default(),
            output_quality: 95,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            return Err(Error::InvalidParameter {
                name: "model_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.model_side == 0 {
            return Err(Error::InvalidParameter {
                name: "model_side".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !(1..=100).contains(&self.output_quality) {
            return Err(Error::InvalidParameter {
                name: "output_quality".to_string(),
                reason: "must be between 1 and 100".to_string(),
            });
        }

        self.normalization.validate()
    }
}

/// Style transfer pipeline.
///
/// Owns the inference backend, so the model is loaded once and reused by every
/// call to [`Pipeline::run`] and [`Pipeline::process`].
pub struct Pipeline {
    config: Config,
    backend: Box<dyn InferenceBackend>,
}

impl Pipeline {
    /// Create a new pipeline, loading the ONNX model named in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the model cannot be loaded.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let store = match &config.cache_dir {
            Some(cache_dir) => ModelStore::with_cache_dir(&config.assets_dir, cache_dir)?,
            None => ModelStore::new(&config.assets_dir)?,
        };
        let backend = OnnxBackend::from_store(&store, &config.model_name, config.model_side)?;

        Self::with_backend(config, Box::new(backend))
    }

    /// Create a pipeline around an already constructed backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_backend(config: Config, backend: Box<dyn InferenceBackend>) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            "Pipeline ready: backend {}, model side {}",
            backend.name(),
            config.model_side
        );

        Ok(Self { config, backend })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Stylize a decoded image.
    ///
    /// The image is rotated upright according to `orientation`, encoded, passed
    /// through the backend, decoded and resized to `target_width`×`target_height`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target size is zero, the image is empty, the backend
    /// fails or its output has the wrong shape. Nothing is returned on failure.
    pub fn run(
        &mut self,
        raw: RgbaImage,
        orientation: OrientationTag,
        target_width: u32,
        target_height: u32,
    ) -> Result<RgbaImage> {
        if target_width == 0 || target_height == 0 {
            return Err(Error::InvalidParameter {
                name: "target".to_string(),
                reason: format!("{target_width}x{target_height} must be positive"),
            });
        }

        let side = self.config.model_side;
        let upright = normalize(raw, orientation);

        let input = image_to_tensor(&upright, side, &self.config.normalization)?;

        tracing::debug!("Running {} on {:?} tensor", self.backend.name(), input.shape());
        let output = self.backend.infer(&input)?;

        let stylized = tensor_to_image(&output, side)?;

        if (target_width, target_height) == (side, side) {
            return Ok(stylized);
        }
        Ok(imageops::resize(
            &stylized,
            target_width,
            target_height,
            FilterType::Triangle,
        ))
    }

    /// Stylize an image file and write the result.
    ///
    /// `target` defaults to the dimensions of the upright input image.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, processing or saving fails.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input_path: P,
        output_path: Q,
        target: Option<(u32, u32)>,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        tracing::info!("Processing image: {}", input_path.display());

        let (raw, orientation) = load_image(input_path)?;
        let (width, height) = raw.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage {
                width,
                height,
                reason: "image has zero area".to_string(),
            });
        }

        let (target_width, target_height) =
            target.unwrap_or_else(|| orientation.upright_dimensions(width, height));

        let stylized = self.run(raw, orientation, target_width, target_height)?;

        tracing::info!("Saving output to: {}", output_path.display());
        save_image(stylized, output_path, self.config.output_quality)?;

        tracing::info!("Processing complete");
        Ok(())
    }
}
