//! Model asset resolution and loading.

use std::fs;
use std::path::{Path, PathBuf};

use ort::session::Session;

use crate::error::{Error, Result};

/// Default style model shipped in the assets directory.
pub const DEFAULT_MODEL: &str = "generator_A-B_2.onnx";

/// Resolves named model assets into a local cache directory.
///
/// Assets are looked up in `assets_dir` and copied into `cache_dir` the first time
/// they are requested. A non-empty cached copy is used as is afterwards.
#[derive(Debug, Clone)]
pub struct ModelStore {
    assets_dir: PathBuf,
    cache_dir: PathBuf,
}

impl ModelStore {
    /// Create a model store using the platform cache directory.
    ///
    /// Uses:
    /// - Windows: `%LOCALAPPDATA%\stylecam\models`
    /// - Linux: `~/.cache/stylecam/models`
    /// - macOS: `~/Library/Caches/stylecam/models`
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub fn new<P: Into<PathBuf>>(assets_dir: P) -> Result<Self> {
        let base = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::with_cache_dir(assets_dir, base.join("stylecam").join("models"))
    }

    /// Create a model store with an explicit cache directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created.
    pub fn with_cache_dir<P: Into<PathBuf>, Q: Into<PathBuf>>(
        assets_dir: P,
        cache_dir: Q,
    ) -> Result<Self> {
        let cache_dir = cache_dir.into();

        fs::create_dir_all(&cache_dir).map_err(|source| Error::CacheDir {
            path: cache_dir.clone(),
            source,
        })?;

        Ok(Self {
            assets_dir: assets_dir.into(),
            cache_dir,
        })
    }

    /// Directory assets are copied into.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the local path of an asset, copying it into the cache if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset does not exist or cannot be copied.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let cached = self.cache_dir.join(name);

        if is_non_empty_file(&cached) {
            tracing::debug!("using cached asset {}", cached.display());
            return Ok(cached);
        }

        let source = self.assets_dir.join(name);
        if !source.is_file() {
            return Err(Error::AssetNotFound {
                name: name.to_string(),
                path: source,
            });
        }

        tracing::info!("Copying {name} into {}", self.cache_dir.display());

        // Write to a temporary file first, then rename for atomicity
        let temp_path = self.cache_dir.join(format!("{name}.tmp"));
        if let Err(err) = fs::copy(&source, &temp_path).and_then(|_| fs::rename(&temp_path, &cached))
        {
            // Best effort; the copy error is the one worth reporting.
            let _ = fs::remove_file(&temp_path);
            return Err(Error::AssetCopy {
                name: name.to_string(),
                path: source,
                source: err,
            });
        }

        Ok(cached)
    }

    /// Resolve an asset and load it as an ONNX session.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset is missing or the model cannot be loaded.
    pub fn load_session(&self, name: &str) -> Result<Session> {
        let path = self.resolve(name)?;
        load_session_from_file(name, &path)
    }
}

/// Build an ONNX session from a model file.
///
/// # Errors
///
/// Returns an error if the file is missing or is not a loadable model.
pub fn load_session_from_file(name: &str, path: &Path) -> Result<Session> {
    if !path.is_file() {
        return Err(Error::AssetNotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        });
    }

    Session::builder()
        .map_err(|source| Error::ModelLoad {
            name: name.to_string(),
            source,
        })?
        .commit_from_file(path)
        .map_err(|source| Error::ModelLoad {
            name: name.to_string(),
            source,
        })
}

fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.len() > 0)
}
