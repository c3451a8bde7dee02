//! Style model loading and inference.

mod backend;
mod loader;

pub use backend::{IdentityBackend, InferenceBackend, OnnxBackend};
pub use loader::{load_session_from_file, ModelStore, DEFAULT_MODEL};
