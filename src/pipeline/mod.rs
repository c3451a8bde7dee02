//! Photo style transfer pipeline.

mod stylize;

pub use stylize::{Config, Pipeline};
