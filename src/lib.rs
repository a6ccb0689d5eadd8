pub mod cli;
pub mod error;
pub mod model;
pub mod predict;
pub mod table;

pub use cli::PredictArgs;
pub use error::{InferError, Result};
pub use model::{Layer, LayerSpec, MlpClassifier, MlpClassifierConfig};
pub use predict::{run, CpuBackend, OUTPUT_HEADER};
pub use table::FeatureTable;
