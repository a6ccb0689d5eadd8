//! Batch prediction driver: restore a snapshot, score a feature table, print
//! calibrated probabilities.

use std::io::Write;

use burn::tensor::activation::sigmoid;
use burn_ndarray::{NdArray, NdArrayDevice};
use tracing::info;

use crate::cli::PredictArgs;
use crate::error::{InferError, Result};
use crate::model::MlpClassifierConfig;
use crate::table::FeatureTable;

/// CPU inference backend. Non-autodiff, so dropout is inert and batch norm
/// applies its frozen running statistics.
pub type CpuBackend = NdArray<f32>;

/// Header line printed before the probability stream.
pub const OUTPUT_HEADER: &str = "predicted_probability_to_persist";

/// Map a `--device-name` value to a compute device.
///
/// The ndarray backend only has a CPU target; anything else is rejected up
/// front instead of being silently remapped.
pub fn resolve_device(name: &str) -> Result<NdArrayDevice> {
    match name {
        "cpu" => Ok(NdArrayDevice::Cpu),
        other => Err(InferError::Device(other.to_string())),
    }
}

/// Run the whole load-predict-print sequence, writing to `out`.
///
/// Every failure is fatal; nothing is written to `out` unless all rows were
/// scored.
pub fn run<W: Write>(args: &PredictArgs, out: &mut W) -> Result<()> {
    let device = resolve_device(&args.device_name)?;

    let config = MlpClassifierConfig::new(
        args.input_dim,
        args.hidden_dim1,
        args.hidden_dim2,
        args.dropout_p,
    );
    let model = config
        .init::<CpuBackend>(&device)
        .load_snapshot(&args.model_file, &config, &device)?;
    info!(model = %args.model_file.display(), "restored parameter snapshot");

    let table = FeatureTable::<CpuBackend>::load(&args.data_file, args.input_dim, &device)?;
    info!(
        rows = table.rows(),
        batch_size = args.batch_size,
        "feature table ready"
    );

    let mut probabilities: Vec<f32> = Vec::with_capacity(table.rows());
    for batch in table.batches(args.batch_size)? {
        let logits = model.forward(batch);
        let probs = sigmoid(logits);
        let values = probs
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| InferError::Shape(format!("probability readback failed: {e:?}")))?;
        probabilities.extend(values);
    }
    info!(predictions = probabilities.len(), "inference complete");

    writeln!(out, "{OUTPUT_HEADER}")?;
    for p in &probabilities {
        writeln!(out, "{p}")?;
    }
    Ok(())
}
