//! Command-line interface for the inference driver.

use clap::Parser;
use std::path::PathBuf;

/// Run a pretrained binary-classification MLP over a persisted feature table
/// and print one calibrated probability per row.
#[derive(Parser, Debug, Clone)]
#[command(name = "mlp-infer", version)]
#[command(about = "Run a trained binary classification MLP", long_about = None)]
pub struct PredictArgs {
    /// Parameter snapshot to restore (named-msgpack record)
    #[arg(long)]
    pub model_file: PathBuf,

    /// Feature table to score (rank-2 tensor record, label column first)
    #[arg(long)]
    pub data_file: PathBuf,

    /// Compute target to run on
    #[arg(long, default_value = "cpu")]
    pub device_name: String,

    /// Rows per inference batch
    #[arg(long, default_value_t = 16384)]
    pub batch_size: usize,

    /// Number of feature columns
    #[arg(long)]
    pub input_dim: usize,

    /// First hidden layer width
    #[arg(long)]
    pub hidden_dim1: usize,

    /// Second hidden layer width
    #[arg(long)]
    pub hidden_dim2: usize,

    /// Drop-out rate the snapshot was trained with (inert at inference)
    #[arg(long)]
    pub dropout_p: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_invocation() {
        let args = PredictArgs::parse_from([
            "mlp-infer",
            "--model-file",
            "model.mpk",
            "--data-file",
            "features.mpk",
            "--input-dim",
            "12",
            "--hidden-dim1",
            "64",
            "--hidden-dim2",
            "32",
            "--dropout-p",
            "0.3",
        ]);
        assert_eq!(args.device_name, "cpu");
        assert_eq!(args.batch_size, 16384);
        assert_eq!(args.input_dim, 12);
        assert_eq!(args.dropout_p, 0.3);
    }

    #[test]
    fn missing_required_dimension_is_usage_error() {
        let res = PredictArgs::try_parse_from([
            "mlp-infer",
            "--model-file",
            "model.mpk",
            "--data-file",
            "features.mpk",
        ]);
        assert!(res.is_err());
    }
}
