//! Fixed-topology MLP binary classifier.
//!
//! The network is the usual two-hidden-block stack
//! (affine → batch norm → GELU → dropout, twice) followed by a single-unit
//! logit head. The topology is declared as an ordered list of [`LayerSpec`]
//! descriptors so the stack can change shape without touching the driver.
//!
//! Inference runs on a non-autodiff backend, where burn keeps dropout inert
//! and batch norm on its frozen running statistics, so there is no separate
//! eval switch to flip.

use std::path::Path;

use burn::nn::{BatchNorm, BatchNormConfig, Dropout, DropoutConfig, Gelu, Linear, LinearConfig};
use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder};
use tracing::debug;

// Keep the one-error `Result` alias out of scope here: the `Config` derive
// expands serde impls that name `Result` unqualified.
use crate::error::InferError;

/// One entry in the ordered topology declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerSpec {
    /// Learned affine transform (weights + bias).
    Affine { in_dim: usize, out_dim: usize },
    /// Per-feature batch normalization.
    Normalize { features: usize },
    /// Smooth nonlinearity (GELU).
    Activate,
    /// Dropout; inert at inference, kept so snapshots line up with training.
    RandomZero { prob: f64 },
}

/// Classifier dimensions, mirroring the arguments the snapshot was trained
/// with.
#[derive(Config, Debug)]
pub struct MlpClassifierConfig {
    pub input_dim: usize,
    pub hidden_dim1: usize,
    pub hidden_dim2: usize,
    pub dropout: f64,
}

/// A single materialized layer.
#[derive(Module, Debug)]
pub enum Layer<B: Backend> {
    Affine(Linear<B>),
    Normalize(BatchNorm<B, 0>),
    Activate(Gelu),
    RandomZero(Dropout),
}

/// The classifier: an ordered layer stack mapping `[rows, input_dim]`
/// features to `[rows, 1]` logits.
#[derive(Module, Debug)]
pub struct MlpClassifier<B: Backend> {
    pub layers: Vec<Layer<B>>,
}

impl MlpClassifierConfig {
    /// Ordered topology descriptors: two hidden blocks plus the logit head.
    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        vec![
            LayerSpec::Affine {
                in_dim: self.input_dim,
                out_dim: self.hidden_dim1,
            },
            LayerSpec::Normalize {
                features: self.hidden_dim1,
            },
            LayerSpec::Activate,
            LayerSpec::RandomZero { prob: self.dropout },
            LayerSpec::Affine {
                in_dim: self.hidden_dim1,
                out_dim: self.hidden_dim2,
            },
            LayerSpec::Normalize {
                features: self.hidden_dim2,
            },
            LayerSpec::Activate,
            LayerSpec::RandomZero { prob: self.dropout },
            LayerSpec::Affine {
                in_dim: self.hidden_dim2,
                out_dim: 1,
            },
        ]
    }

    /// Materialize the declared topology with fresh parameters.
    pub fn init<B: Backend>(&self, device: &B::Device) -> MlpClassifier<B> {
        let layers = self
            .layer_specs()
            .into_iter()
            .map(|spec| match spec {
                LayerSpec::Affine { in_dim, out_dim } => {
                    Layer::Affine(LinearConfig::new(in_dim, out_dim).init(device))
                }
                LayerSpec::Normalize { features } => {
                    Layer::Normalize(BatchNormConfig::new(features).init(device))
                }
                LayerSpec::Activate => Layer::Activate(Gelu::new()),
                LayerSpec::RandomZero { prob } => Layer::RandomZero(DropoutConfig::new(prob).init()),
            })
            .collect();

        MlpClassifier { layers }
    }
}

impl<B: Backend> MlpClassifier<B> {
    /// Forward pass through the stack, in declaration order.
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        self.layers.iter().fold(input, |x, layer| match layer {
            Layer::Affine(linear) => linear.forward(x),
            Layer::Normalize(norm) => norm.forward(x),
            Layer::Activate(act) => act.forward(x),
            Layer::RandomZero(drop) => drop.forward(x),
        })
    }

    /// Restore a trained parameter snapshot, then re-check the restored
    /// shapes against the declared topology.
    ///
    /// Burn will load a record whose tensors disagree with the configured
    /// dimensions; better to catch that here than deep inside a batched
    /// matmul.
    pub fn load_snapshot<P: AsRef<Path>>(
        self,
        path: P,
        config: &MlpClassifierConfig,
        device: &B::Device,
    ) -> crate::error::Result<Self> {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let restored = self.load_file(path.as_ref(), &recorder, device)?;
        restored.validate(config)?;
        debug!(path = %path.as_ref().display(), "parameter snapshot restored");
        Ok(restored)
    }

    /// Persist the current parameters as a snapshot file.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> crate::error::Result<()> {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        self.clone().save_file(path.as_ref(), &recorder)?;
        Ok(())
    }

    /// Check every restored layer against the declared descriptor list.
    pub fn validate(&self, config: &MlpClassifierConfig) -> crate::error::Result<()> {
        let specs = config.layer_specs();
        if specs.len() != self.layers.len() {
            return Err(InferError::Shape(format!(
                "layer count mismatch: snapshot has {}, topology declares {}",
                self.layers.len(),
                specs.len()
            )));
        }

        for (idx, (spec, layer)) in specs.iter().zip(self.layers.iter()).enumerate() {
            match (spec, layer) {
                (LayerSpec::Affine { in_dim, out_dim }, Layer::Affine(linear)) => {
                    let dims = linear.weight.dims();
                    if dims != [*in_dim, *out_dim] {
                        return Err(InferError::Shape(format!(
                            "layer[{idx}] affine weights {dims:?} do not match declared [{in_dim}, {out_dim}]"
                        )));
                    }
                    if let Some(bias) = &linear.bias {
                        if bias.dims() != [*out_dim] {
                            return Err(InferError::Shape(format!(
                                "layer[{idx}] affine bias {:?} does not match declared [{out_dim}]",
                                bias.dims()
                            )));
                        }
                    }
                }
                (LayerSpec::Normalize { features }, Layer::Normalize(norm)) => {
                    let dims = norm.gamma.dims();
                    if dims != [*features] {
                        return Err(InferError::Shape(format!(
                            "layer[{idx}] normalization width {dims:?} does not match declared [{features}]"
                        )));
                    }
                }
                (LayerSpec::Activate, Layer::Activate(_)) => {}
                (LayerSpec::RandomZero { .. }, Layer::RandomZero(_)) => {}
                (spec, _) => {
                    return Err(InferError::Shape(format!(
                        "layer[{idx}] kind does not match declared {spec:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}
