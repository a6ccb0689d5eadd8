//! Feature-table loading and ordered batch slicing.
//!
//! The persisted artifact is a rank-2 tensor with one row per example:
//! column 0 carries a label or row id and is dropped on load, columns 1..N
//! are the features fed to the model.

use std::path::Path;

use burn::prelude::*;
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder};
use tracing::debug;

use crate::error::{InferError, Result};

/// Row-major feature matrix, already stripped of its label column.
#[derive(Debug, Clone)]
pub struct FeatureTable<B: Backend> {
    features: Tensor<B, 2>,
}

impl<B: Backend> FeatureTable<B> {
    /// Load a persisted rank-2 tensor and drop its label column.
    pub fn load<P: AsRef<Path>>(path: P, input_dim: usize, device: &B::Device) -> Result<Self> {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let table: Tensor<B, 2> = recorder.load(path.as_ref().into(), device)?;
        debug!(path = %path.as_ref().display(), "feature table loaded");
        Self::from_table(table, input_dim)
    }

    /// Split an in-memory `[rows, 1 + features]` table into its feature
    /// columns, checking the column-count invariant.
    pub fn from_table(table: Tensor<B, 2>, input_dim: usize) -> Result<Self> {
        let [rows, cols] = table.dims();
        if cols < 2 {
            return Err(InferError::Shape(format!(
                "feature table needs a label column plus at least one feature column, got {cols}"
            )));
        }
        if cols - 1 != input_dim {
            return Err(InferError::Shape(format!(
                "feature table has {} feature column(s), model expects {input_dim}",
                cols - 1
            )));
        }
        Ok(Self {
            features: table.slice([0..rows, 1..cols]),
        })
    }

    pub fn rows(&self) -> usize {
        self.features.dims()[0]
    }

    /// Contiguous fixed-size row batches in original order; the last batch
    /// may be ragged. No shuffling, no duplication.
    pub fn batches(&self, batch_size: usize) -> Result<Batches<'_, B>> {
        if batch_size == 0 {
            return Err(InferError::Validation("batch size must be > 0".to_string()));
        }
        Ok(Batches {
            table: self,
            batch_size,
            cursor: 0,
        })
    }
}

/// Iterator over contiguous row slices of a [`FeatureTable`].
#[derive(Debug)]
pub struct Batches<'a, B: Backend> {
    table: &'a FeatureTable<B>,
    batch_size: usize,
    cursor: usize,
}

impl<B: Backend> Iterator for Batches<'_, B> {
    type Item = Tensor<B, 2>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.table.rows();
        if self.cursor >= rows {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(rows);
        let batch = self.table.features.clone().slice([self.cursor..end]);
        self.cursor = end;
        Some(batch)
    }
}
