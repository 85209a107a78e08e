use std::collections::VecDeque;

use ndarray::{Array1, Array2};

use crate::BatchError;

/// Sequential reader over utterance-keyed feature matrices.
///
/// Yields `(utterance-ID, frames x feature-dim)` records in source order.
/// Implementations own their underlying resource; dropping the reader
/// releases it.
pub trait MatrixReader {
    /// Advances to the next record. Returns `None` when the stream is
    /// exhausted.
    fn next_record(&mut self) -> Result<Option<(String, Array2<f32>)>, BatchError>;
}

/// Sequential reader over utterance-keyed integer label vectors.
///
/// Yields `(utterance-ID, per-frame labels)` records in source order.
pub trait VectorReader {
    /// Advances to the next record. Returns `None` when the stream is
    /// exhausted.
    fn next_record(&mut self) -> Result<Option<(String, Array1<i32>)>, BatchError>;
}

/// In-memory [`MatrixReader`] implementation.
/// Drains a pre-loaded record list. Suitable for testing or ephemeral use.
pub struct MemoryMatrixReader {
    records: VecDeque<(String, Array2<f32>)>,
}

impl MemoryMatrixReader {
    pub fn new(records: Vec<(String, Array2<f32>)>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl MatrixReader for MemoryMatrixReader {
    fn next_record(&mut self) -> Result<Option<(String, Array2<f32>)>, BatchError> {
        Ok(self.records.pop_front())
    }
}

/// In-memory [`VectorReader`] implementation.
/// Drains a pre-loaded record list. Suitable for testing or ephemeral use.
pub struct MemoryVectorReader {
    records: VecDeque<(String, Array1<i32>)>,
}

impl MemoryVectorReader {
    pub fn new(records: Vec<(String, Array1<i32>)>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl VectorReader for MemoryVectorReader {
    fn next_record(&mut self) -> Result<Option<(String, Array1<i32>)>, BatchError> {
        Ok(self.records.pop_front())
    }
}
