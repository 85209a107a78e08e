use ndarray::{concatenate, s, stack, Array2, Array3, Array4, Axis};
use tracing::debug;

use crate::{BatchError, Grouping};

/// Configures window slicing for batch assembly.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Frames per adapt/test window (default: 1000). Zero falls back to the
    /// default.
    pub num_frames: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { num_frames: 1000 }
    }
}

/// The four input arrays of a training pair, in feed order.
///
/// Together with the test-label array returned alongside it, this follows
/// the usual (inputs, target) convention: the model consumes `params`, the
/// adapt window, and the test features, and is scored against the test
/// labels.
#[derive(Debug, Clone)]
pub struct BatchInputs {
    /// Broadcast parameter vector: (pairs, params-dim), one identical row
    /// per window pair.
    pub params: Array2<f32>,
    /// Adapt-window features: (pairs, 1, num_frames, feat-dim).
    pub adapt_feats: Array4<f32>,
    /// Adapt-window labels: (pairs, 1, num_frames, 1).
    pub adapt_labels: Array4<i32>,
    /// Test-window features: (pairs, num_frames, feat-dim).
    pub test_feats: Array3<f32>,
}

impl BatchInputs {
    /// Returns the number of window pairs in the batch.
    pub fn num_pairs(&self) -> usize {
        self.params.nrows()
    }
}

/// Slices per-speaker timelines into adapt/test window pairs.
///
/// For each speaker, in group first-seen order, the per-utterance sequences
/// are concatenated into one timeline and consecutive non-overlapping
/// windows are paired: an adapt window at `offset` and a test window at
/// `offset + num_frames`, with `offset` stepping by `num_frames` while
/// `offset < L - 2 * num_frames` (strict). The final pair whose test window
/// would end exactly at the timeline length is deliberately dropped.
///
/// Window pairing assumes the three timelines of a speaker are
/// frame-aligned; nothing here checks that, so a cross-stream length
/// mismatch yields misaligned pairs rather than an error.
///
/// The adapt arrays carry a singleton axis at position 1, one adaptation
/// step. A future extension would repeat along that axis instead of merely
/// expanding it, to support multi-step adaptation.
///
/// Zero total pairs is not an error: the arrays come back with a leading
/// axis of 0.
pub fn generate_batches(
    params: &[f32],
    feats: &Grouping<Array2<f32>>,
    adapt_labels: &Grouping<Array2<i32>>,
    test_labels: &Grouping<Array2<i32>>,
    cfg: &BatchConfig,
) -> Result<(BatchInputs, Array3<i32>), BatchError> {
    let num_frames = if cfg.num_frames > 0 {
        cfg.num_frames
    } else {
        BatchConfig::default().num_frames
    };

    let mut adapt_x: Vec<Array2<f32>> = Vec::new();
    let mut adapt_y: Vec<Array2<i32>> = Vec::new();
    let mut test_x: Vec<Array2<f32>> = Vec::new();
    let mut test_y: Vec<Array2<i32>> = Vec::new();
    let mut feat_dim = 0usize;

    for (spk, spk_feat_seqs) in feats.iter() {
        let spk_feats = concat_timeline(spk_feat_seqs)?;
        let spk_adapt = concat_timeline(adapt_labels.get(spk).unwrap_or(&[]))?;
        let spk_test = concat_timeline(test_labels.get(spk).unwrap_or(&[]))?;
        if feat_dim == 0 {
            feat_dim = spk_feats.ncols();
        }

        // Strict bound: offsets in [0, L - 2n) stepping by n. Speakers with
        // fewer than two windows of frames produce nothing.
        let limit = spk_feats.nrows().saturating_sub(2 * num_frames);
        for offset in (0..limit).step_by(num_frames) {
            adapt_x.push(spk_feats.slice(s![offset..offset + num_frames, ..]).to_owned());
            adapt_y.push(spk_adapt.slice(s![offset..offset + num_frames, ..]).to_owned());
            test_x.push(
                spk_feats
                    .slice(s![offset + num_frames..offset + 2 * num_frames, ..])
                    .to_owned(),
            );
            test_y.push(
                spk_test
                    .slice(s![offset + num_frames..offset + 2 * num_frames, ..])
                    .to_owned(),
            );
        }
    }

    let pairs = adapt_x.len();
    debug!(pairs, num_frames, "assembled window pairs");

    let params = Array2::from_shape_fn((pairs, params.len()), |(_, j)| params[j]);

    let (adapt_feats, adapt_labels, test_feats, test_labels) = if pairs == 0 {
        (
            Array4::zeros((0, 1, num_frames, feat_dim)),
            Array4::zeros((0, 1, num_frames, 1)),
            Array3::zeros((0, num_frames, feat_dim)),
            Array3::zeros((0, num_frames, 1)),
        )
    } else {
        (
            stack_windows(&adapt_x)?.insert_axis(Axis(1)),
            stack_windows(&adapt_y)?.insert_axis(Axis(1)),
            stack_windows(&test_x)?,
            stack_windows(&test_y)?,
        )
    };

    Ok((
        BatchInputs {
            params,
            adapt_feats,
            adapt_labels,
            test_feats,
        },
        test_labels,
    ))
}

/// Concatenates a speaker's per-utterance sequences into one timeline.
fn concat_timeline<A: Clone>(seqs: &[Array2<A>]) -> Result<Array2<A>, BatchError> {
    let views: Vec<_> = seqs.iter().map(|seq| seq.view()).collect();
    Ok(concatenate(Axis(0), &views)?)
}

/// Stacks equally-shaped windows along a new leading batch axis.
fn stack_windows<A: Clone>(windows: &[Array2<A>]) -> Result<Array3<A>, BatchError> {
    let views: Vec<_> = windows.iter().map(|win| win.view()).collect();
    Ok(stack(Axis(0), &views)?)
}
