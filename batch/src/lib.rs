//! Speaker-adaptation batch assembly from aligned speech-feature and
//! per-frame label streams.
//!
//! # Architecture
//!
//! Batches are assembled in three stages:
//!
//! 1. [`SpeakerTable::load`]: utt2spk text table -> utterance-to-speaker
//!    codes, labels interned in first-seen order with `"unk"` reserved as 0
//! 2. [`load_data`]: feature stream + two label streams, joined per
//!    utterance and regrouped by speaker in stream order
//! 3. [`generate_batches`]: per-speaker timelines -> adapt/test window
//!    pairs plus a broadcast parameter row per pair
//!
//! # Window pairing
//!
//! Each speaker's utterances are concatenated into one timeline and sliced
//! into consecutive same-length windows:
//!
//! ```text
//! timeline: |---- adapt ----|---- test ----|---- adapt ----|---- test ----| ...
//!           offset          +n             +2n
//! ```
//!
//! The adapt window tunes the model to the speaker, the test window scores
//! the tuned model. Offsets step by `num_frames` while
//! `offset < L - 2 * num_frames` (strict), so a trailing pair that would
//! end exactly at the timeline length is dropped.
//!
//! # Example
//!
//! ```rust
//! use adaptkit_batch::{load_data, BatchConfig, MemoryMatrixReader, MemoryVectorReader};
//! use ndarray::{Array1, Array2};
//!
//! // Two utterances of one speaker, 30 frames in total.
//! let utt2spk = std::env::temp_dir().join("adaptkit-batch-doc-utt2spk");
//! std::fs::write(&utt2spk, "utt-1 spk-a\nutt-2 spk-a\n").unwrap();
//!
//! let feats = MemoryMatrixReader::new(vec![
//!     ("utt-1".into(), Array2::zeros((12, 4))),
//!     ("utt-2".into(), Array2::zeros((18, 4))),
//! ]);
//! let adapt = MemoryVectorReader::new(vec![
//!     ("utt-1".into(), Array1::zeros(12)),
//!     ("utt-2".into(), Array1::zeros(18)),
//! ]);
//! let test = MemoryVectorReader::new(vec![
//!     ("utt-1".into(), Array1::zeros(12)),
//!     ("utt-2".into(), Array1::zeros(18)),
//! ]);
//!
//! let cfg = BatchConfig { num_frames: 10 };
//! let (inputs, targets) = load_data(&[0.5, 1.5], feats, &utt2spk, adapt, test, &cfg).unwrap();
//! std::fs::remove_file(&utt2spk).ok();
//!
//! // 30 frames, window 10: only offset 0 satisfies 0 < 30 - 20.
//! assert_eq!(inputs.num_pairs(), 1);
//! assert_eq!(inputs.adapt_feats.shape(), &[1, 1, 10, 4]);
//! assert_eq!(targets.shape(), &[1, 10, 1]);
//! ```

mod batch;
mod error;
mod group;
mod loader;
mod reader;
mod speakers;

pub use batch::{generate_batches, BatchConfig, BatchInputs};
pub use error::BatchError;
pub use group::Grouping;
pub use loader::{load_data, load_utt_to_labels};
pub use reader::{MatrixReader, MemoryMatrixReader, MemoryVectorReader, VectorReader};
pub use speakers::{SpeakerRegistry, SpeakerTable, UNKNOWN_SPEAKER};
