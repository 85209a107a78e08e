use std::collections::HashMap;
use std::path::Path;

use ndarray::{Array2, Array3, Axis};
use tracing::debug;

use crate::batch::{generate_batches, BatchConfig, BatchInputs};
use crate::reader::{MatrixReader, VectorReader};
use crate::speakers::SpeakerTable;
use crate::{BatchError, Grouping};

/// Reads a label stream into an utterance-keyed map of label columns.
///
/// One entry per utterance; the stream's 1-D record is reshaped to a
/// frames x 1 column, nothing else. Takes the reader by value so it is
/// dropped (and its resource released) on completion or error.
pub fn load_utt_to_labels<R: VectorReader>(
    mut reader: R,
) -> Result<HashMap<String, Array2<i32>>, BatchError> {
    let mut utt_to_labels = HashMap::new();
    while let Some((utt, labels)) = reader.next_record()? {
        utt_to_labels.insert(utt, labels.insert_axis(Axis(1)));
    }
    Ok(utt_to_labels)
}

/// Assembles speaker-adaptation window pairs from three aligned streams.
///
/// Both label streams are read into utterance-keyed maps, the utt2spk table
/// is parsed, and then every utterance the feature reader emits (in its
/// native order) is joined with its speaker code and label sequences and
/// appended to that speaker's running lists. The grouped sequences go to
/// [`generate_batches`] for window slicing.
///
/// An utterance missing from the speaker table or from either label map is
/// fatal. A per-utterance frame-count disagreement between the streams is
/// not detected and silently corrupts window offsets downstream.
pub fn load_data<F, A, T, P>(
    params: &[f32],
    mut feats: F,
    utt2spk: P,
    adapt_labels: A,
    test_labels: T,
    cfg: &BatchConfig,
) -> Result<(BatchInputs, Array3<i32>), BatchError>
where
    F: MatrixReader,
    A: VectorReader,
    T: VectorReader,
    P: AsRef<Path>,
{
    let utt_to_adapt = load_utt_to_labels(adapt_labels)?;
    let utt_to_test = load_utt_to_labels(test_labels)?;
    let table = SpeakerTable::load(utt2spk)?;

    let mut feat_groups = Grouping::new();
    let mut adapt_groups = Grouping::new();
    let mut test_groups = Grouping::new();

    while let Some((utt, utt_feats)) = feats.next_record()? {
        let spk = table
            .speaker_of(&utt)
            .ok_or_else(|| BatchError::UnknownSpeaker { utt: utt.clone() })?;
        let utt_adapt = utt_to_adapt
            .get(&utt)
            .ok_or_else(|| BatchError::MissingLabels {
                utt: utt.clone(),
                stream: "adapt",
            })?;
        let utt_test = utt_to_test
            .get(&utt)
            .ok_or_else(|| BatchError::MissingLabels {
                utt: utt.clone(),
                stream: "test",
            })?;

        // TODO: validate that features and both label streams agree on the
        // frame count of each utterance.
        feat_groups.push(spk, utt_feats);
        adapt_groups.push(spk, utt_adapt.clone());
        test_groups.push(spk, utt_test.clone());
    }

    debug!(
        speakers = feat_groups.len(),
        "grouped feature stream by speaker"
    );

    generate_batches(params, &feat_groups, &adapt_groups, &test_groups, cfg)
}
