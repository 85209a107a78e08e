use thiserror::Error;

/// Errors returned by batch assembly operations.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("malformed utt2spk line {line}: expected two tokens, got {content:?}")]
    MalformedUtt2spk { line: usize, content: String },

    #[error("utterance {utt:?} has no speaker mapping")]
    UnknownSpeaker { utt: String },

    #[error("utterance {utt:?} missing from {stream} label stream")]
    MissingLabels { utt: String, stream: &'static str },

    #[error("stream error: {0}")]
    Stream(String),

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
