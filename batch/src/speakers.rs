use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::BatchError;

/// Code pre-registered for the unknown speaker.
pub const UNKNOWN_SPEAKER: u32 = 0;

/// Ordered bijection between speaker-label strings and integer codes.
///
/// Codes are assigned in first-seen order, starting after the pre-registered
/// `"unk" -> 0` entry. A label seen twice reuses its existing code. A real
/// speaker literally labeled `"unk"` collides with code 0; callers that care
/// must pick a different label.
#[derive(Debug, Clone)]
pub struct SpeakerRegistry {
    codes: HashMap<String, u32>,
    labels: Vec<String>,
}

impl SpeakerRegistry {
    /// Creates a registry with `"unk"` pre-registered as code 0.
    pub fn new() -> Self {
        Self {
            codes: HashMap::from([("unk".to_string(), UNKNOWN_SPEAKER)]),
            labels: vec!["unk".to_string()],
        }
    }

    /// Returns the code for `label`, assigning the next code on first sight.
    pub fn intern(&mut self, label: &str) -> u32 {
        if let Some(&code) = self.codes.get(label) {
            return code;
        }
        let code = self.labels.len() as u32;
        self.codes.insert(label.to_string(), code);
        self.labels.push(label.to_string());
        code
    }

    /// Returns the code for `label` without assigning one.
    pub fn code(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Returns the label registered for `code`.
    pub fn label(&self, code: u32) -> Option<&str> {
        self.labels.get(code as usize).map(String::as_str)
    }

    /// Returns the number of registered labels, including `"unk"`.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: `"unk"` is registered at construction.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for SpeakerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Utterance-to-speaker mapping built from a two-column text table.
#[derive(Debug, Clone)]
pub struct SpeakerTable {
    utt_to_spk: HashMap<String, u32>,
    registry: SpeakerRegistry,
}

impl SpeakerTable {
    /// Loads a whitespace-separated `utterance speaker-label` table.
    ///
    /// Each line must contain exactly two tokens; any other token count
    /// (including blank lines) is fatal. Speaker labels are interned in
    /// first-seen order via [`SpeakerRegistry`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BatchError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, BatchError> {
        let mut registry = SpeakerRegistry::new();
        let mut utt_to_spk = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            let (utt, spk) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(utt), Some(spk), None) => (utt, spk),
                _ => {
                    return Err(BatchError::MalformedUtt2spk {
                        line: idx + 1,
                        content: line.to_string(),
                    });
                }
            };
            let code = registry.intern(spk);
            utt_to_spk.insert(utt.to_string(), code);
        }

        Ok(Self {
            utt_to_spk,
            registry,
        })
    }

    /// Returns the speaker code mapped to `utt`.
    pub fn speaker_of(&self, utt: &str) -> Option<u32> {
        self.utt_to_spk.get(utt).copied()
    }

    /// Returns the number of mapped utterances.
    pub fn len(&self) -> usize {
        self.utt_to_spk.len()
    }

    /// Returns true if no utterance is mapped.
    pub fn is_empty(&self) -> bool {
        self.utt_to_spk.is_empty()
    }

    /// Read-only view of the label registry behind this table.
    pub fn registry(&self) -> &SpeakerRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_first_seen_order() {
        let mut reg = SpeakerRegistry::new();
        assert_eq!(reg.code("unk"), Some(0));
        assert_eq!(reg.intern("alice"), 1);
        assert_eq!(reg.intern("bob"), 2);
        // Repeats reuse the existing code.
        assert_eq!(reg.intern("alice"), 1);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.label(1), Some("alice"));
        assert_eq!(reg.label(2), Some("bob"));
        assert_eq!(reg.label(3), None);
    }

    #[test]
    fn registry_unk_collides_with_reserved_code() {
        let mut reg = SpeakerRegistry::new();
        // A speaker literally labeled "unk" lands on the reserved code.
        assert_eq!(reg.intern("unk"), UNKNOWN_SPEAKER);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn table_parses_two_column_lines() {
        let table = SpeakerTable::parse("utt-1 spk-a\nutt-2 spk-b\nutt-3 spk-a\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.speaker_of("utt-1"), Some(1));
        assert_eq!(table.speaker_of("utt-2"), Some(2));
        assert_eq!(table.speaker_of("utt-3"), Some(1));
        assert_eq!(table.speaker_of("utt-4"), None);
        assert_eq!(table.registry().label(2), Some("spk-b"));
    }

    #[test]
    fn table_rejects_wrong_token_count() {
        let err = SpeakerTable::parse("utt-1 spk-a extra\n").unwrap_err();
        match err {
            BatchError::MalformedUtt2spk { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }

        assert!(SpeakerTable::parse("utt-1\n").is_err());
        // Blank lines carry zero tokens and are just as fatal.
        assert!(SpeakerTable::parse("utt-1 spk-a\n\nutt-2 spk-b\n").is_err());
    }

    #[test]
    fn table_load_reads_file() {
        let path = std::env::temp_dir().join("adaptkit-batch-test-utt2spk");
        std::fs::write(&path, "utt-1 spk-a\nutt-2 spk-a\n").unwrap();

        let table = SpeakerTable::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(table.speaker_of("utt-1"), table.speaker_of("utt-2"));
    }
}
