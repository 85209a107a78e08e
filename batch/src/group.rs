use std::collections::HashMap;

/// Insertion-ordered grouping of values under speaker codes.
///
/// Appending to a code not seen before creates its (empty) group, so the
/// iteration order is the order in which codes first appeared. This is the
/// explicit replacement for default-on-access dictionary accumulation: no
/// hidden state, every group creation goes through [`Grouping::push`].
#[derive(Debug, Clone)]
pub struct Grouping<T> {
    index: HashMap<u32, usize>,
    keys: Vec<u32>,
    values: Vec<Vec<T>>,
}

impl<T> Grouping<T> {
    /// Creates an empty grouping.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Appends `value` to the group for `key`, creating the group on first
    /// sight.
    pub fn push(&mut self, key: u32, value: T) {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.values.len();
                self.index.insert(key, idx);
                self.keys.push(key);
                self.values.push(Vec::new());
                idx
            }
        };
        self.values[idx].push(value);
    }

    /// Returns the group for `key`, if one was created.
    pub fn get(&self, key: u32) -> Option<&[T]> {
        self.index.get(&key).map(|&idx| self.values[idx].as_slice())
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no group exists.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates groups in key first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[T])> {
        self.keys
            .iter()
            .zip(self.values.iter())
            .map(|(&key, values)| (key, values.as_slice()))
    }
}

impl<T> Default for Grouping<T> {
    fn default() -> Self {
        Self::new()
    }
}
