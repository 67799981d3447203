// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Binary feature vectors aligned to a [`Vocabulary`].

use super::Vocabulary;

/// One 0/1 slot per vocabulary entry, in vocabulary order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureVector {
    values: Vec<u8>,
}

impl FeatureVector {
    pub fn zeros(width: usize) -> Self {
        Self {
            values: vec![0; width],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<u8> {
        self.values.get(column).copied()
    }

    pub fn is_set(&self, column: usize) -> bool {
        self.get(column) == Some(1)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    /// Columns holding a 1, ascending.
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1)
            .map(|(i, _)| i)
    }

    pub fn count_active(&self) -> usize {
        self.values.iter().filter(|v| **v == 1).count()
    }

    pub fn to_f64(&self) -> ndarray::Array1<f64> {
        self.values.iter().map(|v| f64::from(*v)).collect()
    }

    fn set(&mut self, column: usize) -> bool {
        let slot = &mut self.values[column];
        let fresh = *slot == 0;
        *slot = 1;
        fresh
    }
}

/// Builds a [`FeatureVector`] for one vocabulary.
///
/// Used both when encoding dataset rows and when encoding request symptoms, so the two
/// paths cannot disagree on width or column order.
#[derive(Debug)]
pub struct FeatureVectorBuilder<'v> {
    vocabulary: &'v Vocabulary,
    vector: FeatureVector,
}

impl<'v> FeatureVectorBuilder<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self {
            vocabulary,
            vector: FeatureVector::zeros(vocabulary.len()),
        }
    }

    /// Set the slot for `column`. Returns false when the slot was already set.
    ///
    /// # Panics
    /// If `column` is outside the vocabulary.
    pub fn mark(&mut self, column: usize) -> bool {
        assert!(
            column < self.vocabulary.len(),
            "column {column} outside vocabulary of {}",
            self.vocabulary.len()
        );
        self.vector.set(column)
    }

    /// Set the slot for an exact vocabulary entry; unknown entries are ignored.
    pub fn mark_entry(&mut self, entry: &str) -> bool {
        match self.vocabulary.position(entry) {
            Some(column) => self.vector.set(column),
            None => false,
        }
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new(["itching", "skin_rash", "cough", "fever"]).unwrap()
    }

    #[test]
    fn test_builder_sets_matching_columns() {
        let vocab = vocab();
        let mut builder = FeatureVectorBuilder::new(&vocab);
        assert!(builder.mark_entry("skin_rash"));
        assert!(builder.mark_entry("itching"));
        let vector = builder.build();

        assert_eq!(vector.len(), vocab.len());
        assert_eq!(vector.as_slice(), &[1, 1, 0, 0]);
        assert_eq!(vector.active().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(vector.count_active(), 2);
    }

    #[test]
    fn test_marking_twice_is_a_no_op() {
        let vocab = vocab();
        let mut builder = FeatureVectorBuilder::new(&vocab);
        assert!(builder.mark(2));
        assert!(!builder.mark(2));
        assert_eq!(builder.build().count_active(), 1);
    }

    #[test]
    fn test_unknown_entry_is_ignored() {
        let vocab = vocab();
        let mut builder = FeatureVectorBuilder::new(&vocab);
        assert!(!builder.mark_entry("headache"));
        assert_eq!(builder.build(), FeatureVector::zeros(4));
    }

    #[test]
    #[should_panic(expected = "outside vocabulary")]
    fn test_mark_out_of_range_panics() {
        let vocab = vocab();
        FeatureVectorBuilder::new(&vocab).mark(4);
    }

    #[test]
    fn test_to_f64() {
        let vocab = vocab();
        let mut builder = FeatureVectorBuilder::new(&vocab);
        builder.mark(3);
        assert_eq!(builder.build().to_f64().to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
    }
}
