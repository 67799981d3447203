// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! The ordered set of known symptom identifiers.
//!
//! A [`Vocabulary`] fixes the width and column order of every feature vector produced for a
//! model. It is built once, before training, and never changes afterwards.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("vocabulary must contain at least one symptom")]
    Empty,

    #[error("duplicate symptom '{0}' in vocabulary")]
    Duplicate(String),

    #[error("blank symptom identifier at column {0}")]
    Blank(usize),
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<String>,
    /// Lower-cased entries, used by the substring fallback.
    folded: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new<I, S>(entries: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.trim().is_empty() {
                return Err(VocabularyError::Blank(position));
            }
            if index.insert(entry.clone(), position).is_some() {
                return Err(VocabularyError::Duplicate(entry.clone()));
            }
        }

        let folded = entries.iter().map(|e| e.to_lowercase()).collect();

        Ok(Self {
            entries,
            folded,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.entries.get(position).map(String::as_str)
    }

    /// Column of an entry, by exact identifier.
    pub fn position(&self, entry: &str) -> Option<usize> {
        self.index.get(entry).copied()
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.index.contains_key(entry)
    }

    /// The first `limit` entries, in column order.
    pub fn preview(&self, limit: usize) -> &[String] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// `(column, entry, lower-cased entry)` in column order.
    pub(crate) fn scan(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.entries
            .iter()
            .zip(self.folded.iter())
            .enumerate()
            .map(|(i, (entry, folded))| (i, entry.as_str(), folded.as_str()))
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Vocabulary {}
