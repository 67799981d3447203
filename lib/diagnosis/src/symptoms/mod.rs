// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Symptom normalization, vocabulary matching and feature encoding.

pub mod features;
pub mod matcher;
pub mod normalize;
pub mod vocabulary;

pub use features::{FeatureVector, FeatureVectorBuilder};
pub use matcher::{match_symptoms, match_token, MatchKind, MatchResult, MatchedSymptom, SymptomMatch};
pub use normalize::{clean_free_text, normalize, split_free_text, RawSymptom};
pub use vocabulary::{Vocabulary, VocabularyError};
