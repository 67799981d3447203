// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Resolve caller symptoms against a [`Vocabulary`].
//!
//! Resolution order for one normalized token:
//! 1. exact match on the vocabulary identifier;
//! 2. the first entry, in vocabulary order, where the token contains the lower-cased entry
//!    or the lower-cased entry contains the token;
//! 3. otherwise the token is unmatched.
//!
//! Step 2 is first-match-wins, not best-match: `"pain"` resolves to whichever `*pain*`
//! column comes first. Changing that would change predictions for existing callers.
//! An empty token is contained in every entry, so blank and non-text input resolves to
//! the first column.

use serde::Serialize;

use super::{FeatureVector, FeatureVectorBuilder, RawSymptom, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Substring,
}

/// A token resolved to a vocabulary column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomMatch<'v> {
    pub column: usize,
    pub entry: &'v str,
    pub kind: MatchKind,
}

/// Resolve one normalized token.
pub fn match_token<'v>(token: &str, vocabulary: &'v Vocabulary) -> Option<SymptomMatch<'v>> {
    if let Some(column) = vocabulary.position(token) {
        return Some(SymptomMatch {
            column,
            entry: vocabulary.entries()[column].as_str(),
            kind: MatchKind::Exact,
        });
    }

    vocabulary
        .scan()
        .find(|(_, _, folded)| token.contains(folded) || folded.contains(token))
        .map(|(column, entry, _)| SymptomMatch {
            column,
            entry,
            kind: MatchKind::Substring,
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedSymptom {
    /// The caller's token as received.
    pub token: String,
    pub normalized: String,
    /// The vocabulary entry the token resolved to.
    pub entry: String,
    pub column: usize,
    pub kind: MatchKind,
}

/// Partition of the input tokens plus the resulting feature vector.
///
/// Every input token lands in exactly one of `matched` or `unmatched`, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: Vec<MatchedSymptom>,
    pub unmatched: Vec<String>,
    pub features: FeatureVector,
}

impl MatchResult {
    /// Vocabulary entries of the matched tokens, one per matched token.
    pub fn matched_entries(&self) -> Vec<String> {
        self.matched.iter().map(|m| m.entry.clone()).collect()
    }

    pub fn total_tokens(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }
}

/// Normalize, resolve and encode a list of caller tokens.
pub fn match_symptoms(symptoms: &[RawSymptom], vocabulary: &Vocabulary) -> MatchResult {
    let mut builder = FeatureVectorBuilder::new(vocabulary);
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for symptom in symptoms {
        let normalized = symptom.normalized();
        match match_token(&normalized, vocabulary) {
            Some(hit) => {
                builder.mark(hit.column);
                matched.push(MatchedSymptom {
                    token: symptom.original().to_string(),
                    normalized,
                    entry: hit.entry.to_string(),
                    column: hit.column,
                    kind: hit.kind,
                });
            }
            None => unmatched.push(symptom.original().to_string()),
        }
    }

    MatchResult {
        matched,
        unmatched,
        features: builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vocab() -> Vocabulary {
        Vocabulary::new([
            "itching",
            "skin_rash",
            "chest_pain",
            "joint_pain",
            "stomach_pain",
            "high_fever",
        ])
        .unwrap()
    }

    fn raw(tokens: &[&str]) -> Vec<RawSymptom> {
        tokens.iter().map(|t| RawSymptom::from(*t)).collect()
    }

    #[test]
    fn test_exact_matches_set_their_columns() {
        let vocab = vocab();
        let result = match_symptoms(&raw(&["skin_rash", "itching"]), &vocab);

        assert_eq!(result.matched_entries(), vec!["skin_rash", "itching"]);
        assert!(result.unmatched.is_empty());
        assert_eq!(result.features.count_active(), 2);
        assert!(result.features.is_set(vocab.position("skin_rash").unwrap()));
        assert!(result.features.is_set(vocab.position("itching").unwrap()));
        assert!(result.matched.iter().all(|m| m.kind == MatchKind::Exact));
    }

    #[test]
    fn test_normalization_before_exact_match() {
        let vocab = vocab();
        let hit = match_token(&RawSymptom::from("  Skin Rash ").normalized(), &vocab).unwrap();
        assert_eq!(hit.entry, "skin_rash");
        assert_eq!(hit.kind, MatchKind::Exact);
    }

    #[test]
    fn test_no_containment_is_unmatched() {
        let vocab = vocab();
        let result = match_symptoms(&raw(&["itchiness"]), &vocab);

        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched, vec!["itchiness"]);
        assert_eq!(result.features.count_active(), 0);
    }

    #[test]
    fn test_substring_first_match_wins() {
        let vocab = vocab();
        // "pain" is contained in chest_pain, joint_pain and stomach_pain
        let hit = match_token("pain", &vocab).unwrap();
        assert_eq!(hit.entry, "chest_pain");
        assert_eq!(hit.kind, MatchKind::Substring);
    }

    #[test]
    fn test_token_containing_entry() {
        let vocab = vocab();
        let hit = match_token("severe_itching_at_night", &vocab).unwrap();
        assert_eq!(hit.entry, "itching");
        assert_eq!(hit.kind, MatchKind::Substring);
    }

    #[test]
    fn test_substring_uses_folded_entries() {
        let vocab = Vocabulary::new(["Chest_Pain"]).unwrap();
        assert_eq!(match_token("chest", &vocab).unwrap().entry, "Chest_Pain");
        // exact match is on the identifier as written
        assert_eq!(match_token("chest_pain", &vocab).unwrap().kind, MatchKind::Substring);
    }

    #[test]
    fn test_empty_and_non_text_tokens_hit_first_column() {
        let vocab = vocab();
        let hit = match_token(&RawSymptom::from("   ").normalized(), &vocab).unwrap();
        assert_eq!(hit.entry, "itching");
        assert_eq!(hit.kind, MatchKind::Substring);

        let symptoms = vec![
            RawSymptom::from("   "),
            RawSymptom::from(serde_json::json!(7)),
        ];
        let result = match_symptoms(&symptoms, &vocab);
        assert!(result.unmatched.is_empty());
        assert_eq!(result.matched_entries(), vec!["itching", "itching"]);
        assert_eq!(result.matched[1].token, "7");
        assert_eq!(result.matched[1].normalized, "");
        assert_eq!(result.features.count_active(), 1);
        assert!(result.features.is_set(0));
    }

    #[test]
    fn test_unmatched_reports_original_token() {
        let vocab = vocab();
        let result = match_symptoms(&raw(&["Blurred Vision", "High Fever"]), &vocab);
        assert_eq!(result.unmatched, vec!["Blurred Vision"]);
        assert_eq!(result.matched[0].token, "High Fever");
        assert_eq!(result.matched[0].normalized, "high_fever");
        assert_eq!(result.matched[0].entry, "high_fever");
    }

    #[test]
    fn test_repeated_entry_sets_one_slot() {
        let vocab = vocab();
        let result = match_symptoms(&raw(&["itching", "Itching"]), &vocab);
        assert_eq!(result.matched.len(), 2);
        assert_eq!(result.features.count_active(), 1);
    }

    proptest! {
        #[test]
        fn prop_every_entry_matches_itself(column in 0usize..6) {
            let vocab = vocab();
            let entry = vocab.get(column).unwrap();
            let hit = match_token(entry, &vocab).unwrap();
            prop_assert_eq!(hit.entry, entry);
            prop_assert_eq!(hit.kind, MatchKind::Exact);
        }

        #[test]
        fn prop_partition_preserves_tokens(tokens in proptest::collection::vec("[a-z _]{0,12}", 0..10)) {
            let vocab = vocab();
            let symptoms: Vec<RawSymptom> = tokens.iter().map(|t| RawSymptom::from(t.as_str())).collect();
            let result = match_symptoms(&symptoms, &vocab);

            prop_assert_eq!(result.total_tokens(), tokens.len());

            // rebuild the input order from both halves
            let mut unmatched = result.unmatched.iter();
            let mut matched = result.matched.iter();
            for (i, token) in tokens.iter().enumerate() {
                let normalized = RawSymptom::from(token.as_str()).normalized();
                if match_token(&normalized, &vocab).is_some() {
                    let m = matched.next().unwrap();
                    prop_assert_eq!(&m.token, token, "token {} out of order", i);
                } else {
                    prop_assert_eq!(unmatched.next().unwrap(), token);
                }
            }
            prop_assert!(matched.next().is_none());
            prop_assert!(unmatched.next().is_none());
        }

        #[test]
        fn prop_vector_width_is_fixed(tokens in proptest::collection::vec("[a-z_]{1,10}", 0..8)) {
            let vocab = vocab();
            let symptoms: Vec<RawSymptom> = tokens.iter().map(|t| RawSymptom::from(t.as_str())).collect();
            let result = match_symptoms(&symptoms, &vocab);
            prop_assert_eq!(result.features.len(), vocab.len());
            prop_assert!(result.features.count_active() <= result.matched.len());
        }
    }
}
