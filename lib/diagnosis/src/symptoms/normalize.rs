// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Symptom text normalization.
//!
//! Two pipelines feed the matcher:
//! - checklist tokens, one symptom per item: lower-case, trim, spaces to underscores;
//! - free text, one sentence of comma or semicolon separated symptoms, which is cleaned,
//!   split on commas, and then each piece goes through the checklist normalizer.

use serde::{Deserialize, Deserializer};

/// A symptom exactly as the caller sent it.
///
/// JSON list items that are not strings are kept so they can be reported back as
/// unmatched; they normalize to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSymptom {
    Text(String),
    Other(String),
}

impl RawSymptom {
    /// The caller's original token, used in the unmatched list.
    pub fn original(&self) -> &str {
        match self {
            RawSymptom::Text(s) | RawSymptom::Other(s) => s,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawSymptom::Text(s) => Some(s),
            RawSymptom::Other(_) => None,
        }
    }

    /// Checklist normalization of this token; non-text tokens yield `""`.
    pub fn normalized(&self) -> String {
        self.as_text().map(normalize).unwrap_or_default()
    }
}

impl From<&str> for RawSymptom {
    fn from(value: &str) -> Self {
        RawSymptom::Text(value.to_string())
    }
}

impl From<String> for RawSymptom {
    fn from(value: String) -> Self {
        RawSymptom::Text(value)
    }
}

impl From<serde_json::Value> for RawSymptom {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => RawSymptom::Text(s),
            other => RawSymptom::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for RawSymptom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(RawSymptom::from)
    }
}

/// Normalize a checklist token into the vocabulary's naming convention.
///
/// Order matters: lower-case, then trim, then replace internal spaces with `_`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase().trim().replace(' ', "_")
}

/// Clean a free-text symptom sentence.
///
/// Semicolons become commas and whitespace runs collapse to a single space before the
/// text is lower-cased and trimmed.
pub fn clean_free_text(text: &str) -> String {
    let text = text.replace(';', ",");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    text.to_lowercase().trim().to_string()
}

/// Split a free-text sentence into raw tokens, dropping blank pieces.
pub fn split_free_text(text: &str) -> Vec<RawSymptom> {
    clean_free_text(text)
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(RawSymptom::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Skin Rash", "skin_rash")]
    #[case("  itching  ", "itching")]
    #[case("HIGH FEVER", "high_fever")]
    #[case("joint  pain", "joint__pain")]
    #[case("already_normal", "already_normal")]
    #[case("", "")]
    #[case("   ", "")]
    fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[test]
    fn test_normalize_keeps_punctuation() {
        // only spaces are rewritten on the checklist path
        assert_eq!(normalize("Pain (Chest)"), "pain_(chest)");
        assert_eq!(normalize("a;b"), "a;b");
    }

    #[test]
    fn test_clean_free_text() {
        assert_eq!(
            clean_free_text("  Fever;   Headache ,\tNAUSEA  "),
            "fever, headache , nausea"
        );
    }

    #[test]
    fn test_split_free_text() {
        let tokens = split_free_text("Fever; Joint   Pain,, ,cough");
        let originals: Vec<&str> = tokens.iter().map(RawSymptom::original).collect();
        assert_eq!(originals, vec!["fever", "joint pain", "cough"]);
        assert_eq!(tokens[1].normalized(), "joint_pain");
    }

    #[test]
    fn test_split_free_text_blank() {
        assert!(split_free_text(" ;, ").is_empty());
    }

    #[test]
    fn test_raw_symptom_from_json() {
        let tokens: Vec<RawSymptom> =
            serde_json::from_str(r#"["Itching", 42, null, {"a": 1}]"#).unwrap();
        assert_eq!(tokens[0], RawSymptom::Text("Itching".to_string()));
        assert_eq!(tokens[1], RawSymptom::Other("42".to_string()));
        assert_eq!(tokens[2].original(), "null");
        assert_eq!(tokens[3].normalized(), "");
        assert_eq!(tokens[0].normalized(), "itching");
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(s in "[a-zA-Z0-9 _;,()\\t-]{0,48}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalized_has_no_spaces(s in "[a-zA-Z ]{0,48}") {
            prop_assert!(!normalize(&s).contains(' '));
        }

        #[test]
        fn prop_free_text_pieces_are_clean(s in "[a-zA-Z ;,\\t]{0,64}") {
            for token in split_free_text(&s) {
                let text = token.original();
                prop_assert!(!text.is_empty());
                prop_assert!(!text.contains(';'));
                prop_assert!(!text.contains("  "));
                prop_assert_eq!(text.trim(), text);
            }
        }
    }
}
