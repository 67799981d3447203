// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Process-level settings read from the environment.
//!
//! Service configuration (HTTP, dataset, classifier) lives in
//! `medpredict_diagnosis::config`; this module only covers the switches the
//! runtime itself needs before any configuration file has been read.

/// Set to a truthy value to emit JSON lines instead of readable logs.
pub const LOGGING_JSONL_ENV: &str = "MEDPREDICT_LOGGING_JSONL";

/// Set to a truthy value to disable ANSI colors in readable logs.
pub const DISABLE_ANSI_LOGGING_ENV: &str = "MEDPREDICT_SDK_DISABLE_ANSI_LOGGING";

/// Set to a truthy value to stamp logs with the local timezone instead of UTC.
pub const USE_LOCAL_TZ_ENV: &str = "MEDPREDICT_LOG_USE_LOCAL_TZ";

/// Returns true for `1`, `true`, `on` and `yes` (case-insensitive).
pub fn is_truthy(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Check whether an environment variable is set to a truthy value.
pub fn env_is_truthy(env: &str) -> bool {
    match std::env::var(env) {
        Ok(val) => is_truthy(&val),
        Err(_) => false,
    }
}

pub fn jsonl_logging_enabled() -> bool {
    env_is_truthy(LOGGING_JSONL_ENV)
}

pub fn disable_ansi_logging() -> bool {
    env_is_truthy(DISABLE_ANSI_LOGGING_ENV)
}

pub fn use_local_timezone() -> bool {
    env_is_truthy(USE_LOCAL_TZ_ENV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for val in ["1", "true", "TRUE", " on ", "Yes"] {
            assert!(is_truthy(val), "{val} should be truthy");
        }
        for val in ["0", "false", "", "maybe"] {
            assert!(!is_truthy(val), "{val} should not be truthy");
        }
    }

    #[test]
    fn test_env_switches() {
        temp_env::with_vars(
            vec![
                (LOGGING_JSONL_ENV, Some("1")),
                (DISABLE_ANSI_LOGGING_ENV, Some("false")),
                (USE_LOCAL_TZ_ENV, None::<&str>),
            ],
            || {
                assert!(jsonl_logging_enabled());
                assert!(!disable_ansi_logging());
                assert!(!use_local_timezone());
            },
        );
    }
}
