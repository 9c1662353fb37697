// SPDX-License-Identifier: MPL-2.0
//! User-facing strings.
//!
//! Widgets and notifications refer to text by Fluent message key. The
//! catalog is loaded once and shared by the whole process. Keys without a
//! message are shown verbatim so a missing string is visible rather than
//! blank.

use crate::i18n::fluent::I18n;
use std::sync::OnceLock;

static CATALOG: OnceLock<I18n> = OnceLock::new();

fn catalog() -> &'static I18n {
    CATALOG.get_or_init(I18n::default)
}

/// Returns the text for `key`.
#[must_use]
pub fn tr(key: &str) -> String {
    catalog().tr(key)
}

/// Returns the text for `key` with `{ $name }` variables filled in.
#[must_use]
pub fn tr_with_args<K, V>(key: &str, args: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    catalog().tr_with_args(key, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, SessionError};
    use std::time::Duration;

    #[test]
    fn unknown_key_is_returned_verbatim() {
        assert_eq!(tr("no-such-key"), "no-such-key");
    }

    #[test]
    fn placeholders_are_filled() {
        let text = tr_with_args("download", &[("format", "PNG")]);
        assert_eq!(text, "Download PNG");
    }

    #[test]
    fn missing_arguments_stay_visible() {
        let text = tr_with_args("error-slot-decode-failure", &[("slot", "style")]);
        assert!(text.contains("style"));
        assert!(text.contains("detail"));
    }

    #[test]
    fn every_error_key_has_text() {
        let keys = [
            SessionError::DecodeFailure(String::new()).i18n_key(),
            SessionError::InvalidRatio(String::new()).i18n_key(),
            SessionError::PreconditionNotMet { missing: vec![] }.i18n_key(),
            SessionError::AlreadyRunning.i18n_key(),
            SessionError::UnsupportedFormat(String::new()).i18n_key(),
            GenerationError::Timeout(Duration::from_secs(1)).i18n_key(),
            GenerationError::Cancelled.i18n_key(),
        ];
        for key in keys {
            assert!(catalog().has_message(key), "missing text for {key}");
        }
    }

    #[test]
    fn every_notification_key_has_text() {
        let keys = [
            "notification-image-read-error",
            "notification-download-success",
            "notification-download-error",
            "notification-theme-save-error",
            "notification-endpoint-error",
            "notification-endpoint-missing",
            "notification-config-load-error",
            "notification-state-parse-error",
            "notification-state-write-error",
        ];
        for key in keys {
            assert!(catalog().has_message(key), "missing text for {key}");
        }
    }
}
