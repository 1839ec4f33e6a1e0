//! Error types for binding, exporting, and reporting.
//!
//! Two aggregation policies coexist by design:
//!
//! - **Fail-complete**: missing required keys are collected across the whole
//!   tree and raised once as [`Error::MissingRequired`], so callers see
//!   every missing variable in one message.
//! - **Fail-fast**: a value that is present but malformed aborts the load
//!   immediately ([`Error::Conversion`], [`Error::MalformedMapEntry`],
//!   [`Error::Unmarshal`]). These are never merged with the missing-required
//!   set.
//!
//! Fields bound before a fail-fast error keep their new values; no rollback
//! is attempted.
//!
//! | Code | Variant |
//! |------|---------|
//! | `envbind::missing_required` | [`Error::MissingRequired`] |
//! | `envbind::conversion` | [`Error::Conversion`] |
//! | `envbind::map_entry` | [`Error::MalformedMapEntry`] |
//! | `envbind::unmarshal` | [`Error::Unmarshal`] |
//! | `envbind::report` | [`Error::Report`] |

use std::error::Error as StdError;

use miette::Diagnostic;
use thiserror::Error;

use crate::provider::ProviderError;
use crate::value::ValueError;

/// Errors raised by [`load`](crate::load), [`load_from`](crate::load_from),
/// and [`write_report`](crate::write_report).
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// One or more required keys had no present, non-empty value.
    ///
    /// Keys appear in first-encounter (declaration) order, deduplicated.
    #[error("missing required environment variables: {}", .keys.join(", "))]
    #[diagnostic(
        code(envbind::missing_required),
        help("set every listed variable to a non-empty value")
    )]
    MissingRequired {
        /// Every violated key, in the order the walk first encountered it.
        keys: Vec<String>,
    },

    /// A present value could not be converted to the field's kind.
    #[error("failed to convert {key}: expected {kind}, got {value:?}")]
    #[diagnostic(code(envbind::conversion))]
    Conversion {
        /// The external key whose value failed to convert.
        key: String,

        /// The target kind's label.
        kind: String,

        /// The raw value that failed to convert.
        value: String,

        /// The registry-level failure.
        #[source]
        source: ValueError,
    },

    /// A mapping entry with no `:` separator.
    #[error("{entry_kind} key '{token}' is missing a value")]
    #[diagnostic(code(envbind::map_entry))]
    MalformedMapEntry {
        /// The `map[k]v` form of the mapping's kind.
        entry_kind: String,

        /// The entry token that lacked a value.
        token: String,
    },

    /// A field's own [`Unmarshaller`](crate::Unmarshaller) impl rejected the
    /// raw value.
    #[error("failed to unmarshal {key}")]
    #[diagnostic(code(envbind::unmarshal))]
    Unmarshal {
        /// The external key whose value was rejected.
        key: String,

        /// The error returned by the unmarshaller.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The snapshot provider failed to produce the key/value snapshot.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Provider(#[from] ProviderError),

    /// The report sink rejected a write.
    #[error("failed to write report")]
    #[diagnostic(code(envbind::report))]
    Report {
        /// The underlying sink error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wraps a registry-level failure with key context.
    ///
    /// The malformed-map-entry template is load-bearing for callers, so that
    /// variant passes through verbatim instead of gaining a key prefix.
    pub(crate) fn from_value_error(
        key: &str,
        raw: &str,
        kind: String,
        source: ValueError,
    ) -> Self {
        match source {
            ValueError::MapEntryMissingValue { entry_kind, token } => {
                Self::MalformedMapEntry { entry_kind, token }
            }
            source => Self::Conversion {
                key: key.to_string(),
                kind,
                value: raw.to_string(),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnvValue;

    #[test]
    fn missing_required_joins_keys_in_order() {
        let err = Error::MissingRequired {
            keys: vec!["REQUIRED_THING_A".to_string(), "REQUIRED_THING_B".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required environment variables: REQUIRED_THING_A, REQUIRED_THING_B"
        );
    }

    #[test]
    fn conversion_identifies_key_and_value() {
        let source = i64::from_env("Hello!").unwrap_err();
        let err = Error::from_value_error("INT_THING", "Hello!", i64::type_label(), source);
        let display = err.to_string();
        assert!(display.contains("INT_THING"));
        assert!(display.contains("i64"));
        assert!(display.contains("Hello!"));
    }

    #[test]
    fn map_entry_error_passes_through_verbatim() {
        let source = std::collections::HashMap::<String, String>::from_env("key").unwrap_err();
        let err = Error::from_value_error(
            "MAP_STRING_STRING_THING",
            "key",
            String::type_label(),
            source,
        );
        assert_eq!(
            err.to_string(),
            "map[string]string key 'key' is missing a value"
        );
    }
}
