//! The type conversion registry: string ⇄ typed value for every supported
//! leaf kind.
//!
//! [`EnvValue`] is the contract every registry kind satisfies:
//!
//! - [`from_env`](EnvValue::from_env) converts the raw external string into
//!   the typed value,
//! - [`to_env`](EnvValue::to_env) produces the canonical external string for
//!   the reverse (struct → `KEY=value`) serialization,
//! - [`type_label`](EnvValue::type_label) names the kind in report rows.
//!
//! For every kind, `to_env(from_env(s)) == s` holds when `s` is already in
//! canonical form (`"true"` round-trips, the equivalent `"1"` does not).
//!
//! # Supported Kinds
//!
//! | Kind | Accepted Input | Canonical Output |
//! |------|----------------|------------------|
//! | `String` | anything | unchanged |
//! | `bool` | `true`/`false`/`1`/`0`, case-insensitive | `true`/`false` |
//! | integers (`i8`–`i64`, `isize`, `u8`–`u64`, `usize`) | base-10, range-checked | base-10 |
//! | `f32`/`f64` | decimal or exponential | shortest repr |
//! | `Complex32`/`Complex64` | `(re+imi)`, parentheses optional | `(re+imi)` |
//! | `Duration` | `2s`, `150ms`, `1h30m`, fractional values | compact (`1m30s`) |
//! | `Url` | any parseable URL | normalized `as_str` |
//! | `Vec<T>` | `,`-separated, elements trimmed | `,`-joined |
//! | `HashMap<K, V>` | `,`-separated `k:v` entries, first `:` splits | `k:v` joined with `,` |
//! | `Option<T>` | same as `T` | inner value, or empty |
//! | `SecretString` | anything (feature `secrecy`) | exposed secret |

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::time::Duration;

use num_complex::{Complex32, Complex64};
use thiserror::Error;
use url::Url;

/// A conversion failure at the registry level.
///
/// Carries no key context; the tree walker wraps it into
/// [`Error::Conversion`](crate::Error::Conversion) together with the
/// offending key and raw value. The one exception is
/// [`MapEntryMissingValue`](ValueError::MapEntryMissingValue), whose message
/// template is surfaced verbatim as
/// [`Error::MalformedMapEntry`](crate::Error::MalformedMapEntry).
#[derive(Debug, Error)]
pub enum ValueError {
    /// The raw string is not one of `true`/`false`/`1`/`0`.
    #[error("invalid boolean literal {0:?}, expected true/false/1/0")]
    InvalidBool(String),

    /// Integer parse failure (non-numeric or out of range for the width).
    #[error(transparent)]
    InvalidInt(#[from] std::num::ParseIntError),

    /// Floating-point parse failure.
    #[error(transparent)]
    InvalidFloat(#[from] std::num::ParseFloatError),

    /// The raw string is not a complex literal of the form `(re+imi)`.
    #[error("invalid complex literal {0:?}, expected the form (re+imi)")]
    InvalidComplex(String),

    /// Malformed duration literal or unknown unit.
    #[error("invalid duration literal {0:?}")]
    InvalidDuration(String),

    /// URL parse failure.
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    /// A mapping entry with no `:` separator.
    #[error("{entry_kind} key '{token}' is missing a value")]
    MapEntryMissingValue {
        /// The `map[k]v` form of the mapping's kind, lowercased labels.
        entry_kind: String,

        /// The entry token that lacked a value.
        token: String,
    },
}

/// A leaf type the registry can convert in both directions.
///
/// Implemented for every kind in the module table. Field types that need
/// custom conversion logic implement
/// [`Unmarshaller`](crate::Unmarshaller) instead, which takes precedence
/// during binding.
pub trait EnvValue: Sized {
    /// Converts the raw external string into the typed value.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] describing why the string does not parse as
    /// this kind.
    fn from_env(raw: &str) -> Result<Self, ValueError>;

    /// Produces the canonical external string for this value.
    fn to_env(&self) -> String;

    /// The kind name shown in the report's `TYPE:` column.
    fn type_label() -> String;
}

impl EnvValue for String {
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }

    fn to_env(&self) -> String {
        self.clone()
    }

    fn type_label() -> String {
        "String".to_string()
    }
}

impl EnvValue for bool {
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ValueError::InvalidBool(raw.to_string())),
        }
    }

    fn to_env(&self) -> String {
        self.to_string()
    }

    fn type_label() -> String {
        "bool".to_string()
    }
}

macro_rules! impl_env_value_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn from_env(raw: &str) -> Result<Self, ValueError> {
                    raw.parse().map_err(ValueError::from)
                }

                fn to_env(&self) -> String {
                    self.to_string()
                }

                fn type_label() -> String {
                    stringify!($ty).to_string()
                }
            }
        )+
    };
}

impl_env_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_env_value_float {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn from_env(raw: &str) -> Result<Self, ValueError> {
                    raw.parse().map_err(ValueError::from)
                }

                fn to_env(&self) -> String {
                    self.to_string()
                }

                fn type_label() -> String {
                    stringify!($ty).to_string()
                }
            }
        )+
    };
}

impl_env_value_float!(f32, f64);

macro_rules! impl_env_value_complex {
    ($($ty:ty => $label:literal),+ $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn from_env(raw: &str) -> Result<Self, ValueError> {
                    // Accept both `(3+4i)` and `3+4i`; the parenthesized
                    // form is canonical.
                    let inner = raw
                        .strip_prefix('(')
                        .and_then(|s| s.strip_suffix(')'))
                        .unwrap_or(raw);
                    inner
                        .parse()
                        .map_err(|_| ValueError::InvalidComplex(raw.to_string()))
                }

                fn to_env(&self) -> String {
                    format!("({})", self)
                }

                fn type_label() -> String {
                    $label.to_string()
                }
            }
        )+
    };
}

impl_env_value_complex!(Complex32 => "Complex32", Complex64 => "Complex64");

impl EnvValue for Duration {
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        parse_duration_literal(raw)
    }

    fn to_env(&self) -> String {
        format_duration_literal(*self)
    }

    fn type_label() -> String {
        "Duration".to_string()
    }
}

impl EnvValue for Url {
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        Url::parse(raw).map_err(ValueError::from)
    }

    fn to_env(&self) -> String {
        self.as_str().to_string()
    }

    fn type_label() -> String {
        "Url".to_string()
    }
}

impl<T: EnvValue> EnvValue for Vec<T> {
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        // The empty string is an empty sequence, not one empty element.
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        raw.split(',').map(|elem| T::from_env(elem.trim())).collect()
    }

    fn to_env(&self) -> String {
        self.iter()
            .map(EnvValue::to_env)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn type_label() -> String {
        format!("Vec<{}>", T::type_label())
    }
}

impl<K, V, S> EnvValue for HashMap<K, V, S>
where
    K: EnvValue + Eq + Hash,
    V: EnvValue,
    S: BuildHasher + Default,
{
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        let mut map = Self::default();

        if raw.is_empty() {
            return Ok(map);
        }

        for entry in raw.split(',') {
            // Split on the first `:` only; the value keeps embedded colons.
            let Some((key, value)) = entry.split_once(':') else {
                return Err(ValueError::MapEntryMissingValue {
                    entry_kind: format!(
                        "map[{}]{}",
                        K::type_label().to_lowercase(),
                        V::type_label().to_lowercase()
                    ),
                    token: entry.to_string(),
                });
            };

            map.insert(K::from_env(key)?, V::from_env(value)?);
        }

        Ok(map)
    }

    fn to_env(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}:{}", key.to_env(), value.to_env()))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn type_label() -> String {
        format!("HashMap<{}, {}>", K::type_label(), V::type_label())
    }
}

/// Pointer-to-scalar semantics: conversion allocates `Some`; an absent or
/// empty external value never reaches conversion (the loader skips it), so
/// a caller-supplied value survives the load.
impl<T: EnvValue> EnvValue for Option<T> {
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        T::from_env(raw).map(Some)
    }

    fn to_env(&self) -> String {
        self.as_ref().map(EnvValue::to_env).unwrap_or_default()
    }

    fn type_label() -> String {
        format!("Option<{}>", T::type_label())
    }
}

#[cfg(feature = "secrecy")]
impl EnvValue for secrecy::SecretString {
    fn from_env(raw: &str) -> Result<Self, ValueError> {
        Ok(Self::from(raw.to_string()))
    }

    fn to_env(&self) -> String {
        use secrecy::ExposeSecret;

        self.expose_secret().to_string()
    }

    fn type_label() -> String {
        "SecretString".to_string()
    }
}

// ============================================================================
// Duration Literals
// ============================================================================

/// Parses a duration literal: an optional `+` sign followed by one or more
/// `<decimal><unit>` groups, units `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`.
///
/// Negative literals are rejected: the target type cannot represent them.
fn parse_duration_literal(raw: &str) -> Result<Duration, ValueError> {
    let malformed = || ValueError::InvalidDuration(raw.to_string());

    let mut rest = raw.strip_prefix('+').unwrap_or(raw);

    if rest.starts_with('-') {
        return Err(malformed());
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    if rest.is_empty() {
        return Err(malformed());
    }

    let mut total = Duration::ZERO;

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);

        if number.is_empty() {
            return Err(malformed());
        }

        let value: f64 = number.parse().map_err(|_| malformed())?;

        let (unit_len, unit_nanos) = if tail.starts_with("ns") {
            (2, 1.0)
        } else if tail.starts_with("us") {
            (2, 1e3)
        } else if tail.starts_with("µs") {
            ("µs".len(), 1e3)
        } else if tail.starts_with("ms") {
            (2, 1e6)
        } else if tail.starts_with('s') {
            (1, 1e9)
        } else if tail.starts_with('m') {
            (1, 60.0 * 1e9)
        } else if tail.starts_with('h') {
            (1, 3600.0 * 1e9)
        } else {
            return Err(malformed());
        };

        total += Duration::from_nanos((value * unit_nanos).round() as u64);
        rest = &tail[unit_len..];
    }

    Ok(total)
}

/// Formats a duration in the compact literal form: the largest sub-second
/// unit with the fraction trimmed (`150ms`, `1.5µs`), or an `h`/`m`/`s`
/// decomposition at one second and above (`2s`, `1m30s`, `1h0m0s`).
fn format_duration_literal(d: Duration) -> String {
    let total = d.as_nanos();

    if total == 0 {
        return "0s".to_string();
    }

    if total < 1_000 {
        return format!("{total}ns");
    }

    if total < 1_000_000 {
        return format!("{}µs", fraction(total, 1_000));
    }

    if total < 1_000_000_000 {
        return format!("{}ms", fraction(total, 1_000_000));
    }

    let secs = total / 1_000_000_000;
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let sub_minute = total % 60_000_000_000;

    let mut out = String::new();

    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }

    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }

    out.push_str(&fraction(sub_minute, 1_000_000_000));
    out.push('s');

    out
}

/// Renders `value_nanos / unit_nanos` with trailing fraction zeros trimmed.
fn fraction(value_nanos: u128, unit_nanos: u128) -> String {
    let whole = value_nanos / unit_nanos;
    let frac = value_nanos % unit_nanos;

    if frac == 0 {
        return whole.to_string();
    }

    let width = unit_nanos.ilog10() as usize;
    let digits = format!("{frac:0width$}");

    format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_all_four_literals() {
        assert!(bool::from_env("true").unwrap());
        assert!(bool::from_env("TRUE").unwrap());
        assert!(bool::from_env("1").unwrap());
        assert!(!bool::from_env("false").unwrap());
        assert!(!bool::from_env("0").unwrap());
        assert!(bool::from_env("yes").is_err());
    }

    #[test]
    fn bool_serializes_canonically() {
        assert_eq!(true.to_env(), "true");
        assert_eq!(false.to_env(), "false");
    }

    #[test]
    fn integer_range_is_checked_per_width() {
        assert_eq!(i8::from_env("20").unwrap(), 20);
        assert!(i8::from_env("200").is_err());
        assert!(u16::from_env("-1").is_err());
        assert!(u64::from_env("Hello!").is_err());
        assert_eq!(u64::from_env("200000000").unwrap(), 200_000_000);
    }

    #[test]
    fn float_accepts_exponential_notation() {
        assert_eq!(f64::from_env("3.14159").unwrap(), 3.14159);
        assert_eq!(f64::from_env("1e3").unwrap(), 1000.0);
        assert!(f32::from_env("pi").is_err());
    }

    #[test]
    fn complex_parses_parenthesized_literal() {
        let c = Complex64::from_env("(3+14159i)").unwrap();
        assert_eq!(c, Complex64::new(3.0, 14159.0));
        assert_eq!(c.to_env(), "(3+14159i)");
    }

    #[test]
    fn complex_accepts_bare_literal() {
        let c = Complex64::from_env("1-2i").unwrap();
        assert_eq!(c, Complex64::new(1.0, -2.0));
        assert!(Complex64::from_env("(nope)").is_err());
    }

    #[test]
    fn duration_parses_simple_literals() {
        assert_eq!(Duration::from_env("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(
            Duration::from_env("150ms").unwrap(),
            Duration::from_millis(150)
        );
        assert_eq!(
            Duration::from_env("1h30m").unwrap(),
            Duration::from_secs(5400)
        );
        assert_eq!(
            Duration::from_env("1.5s").unwrap(),
            Duration::from_millis(1500)
        );
        assert_eq!(Duration::from_env("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn duration_rejects_malformed_literals() {
        assert!(Duration::from_env("").is_err());
        assert!(Duration::from_env("2").is_err());
        assert!(Duration::from_env("2 s").is_err());
        assert!(Duration::from_env("2lightyears").is_err());
        assert!(Duration::from_env("-5s").is_err());
        assert!(Duration::from_env("s").is_err());
    }

    #[test]
    fn duration_formats_compactly() {
        assert_eq!(Duration::from_secs(2).to_env(), "2s");
        assert_eq!(Duration::from_millis(150).to_env(), "150ms");
        assert_eq!(Duration::from_secs(90).to_env(), "1m30s");
        assert_eq!(Duration::from_secs(3600).to_env(), "1h0m0s");
        assert_eq!(Duration::from_nanos(1500).to_env(), "1.5µs");
        assert_eq!(Duration::ZERO.to_env(), "0s");
    }

    #[test]
    fn url_parses_structurally() {
        let url = Url::from_env("http://github.com/some/path").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("github.com"));
        assert_eq!(url.path(), "/some/path");
        assert_eq!(url.to_env(), "http://github.com/some/path");
        assert!(Url::from_env("not a url").is_err());
    }

    #[test]
    fn vec_trims_each_element() {
        let v = Vec::<String>::from_env("one , two , three").unwrap();
        assert_eq!(v, vec!["one", "two", "three"]);
    }

    #[test]
    fn vec_of_ints_converts_per_element() {
        let v = Vec::<i64>::from_env("1,2,3").unwrap();
        assert_eq!(v, vec![1, 2, 3]);
        assert!(Vec::<i64>::from_env("1,x,3").is_err());
    }

    #[test]
    fn empty_string_is_an_empty_sequence() {
        assert_eq!(Vec::<String>::from_env("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn vec_serializes_joined_with_commas() {
        let v = vec!["thing-1".to_string(), "thing-2".to_string()];
        assert_eq!(v.to_env(), "thing-1,thing-2");
    }

    #[test]
    fn map_splits_entries_on_first_colon_only() {
        let m =
            HashMap::<String, String>::from_env("key_one:value_one,key_two:value_two:with_colon")
                .unwrap();
        assert_eq!(m["key_one"], "value_one");
        assert_eq!(m["key_two"], "value_two:with_colon");
    }

    #[test]
    fn map_entry_without_value_is_fatal() {
        let err = HashMap::<String, String>::from_env("key").unwrap_err();
        assert_eq!(
            err.to_string(),
            "map[string]string key 'key' is missing a value"
        );
    }

    #[test]
    fn map_serializes_colon_joined_entries() {
        let mut m = HashMap::new();
        m.insert("key_one".to_string(), "value_one".to_string());
        assert_eq!(m.to_env(), "key_one:value_one");
    }

    #[test]
    fn option_wraps_converted_value() {
        assert_eq!(Option::<u16>::from_env("80").unwrap(), Some(80));
        assert_eq!(Some(80u16).to_env(), "80");
        assert_eq!(Option::<u16>::None.to_env(), "");
    }

    #[test]
    fn type_labels_compose() {
        assert_eq!(Vec::<String>::type_label(), "Vec<String>");
        assert_eq!(
            HashMap::<String, u16>::type_label(),
            "HashMap<String, u16>"
        );
        assert_eq!(Option::<bool>::type_label(), "Option<bool>");
    }

    #[cfg(feature = "secrecy")]
    #[test]
    fn secret_string_round_trips_through_expose() {
        use secrecy::SecretString;

        let secret = SecretString::from_env("hunter2").unwrap();
        assert_eq!(secret.to_env(), "hunter2");
        assert_eq!(SecretString::type_label(), "SecretString");
    }
}
