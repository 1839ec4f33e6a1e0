//! Property-based tests for conversion-registry invariants.
//!
//! The central property: for every supported kind, converting a canonical
//! string and serializing the result gives the same string back — and the
//! parsers never panic, whatever the input.

use std::collections::HashMap;
use std::time::Duration;

use envbind::value::EnvValue;
use envbind::FieldDescriptor;
use num_complex::Complex64;
use proptest::prelude::*;

// ============================================================================
// Tag Parser Properties
// ============================================================================

mod tag_properties {
    use super::*;

    proptest! {
        /// Tag parsing never fails, whatever the annotation looks like.
        #[test]
        fn parse_never_panics(tag in ".*") {
            let _ = FieldDescriptor::parse(Some(&tag), "Owner", "field");
        }

        /// The parsed key never keeps surrounding whitespace.
        #[test]
        fn key_is_always_trimmed(key in "[A-Z_]{1,12}", pad in " {0,3}") {
            let tag = format!("{pad}{key}{pad}");
            let desc = FieldDescriptor::parse(Some(&tag), "Owner", "field");
            prop_assert_eq!(desc.key.as_deref(), Some(key.as_str()));
        }

        /// Unknown flags never disturb the recognized ones.
        #[test]
        fn unknown_flags_are_inert(noise in "[a-z]{1,8}") {
            let tag = format!("KEY,{noise},required");
            let desc = FieldDescriptor::parse(Some(&tag), "Owner", "field");
            prop_assert!(desc.required);
        }
    }
}

// ============================================================================
// Scalar Round-Trips
// ============================================================================

mod scalar_roundtrips {
    use super::*;

    proptest! {
        #[test]
        fn i64_roundtrips(n in any::<i64>()) {
            let s = n.to_env();
            prop_assert_eq!(i64::from_env(&s).unwrap(), n);
            prop_assert_eq!(i64::from_env(&s).unwrap().to_env(), s);
        }

        #[test]
        fn u64_roundtrips(n in any::<u64>()) {
            let s = n.to_env();
            prop_assert_eq!(u64::from_env(&s).unwrap(), n);
        }

        #[test]
        fn i8_roundtrips(n in any::<i8>()) {
            let s = n.to_env();
            prop_assert_eq!(i8::from_env(&s).unwrap(), n);
        }

        #[test]
        fn bool_roundtrips(b in any::<bool>()) {
            let s = b.to_env();
            prop_assert_eq!(bool::from_env(&s).unwrap(), b);
            prop_assert_eq!(bool::from_env(&s).unwrap().to_env(), s);
        }

        /// Rust's float formatting is shortest-exact, so the canonical form
        /// round-trips bit-for-bit.
        #[test]
        fn f64_roundtrips(f in prop::num::f64::NORMAL) {
            let s = f.to_env();
            prop_assert_eq!(f64::from_env(&s).unwrap(), f);
        }

        #[test]
        fn complex_roundtrips(re in prop::num::f64::NORMAL, im in prop::num::f64::NORMAL) {
            let c = Complex64::new(re, im);
            let s = c.to_env();
            prop_assert_eq!(Complex64::from_env(&s).unwrap(), c);
        }
    }
}

// ============================================================================
// Duration Round-Trips
// ============================================================================

mod duration_roundtrips {
    use super::*;

    proptest! {
        /// Bounded below 1000h so every component stays exactly
        /// representable through the literal grammar.
        #[test]
        fn duration_roundtrips(nanos in 0u64..3_600_000_000_000_000) {
            let d = Duration::from_nanos(nanos);
            let s = d.to_env();
            prop_assert_eq!(Duration::from_env(&s).unwrap(), d, "literal: {}", s);
        }

        #[test]
        fn parser_never_panics(s in ".*") {
            let _ = Duration::from_env(&s);
        }
    }
}

// ============================================================================
// Sequence and Mapping Round-Trips
// ============================================================================

mod collection_roundtrips {
    use super::*;

    proptest! {
        #[test]
        fn string_vec_roundtrips(v in prop::collection::vec("[a-z0-9_-]{1,8}", 0..8)) {
            let s = v.to_env();
            prop_assert_eq!(Vec::<String>::from_env(&s).unwrap(), v);
        }

        #[test]
        fn int_vec_roundtrips(v in prop::collection::vec(any::<i64>(), 0..8)) {
            let s = v.to_env();
            prop_assert_eq!(Vec::<i64>::from_env(&s).unwrap(), v);
        }

        /// Keys must avoid the separators; values may contain colons since
        /// only the first one splits.
        #[test]
        fn string_map_roundtrips(
            m in prop::collection::hash_map("[a-z_]{1,8}", "[a-z0-9:_-]{1,12}", 0..8)
        ) {
            let s = m.to_env();
            prop_assert_eq!(HashMap::<String, String>::from_env(&s).unwrap(), m);
        }
    }
}
