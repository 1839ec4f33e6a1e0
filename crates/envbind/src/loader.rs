//! The loader: one snapshot read, one bind pass, one aggregated verdict.
//!
//! [`load`] snapshots the process environment; [`load_from`] accepts any
//! [`Provider`]. Either way the walk is the same: present values convert in
//! place, absent or empty values leave the caller's defaults untouched, and
//! required-field violations accumulate across the entire tree before being
//! raised once — a malformed value, by contrast, aborts immediately.

use crate::error::Error;
use crate::provider::{EnvProvider, Provider, Snapshot};
use crate::walk::{BindContext, EnvBind};

/// Binds the process environment into `tree`.
///
/// # Errors
///
/// - [`Error::MissingRequired`] listing every required key with no present,
///   non-empty value, in declaration order.
/// - [`Error::Conversion`], [`Error::MalformedMapEntry`], or
///   [`Error::Unmarshal`] on the first malformed value encountered.
/// - [`Error::Provider`] if the environment snapshot cannot be read.
pub fn load<T: EnvBind>(tree: &mut T) -> Result<(), Error> {
    load_from(tree, &EnvProvider::new())
}

/// Binds a snapshot from the given provider into `tree`.
///
/// The provider is read exactly once; every declared key is then resolved
/// against that snapshot, case-sensitively. Fields already converted before
/// a fatal error keep their new values.
///
/// # Errors
///
/// Same contract as [`load`].
pub fn load_from<T: EnvBind>(tree: &mut T, provider: &dyn Provider) -> Result<(), Error> {
    let snapshot = Snapshot::from_provider(provider)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        provider = provider.name(),
        pairs = snapshot.len(),
        "environment snapshot taken"
    );

    let mut ctx = BindContext::new(&snapshot);
    tree.bind_fields(&mut ctx)?;

    ctx.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MapProvider;
    use crate::report::ReportRow;
    use crate::tag::FieldDescriptor;
    use crate::walk::{Leaf, ViaValue};

    /// Hand-rolled stand-in for derive output, enough to drive the loader.
    #[derive(Default)]
    struct TwoFields {
        first: String,
        second: u16,
    }

    impl EnvBind for TwoFields {
        fn bind_fields(&mut self, ctx: &mut BindContext<'_>) -> Result<(), Error> {
            {
                let desc =
                    FieldDescriptor::parse(Some("FIRST_THING,required"), "TwoFields", "first");
                Leaf::<String>::new().bind(&mut self.first, &desc, ctx)?;
            }
            {
                let desc = FieldDescriptor::parse(Some("SECOND_THING"), "TwoFields", "second");
                Leaf::<u16>::new().bind(&mut self.second, &desc, ctx)?;
            }
            Ok(())
        }

        fn export_fields(&self, out: &mut Vec<String>) {
            {
                let desc =
                    FieldDescriptor::parse(Some("FIRST_THING,required"), "TwoFields", "first");
                Leaf::<String>::new().export(&self.first, &desc, out);
            }
            {
                let desc = FieldDescriptor::parse(Some("SECOND_THING"), "TwoFields", "second");
                Leaf::<u16>::new().export(&self.second, &desc, out);
            }
        }

        fn report_fields(&self, rows: &mut Vec<ReportRow>) {
            {
                let desc =
                    FieldDescriptor::parse(Some("FIRST_THING,required"), "TwoFields", "first");
                Leaf::<String>::new().report(&self.first, &desc, rows);
            }
            {
                let desc = FieldDescriptor::parse(Some("SECOND_THING"), "TwoFields", "second");
                Leaf::<u16>::new().report(&self.second, &desc, rows);
            }
        }
    }

    #[test]
    fn load_from_binds_present_values() {
        let provider = MapProvider::new()
            .set("FIRST_THING", "hello")
            .set("SECOND_THING", "8080");

        let mut tree = TwoFields::default();
        load_from(&mut tree, &provider).unwrap();

        assert_eq!(tree.first, "hello");
        assert_eq!(tree.second, 8080);
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let provider = MapProvider::new()
            .set("FIRST_THING", "hello")
            .set("SECOND_THING", "8080");

        let mut tree = TwoFields::default();
        load_from(&mut tree, &provider).unwrap();
        load_from(&mut tree, &provider).unwrap();

        assert_eq!(tree.first, "hello");
        assert_eq!(tree.second, 8080);
    }

    #[test]
    fn empty_snapshot_fails_only_on_required() {
        let mut tree = TwoFields {
            second: 443,
            ..TwoFields::default()
        };

        let err = load_from(&mut tree, &MapProvider::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required environment variables: FIRST_THING"
        );
        // The optional field keeps its pre-set default.
        assert_eq!(tree.second, 443);
    }

    #[test]
    fn conversion_error_wins_over_missing_aggregation() {
        // FIRST_THING is required and absent, but SECOND_THING is malformed;
        // the walk reaches the malformed value and aborts with it.
        let provider = MapProvider::new().set("SECOND_THING", "not-a-port");

        let mut tree = TwoFields::default();
        let err = load_from(&mut tree, &provider).unwrap_err();

        assert!(matches!(err, Error::Conversion { ref key, .. } if key == "SECOND_THING"));
    }
}
