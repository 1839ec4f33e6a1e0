//! Tree-walker runtime: the leaf operations behind the three traversal
//! passes, plus the binding context that collects required-field violations.
//!
//! `#[derive(EnvBind)]` expands each struct into an [`EnvBind`] impl whose
//! three methods visit the fields in declaration order — one statement per
//! field, so traversal order is deterministic and matches the source. Leaf
//! fields dispatch through the [`Leaf`] probe; `#[env(nested)]` branches
//! recurse into the nested struct's own impl.
//!
//! # Capability dispatch
//!
//! A leaf binds through its own [`Unmarshaller`] impl when it has one, and
//! through the [`EnvValue`] registry otherwise. The generated call site
//!
//! ```rust,ignore
//! (&&Leaf::<FieldType>::new()).bind(&mut self.field, &desc, ctx)?;
//! ```
//!
//! resolves by autoref: [`ViaUnmarshaller`] is implemented for
//! `&Leaf<T>` and wins when `T: Unmarshaller`, [`ViaValue`] is implemented
//! for `Leaf<T>` and applies otherwise. A type implementing both binds
//! through its unmarshal method. A tagged field whose type implements
//! neither fails to compile at the derive site — there is no runtime
//! unsupported-type path.

use std::error::Error as StdError;
use std::fmt::Display;
use std::marker::PhantomData;

use crate::error::Error;
use crate::provider::Snapshot;
use crate::report::ReportRow;
use crate::tag::FieldDescriptor;
use crate::value::EnvValue;

/// A configuration tree the engine can traverse.
///
/// Implemented by `#[derive(EnvBind)]`; the derive generates all three
/// passes over the struct's fields in declaration order.
pub trait EnvBind {
    /// The bind pass: resolve every keyed leaf against the snapshot held by
    /// `ctx`, converting present values in place and recording missing
    /// required keys.
    ///
    /// # Errors
    ///
    /// Returns immediately on the first conversion or unmarshal failure.
    /// Missing required keys are collected in `ctx`, not returned here.
    fn bind_fields(&mut self, ctx: &mut BindContext<'_>) -> Result<(), Error>;

    /// The export pass: serialize every keyed leaf to a `KEY=value` line,
    /// in traversal order, duplicates preserved.
    fn export_fields(&self, out: &mut Vec<String>);

    /// The report pass: produce one row per keyed leaf, in traversal order.
    fn report_fields(&self, rows: &mut Vec<ReportRow>);
}

/// Custom conversion escape hatch for leaf types the registry does not
/// cover.
///
/// Any field type implementing this trait is bound by invoking
/// `unmarshal_env` with the raw external string, bypassing the registry —
/// even when the type also implements [`EnvValue`]. Export and report use
/// the type's `Display` impl.
pub trait Unmarshaller {
    /// Consumes the raw external string, mutating `self` in place.
    ///
    /// # Errors
    ///
    /// Any error aborts the load immediately, wrapped as
    /// [`Error::Unmarshal`] with the offending key.
    fn unmarshal_env(&mut self, raw: &str) -> Result<(), Box<dyn StdError + Send + Sync>>;
}

/// A boxed unmarshaller is itself an unmarshaller, so reference-typed
/// leaves bind through the same protocol as value-typed ones.
impl<T: Unmarshaller + ?Sized> Unmarshaller for Box<T> {
    fn unmarshal_env(&mut self, raw: &str) -> Result<(), Box<dyn StdError + Send + Sync>> {
        (**self).unmarshal_env(raw)
    }
}

/// Per-load walker state: the snapshot plus collected required-field
/// violations.
///
/// Violations keep first-encounter order and are deduplicated, so a key
/// declared twice in the tree appears once in the aggregated error.
pub struct BindContext<'s> {
    snapshot: &'s Snapshot,
    missing: Vec<String>,
}

impl<'s> BindContext<'s> {
    /// Creates a context over one snapshot.
    #[must_use]
    pub fn new(snapshot: &'s Snapshot) -> Self {
        Self {
            snapshot,
            missing: Vec::new(),
        }
    }

    /// Resolves a descriptor against the snapshot.
    ///
    /// Returns the raw value only when the field has a key and the value is
    /// present and non-empty. An absent or empty value on a required field
    /// records the violation; on an optional field it is simply skipped, so
    /// the caller's pre-set value survives.
    pub fn raw_for(&mut self, desc: &FieldDescriptor) -> Option<&'s str> {
        let key = desc.key.as_deref()?;
        let raw = self.snapshot.get(key).filter(|value| !value.is_empty());

        if raw.is_none() && desc.required {
            self.record_missing(key);
        }

        raw
    }

    fn record_missing(&mut self, key: &str) {
        if !self.missing.iter().any(|k| k == key) {
            self.missing.push(key.to_string());
        }
    }

    /// Raises the aggregated missing-required error, if any violations were
    /// collected during the walk.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRequired { keys: self.missing })
        }
    }
}

/// Dispatch probe for one leaf field of type `T`.
///
/// Constructed by generated code; carries no data.
pub struct Leaf<T>(PhantomData<fn() -> T>);

impl<T> Leaf<T> {
    /// Creates the probe.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Leaf<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Leaf operations routed through the field type's [`Unmarshaller`] impl.
///
/// Implemented for `&Leaf<T>` so that autoref resolution prefers it over
/// [`ViaValue`] whenever the capability is present.
pub trait ViaUnmarshaller {
    /// The leaf field type.
    type Field;

    /// Binds the raw external value by invoking the field's unmarshal
    /// method.
    ///
    /// # Errors
    ///
    /// Wraps the unmarshaller's error as [`Error::Unmarshal`].
    fn bind(
        &self,
        field: &mut Self::Field,
        desc: &FieldDescriptor,
        ctx: &mut BindContext<'_>,
    ) -> Result<(), Error>;

    /// Serializes the field to a `KEY=value` line via `Display`.
    fn export(&self, field: &Self::Field, desc: &FieldDescriptor, out: &mut Vec<String>);

    /// Produces the field's report row.
    fn report(&self, field: &Self::Field, desc: &FieldDescriptor, rows: &mut Vec<ReportRow>);
}

impl<T> ViaUnmarshaller for &Leaf<T>
where
    T: Unmarshaller + Display,
{
    type Field = T;

    fn bind(
        &self,
        field: &mut T,
        desc: &FieldDescriptor,
        ctx: &mut BindContext<'_>,
    ) -> Result<(), Error> {
        let Some(raw) = ctx.raw_for(desc) else {
            return Ok(());
        };

        field.unmarshal_env(raw).map_err(|source| Error::Unmarshal {
            key: desc.key.clone().unwrap_or_default(),
            source,
        })
    }

    fn export(&self, field: &T, desc: &FieldDescriptor, out: &mut Vec<String>) {
        if let Some(key) = desc.key.as_deref() {
            out.push(format!("{key}={field}"));
        }
    }

    fn report(&self, field: &T, desc: &FieldDescriptor, rows: &mut Vec<ReportRow>) {
        if let Some(key) = desc.key.as_deref() {
            rows.push(ReportRow::new(
                desc,
                short_type_name::<T>().to_string(),
                key,
                field.to_string(),
            ));
        }
    }
}

/// Leaf operations routed through the [`EnvValue`] registry.
pub trait ViaValue {
    /// The leaf field type.
    type Field;

    /// Binds the raw external value through the registry converter.
    ///
    /// # Errors
    ///
    /// Wraps registry failures with key context; see
    /// [`Error::Conversion`] and [`Error::MalformedMapEntry`].
    fn bind(
        &self,
        field: &mut Self::Field,
        desc: &FieldDescriptor,
        ctx: &mut BindContext<'_>,
    ) -> Result<(), Error>;

    /// Serializes the field to a `KEY=value` line via the inverse
    /// converter.
    fn export(&self, field: &Self::Field, desc: &FieldDescriptor, out: &mut Vec<String>);

    /// Produces the field's report row.
    fn report(&self, field: &Self::Field, desc: &FieldDescriptor, rows: &mut Vec<ReportRow>);
}

impl<T: EnvValue> ViaValue for Leaf<T> {
    type Field = T;

    fn bind(
        &self,
        field: &mut T,
        desc: &FieldDescriptor,
        ctx: &mut BindContext<'_>,
    ) -> Result<(), Error> {
        let Some(raw) = ctx.raw_for(desc) else {
            return Ok(());
        };

        match T::from_env(raw) {
            Ok(value) => {
                *field = value;
                Ok(())
            }
            Err(source) => {
                let key = desc.key.as_deref().unwrap_or_default();
                Err(Error::from_value_error(key, raw, T::type_label(), source))
            }
        }
    }

    fn export(&self, field: &T, desc: &FieldDescriptor, out: &mut Vec<String>) {
        if let Some(key) = desc.key.as_deref() {
            out.push(format!("{key}={}", field.to_env()));
        }
    }

    fn report(&self, field: &T, desc: &FieldDescriptor, rows: &mut Vec<ReportRow>) {
        if let Some(key) = desc.key.as_deref() {
            rows.push(ReportRow::new(desc, T::type_label(), key, field.to_env()));
        }
    }
}

/// Last path segment of a type name, for unmarshaller report rows.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
