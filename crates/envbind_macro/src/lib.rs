//! # envbind_macro
//!
//! Procedural macro implementation for the `envbind` crate.
//!
//! This crate provides the `#[derive(EnvBind)]` macro that expands a
//! configuration struct into the three traversal passes of the `EnvBind`
//! trait: bind (environment → fields), export (fields → `KEY=value`
//! lines), and report (fields → audit rows). Each pass visits the fields
//! in declaration order, one generated statement per field, so traversal
//! order is deterministic and matches the source.
//!
//! **Note:** Users should depend on the `envbind` crate, not this one
//! directly. The `envbind` crate re-exports this macro along with the
//! runtime types the generated code references.
//!
//! # Module Structure
//!
//! - `parse` - Field attribute parsing for `#[env(...)]`
//! - `expand` - Code generation for the three passes

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod parse;

/// Derive macro binding environment variables onto a configuration struct.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[env("KEY")]` | Bind the field to the variable `KEY` |
/// | `#[env("KEY,required")]` | An absent or empty value fails the load |
/// | `#[env("KEY,report")]` | The audit report shows the literal value |
/// | `#[env("KEY,noreport")]` | The audit report shows `(OMITTED)` |
/// | `#[env(nested)]` | Recurse into a nested `EnvBind` struct |
///
/// Flags combine freely after the key (`"KEY,required,noreport"`) and are
/// case-insensitive; unknown flags are ignored at runtime. A field without
/// an `#[env]` attribute does not participate in any pass.
///
/// Leaf fields bind through the runtime conversion registry, or through
/// the field type's own `Unmarshaller` impl when it has one — the
/// unmarshaller always wins. A tagged field whose type supports neither
/// fails to compile.
///
/// `#[env(nested)]` on an `Option<Nested>` field allocates the nested
/// struct via `Default` before recursing, so required checks inside it
/// fire even when the caller left the field unset.
///
/// # Example
///
/// ```ignore
/// use envbind::EnvBind;
///
/// #[derive(EnvBind, Default)]
/// struct HostInfo {
///     #[env("HOST_IP,required")]
///     ip: String,
///
///     #[env("PASSWORD,noreport")]
///     password: String,
///
///     #[env("HOST_PORT,report")]
///     port: u16,
///
///     #[env(nested)]
///     tls: TlsSettings,
/// }
/// ```
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_env_bind(input: TokenStream) -> TokenStream {
    // Parse the input TokenStream into syn's DeriveInput AST.
    let input = parse_macro_input!(input as DeriveInput);

    // Delegate to the expander; on error, emit compile_error!() so the
    // message lands on the offending span.
    expand::expand(&input)
        .map(Into::into)
        .unwrap_or_else(|err| err.to_compile_error().into())
}
