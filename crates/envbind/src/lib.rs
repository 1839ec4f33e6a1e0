//! # envbind
//!
//! Bind a flat namespace of environment variables onto typed, nested
//! configuration structs.
//!
//! `envbind` converts each tagged field's external string to its declared
//! type, enforces required-field presence across the whole tree before
//! failing, and offers two companion passes over the same tree: a reverse
//! serialization back to `KEY=value` lines and a redacting, column-aligned
//! audit report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use envbind::EnvBind;
//!
//! #[derive(EnvBind, Default)]
//! struct HostInfo {
//!     #[env("HOST_IP,required")]
//!     ip: String,
//!
//!     #[env("PASSWORD,noreport")]
//!     password: String,
//!
//!     #[env("HOST_PORT,report")]
//!     port: u16,
//!
//!     #[env(nested)]
//!     tls: TlsSettings,
//! }
//!
//! fn main() -> Result<(), envbind::Error> {
//!     let mut hi = HostInfo { port: 80, ..HostInfo::default() };
//!
//!     envbind::load(&mut hi)?;
//!     envbind::write_report(&hi, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Tag Grammar
//!
//! ```text
//! #[env("KEY[,flag]*")]     flag ∈ { required, report, noreport }
//! #[env(nested)]            recurse into a nested config struct
//! ```
//!
//! The key is matched case-sensitively against the snapshot. Flags are
//! case-insensitive; unknown flags are ignored so tags stay
//! forward-compatible. A field without an annotation is left alone.
//!
//! | Flag | Effect |
//! |------|--------|
//! | `required` | An absent or empty value fails the load |
//! | `report` | The audit report shows the literal value |
//! | `noreport` | The audit report shows `(OMITTED)` (also the default) |
//!
//! ## Binding Rules
//!
//! - A value that is absent *or empty* leaves the field at its pre-set
//!   default; with `required` it joins the aggregated
//!   `missing required environment variables: ...` error instead.
//! - All missing-required violations across the tree are collected before
//!   the load fails, so one run surfaces the complete list.
//! - A present-but-malformed value aborts the load immediately with the
//!   offending key and cause. The two error classes never mix.
//! - `#[env(nested)]` branches recurse unconditionally; an unset
//!   `Option<Nested>` branch is allocated via `Default` first so required
//!   checks inside it still fire.
//!
//! ## Supported Leaf Kinds
//!
//! Strings, booleans (`true`/`false`/`1`/`0`), all integer widths, floats,
//! complex numbers (`(re+imi)`), durations (`2s`, `150ms`, `1h30m`), URLs,
//! `Vec<T>` (comma-separated, elements trimmed), `HashMap<K, V>`
//! (`k:v` entries, split on the first colon), `Option<T>`, and — with the
//! `secrecy` feature — `SecretString`. Anything else can opt in by
//! implementing [`Unmarshaller`], which also takes precedence over the
//! built-in conversions.
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `secrecy` | `secrecy::SecretString` leaf support | No |
//! | `tracing` | Loader instrumentation via `tracing` | No |
//! | `full` | Everything above | No |

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Re-export the derive macro under the trait's name, serde-style.
pub use envbind_macro::EnvBind;

// ============================================================================
// Re-exported Dependencies
// ============================================================================
// Re-exported so users don't need to add them as direct dependencies; the
// macro generates code that references runtime types through ::envbind::.

/// Re-export miette for fancy diagnostic rendering of [`Error`].
pub use miette;

/// Re-export `num_complex` for complex-valued fields.
pub use num_complex;

/// Re-export url for URL-valued fields.
pub use url;

/// Re-export secrecy when the feature is enabled.
#[cfg(feature = "secrecy")]
pub use secrecy;

// ============================================================================
// Core Modules
// ============================================================================

mod error;
pub use error::Error;

pub mod tag;
pub use tag::{FieldDescriptor, ReportPolicy};

pub mod value;
pub use value::{EnvValue, ValueError};

// The trait and the derive share the name, serde-style: one lives in the
// type namespace, the other in the macro namespace.
pub mod walk;
pub use walk::{EnvBind, Unmarshaller};

pub mod provider;
pub use provider::{EnvProvider, MapProvider, Provider, Snapshot};

pub mod loader;
pub use loader::{load, load_from};

pub mod export;
pub use export::to_env;

pub mod report;
pub use report::{OMITTED, ReportRow, report_to_string, write_report};

/// A Result type that displays errors with miette's fancy formatting.
///
/// Use this as your main function return type for pretty error output:
///
/// ```rust,ignore
/// fn main() -> envbind::Result<()> {
///     envbind::load(&mut config)?;
///     Ok(())
/// }
/// ```
pub type Result<T> = miette::Result<T>;
