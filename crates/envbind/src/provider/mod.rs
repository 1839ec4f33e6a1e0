//! Snapshot providers: where the external key/value pairs come from.
//!
//! The engine reads the environment exactly once per load, through a
//! caller-supplied [`Provider`]. A provider produces the full key/value
//! [`Snapshot`]; the loader then resolves every declared key against that
//! snapshot, case-sensitively.
//!
//! # Built-in Providers
//!
//! - [`EnvProvider`] — the process environment
//! - [`MapProvider`] — an in-memory map, for tests and custom wiring
//!
//! # Custom Providers
//!
//! ```rust,ignore
//! use envbind::provider::{Provider, ProviderError};
//! use std::collections::HashMap;
//!
//! struct VaultProvider { /* ... */ }
//!
//! impl Provider for VaultProvider {
//!     fn name(&self) -> &'static str { "vault" }
//!
//!     fn snapshot(&self) -> Result<HashMap<String, String>, ProviderError> {
//!         // Fetch the key/value set from Vault...
//!         # unimplemented!()
//!     }
//! }
//! ```

mod env;
mod map;

pub use env::EnvProvider;
pub use map::MapProvider;

use std::collections::HashMap;

use miette::Diagnostic;
use thiserror::Error;

/// A source of the external key/value snapshot.
///
/// Implementations are read exactly once per load; the engine never calls
/// back into the provider after the snapshot is taken.
pub trait Provider {
    /// A short name identifying the provider in diagnostics.
    fn name(&self) -> &'static str;

    /// Produces the full key/value snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] if the snapshot cannot be read.
    fn snapshot(&self) -> Result<HashMap<String, String>, ProviderError>;
}

/// A snapshot read failure.
#[derive(Debug, Error, Diagnostic)]
pub enum ProviderError {
    /// A key or value in the environment is not valid UTF-8.
    #[error("environment variable {key:?} is not valid UTF-8")]
    #[diagnostic(
        code(envbind::provider),
        help("ensure every environment variable contains valid UTF-8 text")
    )]
    InvalidUtf8 {
        /// The offending key (lossily decoded when the key itself is
        /// invalid).
        key: String,
    },
}

/// The external key/value mapping, read once per load.
///
/// Lookups are case-sensitive and each declared key is resolved against the
/// snapshot exactly once per walk.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    values: HashMap<String, String>,
}

impl Snapshot {
    /// Takes a snapshot from the given provider.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`ProviderError`].
    pub fn from_provider(provider: &dyn Provider) -> Result<Self, ProviderError> {
        Ok(Self {
            values: provider.snapshot()?,
        })
    }

    /// Looks up a key, case-sensitively.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of pairs in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for Snapshot {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
