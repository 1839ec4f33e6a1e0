//! In-memory provider for tests and programmatic snapshots.

use std::collections::HashMap;

use super::{Provider, ProviderError};

/// Provider backed by an in-memory map.
///
/// # Example
///
/// ```rust,ignore
/// use envbind::provider::MapProvider;
///
/// let provider = MapProvider::new()
///     .set("HOST_IP", "10.0.0.1")
///     .set("HOST_PORT", "8080");
///
/// envbind::load_from(&mut config, &provider)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct MapProvider {
    values: HashMap<String, String>,
}

impl MapProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key/value pair, replacing any previous value for the key.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapProvider
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

impl Provider for MapProvider {
    fn name(&self) -> &'static str {
        "map"
    }

    fn snapshot(&self) -> Result<HashMap<String, String>, ProviderError> {
        Ok(self.values.clone())
    }
}
