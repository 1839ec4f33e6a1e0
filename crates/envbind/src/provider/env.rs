//! Process-environment provider.

use std::collections::HashMap;

use super::{Provider, ProviderError};

/// Provider that snapshots the process environment.
///
/// This is what [`load`](crate::load) uses. Every variable must be valid
/// UTF-8; a snapshot containing a non-UTF-8 key or value fails the load.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvProvider;

impl EnvProvider {
    /// Creates a new process-environment provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Provider for EnvProvider {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn snapshot(&self) -> Result<HashMap<String, String>, ProviderError> {
        let mut values = HashMap::new();

        for (key, value) in std::env::vars_os() {
            let key = key.into_string().map_err(|raw| ProviderError::InvalidUtf8 {
                key: raw.to_string_lossy().into_owned(),
            })?;

            let value = value
                .into_string()
                .map_err(|_| ProviderError::InvalidUtf8 { key: key.clone() })?;

            values.insert(key, value);
        }

        Ok(values)
    }
}
