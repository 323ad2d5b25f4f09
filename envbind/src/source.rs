//! Environment sources
//!
//! Binding reads keys through the [`EnvSource`] trait instead of touching
//! `std::env` directly, so tests and tools can substitute a deterministic
//! in-memory table for the process environment.

use std::collections::HashMap;

/// Key/value lookup capability backing a bind call.
///
/// A set-but-empty variable is a present value: it overrides defaults and
/// satisfies `require`, exactly like `std::env`.
pub trait EnvSource {
    /// Get a variable's value, or `None` if it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory source.
///
/// Primarily for tests: the process environment is global mutable state,
/// while a `MapSource` makes a bind call fully deterministic.
///
/// ```rust
/// use envbind::MapSource;
///
/// let source = MapSource::new()
///     .with("APP_PORT", "8080")
///     .with("APP_DEBUG", "true");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    vars: HashMap<String, String>,
}

impl MapSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Add a variable in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl EnvSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_lookup() {
        let source = MapSource::new().with("KEY", "value");
        assert_eq!(source.lookup("KEY"), Some("value".to_string()));
        assert_eq!(source.lookup("OTHER"), None);
    }

    #[test]
    fn test_map_source_empty_value_is_present() {
        let source = MapSource::new().with("BLANK", "");
        assert_eq!(source.lookup("BLANK"), Some(String::new()));
    }
}
