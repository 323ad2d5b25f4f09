//! Error types for environment variable binding

/// Errors that can occur when binding environment variables to a struct.
///
/// A bind stops at the first failing field. Fields bound before the failure
/// keep their new values, so callers must treat a failed bind as leaving the
/// configuration in an indeterminate state.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The top-level call was made with an empty prefix.
    ///
    /// Per-field aliases may opt out of the prefix convention, but the bind
    /// call itself always requires a non-empty prefix.
    #[error("a non-empty prefix must be provided")]
    InvalidPrefix,

    /// A field marked `#[env(require)]` has neither an environment value nor
    /// a default.
    #[error("required key {key} missing value")]
    MissingRequired {
        /// The computed `PREFIX_NAME` key that was looked up
        key: String,
    },

    /// A resolved string could not be coerced into the field's type.
    #[error("binding {key} to {field}: converting '{value}' to type {type_name}: {source}")]
    Parse {
        /// The computed `PREFIX_NAME` key the value was resolved under
        key: String,
        /// Declared name of the struct field
        field: &'static str,
        /// Rust type name of the field
        type_name: &'static str,
        /// The raw string that failed to coerce
        value: String,
        /// Underlying cause from the coercion engine or a custom parser
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BindError {
    /// Wrap a coercion failure into a [`BindError::Parse`] (used by
    /// macro-generated code via `binder::apply`).
    #[doc(hidden)]
    pub fn parse<T>(
        key: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::Parse {
            key: key.into(),
            field,
            type_name: std::any::type_name::<T>(),
            value: value.into(),
            source: source.into(),
        }
    }
}

/// Built-in coercion failures surfaced as the cause of
/// [`BindError::Parse`].
#[derive(Debug, thiserror::Error)]
pub enum CoerceError {
    /// The raw string is not one of the recognized boolean literals.
    #[error("invalid boolean literal {value:?}")]
    InvalidBool {
        /// Offending raw string
        value: String,
    },

    /// The raw string is not a valid duration (e.g. "2m", "500ms", "1h30m").
    #[error("invalid duration {value:?}")]
    InvalidDuration {
        /// Offending raw string
        value: String,
    },

    /// A map entry did not contain exactly one `:` separator.
    #[error("invalid map item {item:?}")]
    InvalidMapItem {
        /// Offending `key:value` fragment
        item: String,
    },
}
