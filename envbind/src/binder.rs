//! Value resolution for macro-generated bind impls
//!
//! `#[derive(Bind)]` expands each eligible field into a [`FieldSpec`]
//! descriptor plus a `resolve`/`apply` pair. The descriptors are built fresh
//! on every bind call and dropped when the call returns; nothing here holds
//! state between calls.

use crate::error::BindError;
use crate::source::EnvSource;

/// Populate a struct's fields from an environment source.
///
/// Implemented by `#[derive(Bind)]`; call it through [`crate::bind`] or
/// [`crate::bind_with`].
pub trait Bind {
    /// Bind every non-ignored field, deriving each key from `prefix`.
    ///
    /// Fields are processed in declaration order and the first failure
    /// aborts the pass. Mutations applied before the failure are kept.
    fn bind_from(&mut self, prefix: &str, source: &dyn EnvSource) -> Result<(), BindError>;
}

/// Descriptor for one bindable field.
///
/// `lookup` is the uppercased alias-or-field-name; the prefix is joined and
/// re-uppercased at resolution time so the same derive output works with any
/// runtime prefix.
#[doc(hidden)]
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Declared field name, as written in the struct.
    pub name: &'static str,
    /// Uppercased name portion of the key (alias if present, else field name).
    pub lookup: &'static str,
    /// Uppercased alias, retried verbatim when the computed key is unset.
    pub alias: Option<&'static str>,
    /// Default literal, coerced by the same rules as an environment value.
    pub default: Option<&'static str>,
    /// Whether an unset, defaultless field aborts the bind.
    pub required: bool,
}

/// Reject an empty prefix before any lookups happen.
#[doc(hidden)]
pub fn check_prefix(prefix: &str) -> Result<(), BindError> {
    if prefix.is_empty() {
        return Err(BindError::InvalidPrefix);
    }
    Ok(())
}

/// Resolve the raw string for one field.
///
/// Lookup order: computed `PREFIX_LOOKUP` key, then the literal alias, then
/// the default. Returns `Ok(None)` when the field should be left untouched,
/// and the computed key alongside the value so parse failures can report it.
#[doc(hidden)]
pub fn resolve(
    source: &dyn EnvSource,
    prefix: &str,
    field: &FieldSpec,
) -> Result<Option<(String, String)>, BindError> {
    let key = format!("{}_{}", prefix, field.lookup).to_uppercase();

    let mut value = source.lookup(&key);
    if value.is_none() {
        if let Some(alias) = field.alias {
            value = source.lookup(alias);
        }
    }

    match value {
        Some(value) => Ok(Some((key, value))),
        None => match field.default {
            Some(default) => Ok(Some((key, default.to_string()))),
            None if field.required => Err(BindError::MissingRequired { key }),
            None => Ok(None),
        },
    }
}

/// Run a coercion closure against a field, wrapping any failure into
/// [`BindError::Parse`] with the field's key, name, type and raw value.
#[doc(hidden)]
pub fn apply<T, F>(
    value: &mut T,
    key: &str,
    raw: &str,
    field: &FieldSpec,
    coerce: F,
) -> Result<(), BindError>
where
    F: FnOnce(&mut T, &str) -> anyhow::Result<()>,
{
    coerce(value, raw).map_err(|source| BindError::parse::<T>(key, field.name, raw, source))
}
