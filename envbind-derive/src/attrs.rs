//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts per-field binding annotations from the struct
//! definition during macro expansion.

use syn::{Field, Lit};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Explicit environment variable name used in place of the field name.
    ///
    /// Substitutes only the name portion of the computed key; the literal
    /// alias is also retried as a fallback lookup at bind time.
    pub alias: Option<String>,

    /// Fallback literal used when the variable is unset, coerced by the same
    /// rules as an environment value.
    pub default: Option<String>,

    /// Fail the bind when the field is unset and has no default.
    pub require: bool,

    /// Skip the field entirely: never looked up, never mutated.
    pub ignore: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Unrecognized keys inside `#[env(...)]` are ignored, as are attributes
    /// belonging to other macros.
    pub fn from_field(field: &Field) -> Self {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                // alias = "NAME"
                if meta.path.is_ident("alias") {
                    let value = meta.value()?;
                    let name: Lit = value.parse()?;
                    if let Lit::Str(s) = name {
                        attrs.alias = Some(s.value());
                    }
                    return Ok(());
                }

                // default = "literal" (bare int/float/bool literals are
                // accepted and stored as their textual form)
                if meta.path.is_ident("default") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    attrs.default = Some(match lit {
                        Lit::Str(s) => s.value(),
                        Lit::Int(i) => i.to_string(),
                        Lit::Float(f) => f.to_string(),
                        Lit::Bool(b) => b.value.to_string(),
                        other => quote::ToTokens::to_token_stream(&other).to_string(),
                    });
                    return Ok(());
                }

                // require or require = true/false
                if meta.path.is_ident("require") {
                    attrs.require = flag_value(&meta)?;
                    return Ok(());
                }

                // ignore or ignore = true/false
                if meta.path.is_ident("ignore") {
                    attrs.ignore = flag_value(&meta)?;
                    return Ok(());
                }

                // Unrecognized annotation keys are ignored, consuming a
                // literal value if one is attached
                if meta.input.peek(syn::Token![=]) {
                    let _ = meta.value()?.parse::<Lit>()?;
                }
                Ok(())
            });
        }

        attrs
    }
}

fn flag_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        let value = meta.value()?;
        let lit: syn::LitBool = value.parse()?;
        Ok(lit.value)
    } else {
        Ok(true)
    }
}
