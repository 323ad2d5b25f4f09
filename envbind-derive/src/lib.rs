//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::FieldAttrs;

/// Extract the type arguments when `ty` is a path ending in `name` with the
/// expected arity (e.g. `Vec<T>`, `HashMap<K, V>`).
fn generic_args<'a>(ty: &'a Type, name: &str, arity: usize) -> Option<Vec<&'a Type>> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let seg = type_path.path.segments.last()?;
    if seg.ident != name {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    let types: Vec<&Type> = args
        .args
        .iter()
        .filter_map(|arg| match arg {
            syn::GenericArgument::Type(inner) => Some(inner),
            _ => None,
        })
        .collect();
    (types.len() == arity).then_some(types)
}

/// Generate the coercion closure for one field type.
///
/// `Option`, `Vec` and map shapes are classified syntactically and recurse,
/// so the capability probe runs against the concrete element type at every
/// nesting depth. Everything else resolves through the probe directly:
/// `SetFromStr`, then `UnmarshalText`, then the built-in `EnvValue` rules.
fn coercer(ty: &Type) -> proc_macro2::TokenStream {
    if let Some(args) = generic_args(ty, "Option", 1) {
        let inner = coercer(args[0]);
        return quote! {
            |__value: &mut #ty, __raw: &str| ::envbind::coerce::pointee(__value, __raw, #inner)
        };
    }

    if let Some(args) = generic_args(ty, "Vec", 1) {
        let inner = coercer(args[0]);
        return quote! {
            |__value: &mut #ty, __raw: &str| ::envbind::coerce::sequence(__value, __raw, #inner)
        };
    }

    for map in ["HashMap", "BTreeMap"] {
        if let Some(args) = generic_args(ty, map, 2) {
            let key = coercer(args[0]);
            let entry = coercer(args[1]);
            return quote! {
                |__value: &mut #ty, __raw: &str| {
                    ::envbind::coerce::mapping(__value, __raw, #key, #entry)
                }
            };
        }
    }

    quote! {
        |__value: &mut #ty, __raw: &str| {
            #[allow(unused_imports)]
            use ::envbind::dispatch::{ByEnvValue as _, BySetFromStr as _, ByUnmarshalText as _};
            (&&&::envbind::dispatch::Probe::<#ty>::new())
                .via()
                .apply(__value, __raw)
        }
    }
}

/// `Bind` derive macro
///
/// Implements `envbind::Bind` for a struct with named fields, binding each
/// field from an environment variable whose key is the uppercased
/// `PREFIX_FIELDNAME` (the prefix is supplied at bind time).
///
/// # Supported Attributes
///
/// **Field-level** `#[env(...)]`:
/// - `alias = "NAME"`: use `NAME` as the name portion of the key, and retry
///   the literal `NAME` when the computed key is unset
/// - `default = "literal"`: fallback value, coerced like an env value
/// - `require`: fail the bind when unset and no default exists
/// - `ignore`: skip the field entirely
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(Bind, attributes(env))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;

    // Fields are walked in declaration order; binding happens in the same
    // order at runtime.
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Bind only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Bind only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let bindings = fields.iter().filter_map(|field| {
        let attrs = FieldAttrs::from_field(field);

        // Ignored fields get no descriptor: never looked up, never mutated,
        // never required.
        if attrs.ignore {
            return None;
        }

        let ident = field.ident.as_ref().unwrap();
        let name = ident.to_string();

        // The alias substitutes the name portion of the key and is stored
        // uppercased; the prefix is joined and re-uppercased at bind time.
        let lookup = attrs
            .alias
            .as_deref()
            .unwrap_or(&name)
            .to_uppercase();
        let alias = match attrs.alias.as_deref() {
            Some(alias) => {
                let alias = alias.to_uppercase();
                quote! { ::core::option::Option::Some(#alias) }
            }
            None => quote! { ::core::option::Option::None },
        };
        let default = match attrs.default.as_deref() {
            Some(default) => quote! { ::core::option::Option::Some(#default) },
            None => quote! { ::core::option::Option::None },
        };
        let required = attrs.require;
        let coerce = coercer(&field.ty);

        Some(quote! {
            {
                let __field = ::envbind::binder::FieldSpec {
                    name: #name,
                    lookup: #lookup,
                    alias: #alias,
                    default: #default,
                    required: #required,
                };
                if let ::core::option::Option::Some((__key, __raw)) =
                    ::envbind::binder::resolve(__source, prefix, &__field)?
                {
                    ::envbind::binder::apply(&mut self.#ident, &__key, &__raw, &__field, #coerce)?;
                }
            }
        })
    });

    let expanded = quote! {
        impl ::envbind::Bind for #struct_name {
            fn bind_from(
                &mut self,
                prefix: &str,
                __source: &dyn ::envbind::EnvSource,
            ) -> ::core::result::Result<(), ::envbind::BindError> {
                ::envbind::binder::check_prefix(prefix)?;
                #(#bindings)*
                ::core::result::Result::Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
