//! Declarative environment variable binding
//!
//! `envbind` populates the fields of a plain struct from process environment
//! variables, driven by per-field `#[env(...)]` annotations for naming,
//! aliasing, defaults and requiredness. It targets the usual
//! "load config once at startup" pattern of services and CLIs.
//!
//! # Features
//!
//! - **Declarative**: automatic implementation with `#[derive(Bind)]`
//! - **Prefixed keys**: `bind("APP", ..)` reads `APP_PORT` for a `port` field
//! - **Aliases**: `#[env(alias = "REDIS_URL")]` for legacy or shared variables
//! - **Defaults and required fields**: `#[env(default = "8080")]`,
//!   `#[env(require)]`
//! - **Rich coercion**: integers of every width (with `0x`/`0o`/`0b`
//!   prefixes), floats, booleans, durations ("2m", "500ms"), RFC-3339
//!   timestamps, `Option<T>`, `Vec<T>` and `HashMap`/`BTreeMap` fields
//! - **Custom parsing**: implement [`SetFromStr`] or [`UnmarshalText`] on
//!   your own types to take over coercion for them
//! - **Testable**: bind against an in-memory [`MapSource`] instead of the
//!   live process environment
//!
//! # Example
//!
//! ```rust
//! use envbind::Bind;
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     pub database_url: String,
//!
//!     #[env(default = "8080")]
//!     pub port: u16,
//!
//!     #[env(default = "false")]
//!     pub debug: bool,
//! }
//!
//! # fn main() -> Result<(), envbind::BindError> {
//! #     std::env::set_var("APP_DATABASE_URL", "postgres://localhost/db");
//! #     let mut config = Config::default();
//! #     envbind::bind("APP", &mut config)?;
//! #     assert_eq!(config.database_url, "postgres://localhost/db");
//! #     assert_eq!(config.port, 8080);
//! #     Ok(())
//! # }
//! ```
//!
//! # Value resolution
//!
//! For a field `name` bound with prefix `APP`, in order:
//!
//! 1. The computed key `APP_NAME` (alias substitutes the name portion).
//! 2. The literal alias, if one is annotated.
//! 3. The `default` literal, coerced by the same rules as a real value.
//! 4. Otherwise the field is left untouched, unless it is `require`d, in
//!    which case the bind fails with [`BindError::MissingRequired`].
//!
//! A variable that is set to the empty string is a present value: it
//! overrides defaults and satisfies `require`.
//!
//! Binding mutates the target in place, field by field, and stops at the
//! first error. Fields bound before the failure keep their new values, so a
//! failed bind leaves the configuration indeterminate and must not be used.
//!
//! # Attributes
//!
//! ## `#[env(alias = "NAME")]`
//!
//! Use `NAME` instead of the field name in the computed key, and retry the
//! literal `NAME` when the computed key is unset.
//!
//! ```rust
//! # use envbind::Bind;
//! #[derive(Debug, Default, Bind)]
//! pub struct Config {
//!     // Reads APP_REDIS_URL first, then REDIS_URL
//!     #[env(alias = "REDIS_URL")]
//!     pub cache_url: String,
//! }
//! # fn main() -> Result<(), envbind::BindError> {
//! #     std::env::set_var("REDIS_URL", "redis://localhost");
//! #     std::env::remove_var("APP_REDIS_URL");
//! #     let mut config = Config::default();
//! #     envbind::bind("APP", &mut config)?;
//! #     assert_eq!(config.cache_url, "redis://localhost");
//! #     Ok(())
//! # }
//! ```
//!
//! ## `#[env(default = "literal")]`
//!
//! Fallback literal used when neither the key nor the alias is set. The
//! literal goes through the same coercion as an environment value.
//!
//! ```rust
//! # use envbind::Bind;
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     #[env(default = "127.0.0.1:8080")]
//!     pub listen_addr: String,
//!
//!     #[env(default = "30s")]
//!     pub shutdown_grace: Duration,
//! }
//! # fn main() -> Result<(), envbind::BindError> {
//! #     std::env::remove_var("APP_LISTEN_ADDR");
//! #     std::env::remove_var("APP_SHUTDOWN_GRACE");
//! #     let mut config = Config::default();
//! #     envbind::bind("APP", &mut config)?;
//! #     assert_eq!(config.listen_addr, "127.0.0.1:8080");
//! #     assert_eq!(config.shutdown_grace, Duration::from_secs(30));
//! #     Ok(())
//! # }
//! ```
//!
//! ## `#[env(require)]`
//!
//! Fail the bind when the field has neither an environment value nor a
//! default. `require` combined with `default` never fails.
//!
//! ## `#[env(ignore)]`
//!
//! Skip the field entirely: it is never looked up, never mutated, and never
//! required.
//!
//! # Custom parsing
//!
//! The coercion engine checks two capabilities, in order, before its
//! built-in rules: [`SetFromStr`], then [`UnmarshalText`]. Either one takes
//! over coercion for the implementing type everywhere it appears, including
//! as an `Option`, `Vec` or map element.
//!
//! ```rust
//! use envbind::{Bind, SetFromStr};
//!
//! #[derive(Debug, Default)]
//! struct HostList(Vec<String>);
//!
//! impl SetFromStr for HostList {
//!     fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
//!         self.0 = raw.split(';').map(str::to_string).collect();
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Debug, Default, Bind)]
//! struct Config {
//!     pub hosts: HostList,
//! }
//! # fn main() -> Result<(), envbind::BindError> {
//! #     std::env::set_var("APP_HOSTS", "a;b;c");
//! #     let mut config = Config::default();
//! #     envbind::bind("APP", &mut config)?;
//! #     assert_eq!(config.hosts.0, vec!["a", "b", "c"]);
//! #     Ok(())
//! # }
//! ```

#[doc(hidden)]
pub mod binder;
#[doc(hidden)]
pub mod coerce;
#[doc(hidden)]
pub mod dispatch;

mod error;
mod source;
mod value;

pub use binder::Bind;
pub use envbind_derive::Bind;
pub use error::{BindError, CoerceError};
pub use source::{EnvSource, MapSource, ProcessEnv};
pub use value::{EnvValue, SetFromStr, UnmarshalText};

// Re-export for capability implementations and macro-generated code
#[doc(hidden)]
pub use anyhow;

/// Bind `target`'s fields from the process environment.
///
/// `prefix` must be non-empty; it is uppercased and joined to each field's
/// key with `_`.
///
/// # Errors
///
/// - The prefix is empty
/// - A `require`d field has neither a value nor a default
/// - A resolved value cannot be coerced into its field's type
pub fn bind<T: Bind>(prefix: &str, target: &mut T) -> Result<(), BindError> {
    target.bind_from(prefix, &ProcessEnv)
}

/// Bind `target`'s fields from an explicit [`EnvSource`].
///
/// Same contract as [`bind`], with the environment injected, typically a
/// [`MapSource`] in tests.
pub fn bind_with<T: Bind>(
    prefix: &str,
    target: &mut T,
    source: &dyn EnvSource,
) -> Result<(), BindError> {
    target.bind_from(prefix, source)
}
