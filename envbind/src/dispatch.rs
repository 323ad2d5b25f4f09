//! Capability selection for macro-generated code
//!
//! Generated bind impls coerce each leaf field through
//! `(&&&Probe::<T>::new()).via().apply(..)`. Method resolution walks the
//! reference chain outermost-first, so the probe picks [`SetFromStr`] when
//! the type has it, falls back to [`UnmarshalText`], and only then uses the
//! built-in [`EnvValue`] rules. The choice is made per concrete type at
//! compile time, at every nesting depth the derive recurses into.

use std::marker::PhantomData;

use crate::value::{EnvValue, SetFromStr, UnmarshalText};

/// Zero-sized anchor for capability selection on `T`.
#[doc(hidden)]
pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Probe(PhantomData)
    }
}

/// First tier: the self-deserializing capability.
#[doc(hidden)]
pub trait BySetFromStr {
    fn via(&self) -> SetFromStrTier {
        SetFromStrTier
    }
}

impl<T: SetFromStr> BySetFromStr for &&Probe<T> {}

/// Second tier: the text-deserializing capability.
#[doc(hidden)]
pub trait ByUnmarshalText {
    fn via(&self) -> UnmarshalTextTier {
        UnmarshalTextTier
    }
}

impl<T: UnmarshalText> ByUnmarshalText for &Probe<T> {}

/// Last tier: built-in coercion.
#[doc(hidden)]
pub trait ByEnvValue {
    fn via(&self) -> EnvValueTier {
        EnvValueTier
    }
}

impl<T: EnvValue> ByEnvValue for Probe<T> {}

#[doc(hidden)]
pub struct SetFromStrTier;

impl SetFromStrTier {
    pub fn apply<T: SetFromStr>(self, value: &mut T, raw: &str) -> anyhow::Result<()> {
        value.set_from_str(raw)
    }
}

#[doc(hidden)]
pub struct UnmarshalTextTier;

impl UnmarshalTextTier {
    pub fn apply<T: UnmarshalText>(self, value: &mut T, raw: &str) -> anyhow::Result<()> {
        value.unmarshal_text(raw.as_bytes())
    }
}

#[doc(hidden)]
pub struct EnvValueTier;

impl EnvValueTier {
    pub fn apply<T: EnvValue>(self, value: &mut T, raw: &str) -> anyhow::Result<()> {
        value.assign(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SetterOnly(String);

    impl SetFromStr for SetterOnly {
        fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
            self.0 = format!("set:{raw}");
            Ok(())
        }
    }

    #[derive(Default)]
    struct TextOnly(String);

    impl UnmarshalText for TextOnly {
        fn unmarshal_text(&mut self, text: &[u8]) -> anyhow::Result<()> {
            self.0 = format!("text:{}", std::str::from_utf8(text)?);
            Ok(())
        }
    }

    #[derive(Default)]
    struct All(String);

    impl SetFromStr for All {
        fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
            self.0 = format!("set:{raw}");
            Ok(())
        }
    }

    impl UnmarshalText for All {
        fn unmarshal_text(&mut self, text: &[u8]) -> anyhow::Result<()> {
            self.0 = format!("text:{}", std::str::from_utf8(text)?);
            Ok(())
        }
    }

    impl EnvValue for All {
        fn assign(&mut self, raw: &str) -> anyhow::Result<()> {
            self.0 = format!("builtin:{raw}");
            Ok(())
        }
    }

    #[test]
    fn test_tiers_apply() {
        let mut setter = SetterOnly::default();
        SetFromStrTier.apply(&mut setter, "x").unwrap();
        assert_eq!(setter.0, "set:x");

        let mut text = TextOnly::default();
        UnmarshalTextTier.apply(&mut text, "x").unwrap();
        assert_eq!(text.0, "text:x");

        let mut plain = 0u16;
        EnvValueTier.apply(&mut plain, "42").unwrap();
        assert_eq!(plain, 42);
    }

    #[test]
    fn test_autoref_prefers_set_from_str() {
        use super::{ByEnvValue as _, BySetFromStr as _, ByUnmarshalText as _};

        let mut all = All::default();
        (&&&Probe::<All>::new()).via().apply(&mut all, "x").unwrap();
        assert_eq!(all.0, "set:x");

        let mut text = TextOnly::default();
        (&&&Probe::<TextOnly>::new())
            .via()
            .apply(&mut text, "x")
            .unwrap();
        assert_eq!(text.0, "text:x");

        let mut plain = 0u16;
        (&&&Probe::<u16>::new())
            .via()
            .apply(&mut plain, "42")
            .unwrap();
        assert_eq!(plain, 42);
    }

    #[test]
    fn test_setter_only_still_dispatches() {
        use super::{ByEnvValue as _, BySetFromStr as _, ByUnmarshalText as _};

        let mut setter = SetterOnly::default();
        (&&&Probe::<SetterOnly>::new())
            .via()
            .apply(&mut setter, "x")
            .unwrap();
        assert_eq!(setter.0, "set:x");
    }
}
