//! Built-in scalar coercion and the two custom-parsing capabilities
//!
//! The coercion engine tries [`SetFromStr`], then [`UnmarshalText`], then
//! the built-in [`EnvValue`] rules (see `dispatch`). Implement either
//! capability on your own type to take over parsing for it everywhere it
//! appears, including inside `Option`, `Vec` and map fields.

use std::borrow::Cow;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::CoerceError;

/// Self-deserializing capability.
///
/// Checked before everything else, including the built-in rules. Any type
/// that can update itself from a raw string may implement this.
///
/// ```rust
/// use envbind::SetFromStr;
///
/// #[derive(Debug, Default)]
/// struct Bracketed(String);
///
/// impl SetFromStr for Bracketed {
///     fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()> {
///         self.0 = format!("[{raw}]");
///         Ok(())
///     }
/// }
/// ```
pub trait SetFromStr {
    /// Replace `self` with the value parsed from `raw`.
    fn set_from_str(&mut self, raw: &str) -> anyhow::Result<()>;
}

/// Text-deserializing capability.
///
/// Checked after [`SetFromStr`] and before the built-in rules. The crate
/// implements it for `chrono` timestamps (RFC-3339).
pub trait UnmarshalText {
    /// Replace `self` with the value parsed from `text`.
    fn unmarshal_text(&mut self, text: &[u8]) -> anyhow::Result<()>;
}

/// Built-in coercion fallback for leaf types.
pub trait EnvValue {
    /// Replace `self` with the value parsed from `raw`.
    fn assign(&mut self, raw: &str) -> anyhow::Result<()>;
}

impl EnvValue for String {
    fn assign(&mut self, raw: &str) -> anyhow::Result<()> {
        *self = raw.to_string();
        Ok(())
    }
}

/// Split a raw integer string into digits and radix, honoring an optional
/// sign followed by a `0x`/`0o`/`0b` base prefix.
fn radix_of(raw: &str) -> (Cow<'_, str>, u32) {
    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => ("+", &raw[1..]),
        Some(b'-') => ("-", &raw[1..]),
        _ => ("", raw),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        Some("0o") | Some("0O") => (8, &rest[2..]),
        Some("0b") | Some("0B") => (2, &rest[2..]),
        _ => (10, rest),
    };
    if radix == 10 {
        (Cow::Borrowed(raw), 10)
    } else if sign.is_empty() {
        (Cow::Borrowed(digits), radix)
    } else {
        (Cow::Owned(format!("{sign}{digits}")), radix)
    }
}

macro_rules! int_env_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn assign(&mut self, raw: &str) -> anyhow::Result<()> {
                    let (digits, radix) = radix_of(raw);
                    *self = <$ty>::from_str_radix(&digits, radix)?;
                    Ok(())
                }
            }
        )*
    };
}

// A leading minus on the unsigned widths fails inside from_str_radix rather
// than wrapping.
int_env_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_env_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn assign(&mut self, raw: &str) -> anyhow::Result<()> {
                    *self = raw.parse::<$ty>()?;
                    Ok(())
                }
            }
        )*
    };
}

float_env_value!(f32, f64);

/// The boolean literal set: `1/t/T/true/TRUE/True` and their false
/// counterparts.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

impl EnvValue for bool {
    fn assign(&mut self, raw: &str) -> anyhow::Result<()> {
        *self = parse_bool(raw).ok_or_else(|| CoerceError::InvalidBool {
            value: raw.to_string(),
        })?;
        Ok(())
    }
}

/// Parse a duration string such as "300ms", "2m" or "1h30m".
///
/// Terms are a decimal number followed by one of `ns`, `us`, `µs`, `ms`,
/// `s`, `m`, `h`, and concatenate additively. The bare literal "0" is
/// allowed without a unit; negative durations are rejected.
pub(crate) fn parse_duration(raw: &str) -> Result<Duration, CoerceError> {
    let invalid = || CoerceError::InvalidDuration {
        value: raw.to_string(),
    };

    let mut rest = raw.strip_prefix('+').unwrap_or(raw);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() || rest.starts_with('-') {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let value: f64 = number.parse().map_err(|_| invalid())?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        let scale = match unit {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return Err(invalid()),
        };

        total += Duration::try_from_secs_f64(value * scale).map_err(|_| invalid())?;
        rest = tail;
    }
    Ok(total)
}

impl EnvValue for Duration {
    fn assign(&mut self, raw: &str) -> anyhow::Result<()> {
        *self = parse_duration(raw)?;
        Ok(())
    }
}

// Timestamps take the same route a caller-defined type would: the text
// capability, checked ahead of the built-in rules.
impl UnmarshalText for DateTime<Utc> {
    fn unmarshal_text(&mut self, text: &[u8]) -> anyhow::Result<()> {
        let raw = std::str::from_utf8(text)?;
        *self = DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc);
        Ok(())
    }
}

impl UnmarshalText for DateTime<FixedOffset> {
    fn unmarshal_text(&mut self, text: &[u8]) -> anyhow::Result<()> {
        let raw = std::str::from_utf8(text)?;
        *self = DateTime::parse_from_rfc3339(raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assign<T: EnvValue + Default>(raw: &str) -> anyhow::Result<T> {
        let mut value = T::default();
        value.assign(raw)?;
        Ok(value)
    }

    #[test]
    fn test_string_verbatim() {
        let value: String = assign("hello world").unwrap();
        assert_eq!(value, "hello world");
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(assign::<i32>("8080").unwrap(), 8080);
        assert_eq!(assign::<i32>("-42").unwrap(), -42);
        assert_eq!(assign::<i64>("0x1A").unwrap(), 26);
        assert_eq!(assign::<i64>("-0x1A").unwrap(), -26);
        assert_eq!(assign::<i16>("0o17").unwrap(), 15);
        assert_eq!(assign::<i8>("0b101").unwrap(), 5);
    }

    #[test]
    fn test_signed_overflow_fails() {
        assert!(assign::<i8>("300").is_err());
    }

    #[test]
    fn test_unsigned_rejects_minus() {
        assert!(assign::<u32>("-30").is_err());
        assert_eq!(assign::<u32>("30").unwrap(), 30);
    }

    #[test]
    fn test_bool_literals() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert!(assign::<bool>(raw).unwrap(), "{raw}");
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert!(!assign::<bool>(raw).unwrap(), "{raw}");
        }
        assert!(assign::<bool>("yes").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(assign::<f32>("0.5").unwrap(), 0.5);
        assert_eq!(assign::<f64>("-1.25e2").unwrap(), -125.0);
        assert!(assign::<f32>("string").is_err());
    }

    #[test]
    fn test_duration_terms() {
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(
            parse_duration("1h30m").unwrap(),
            Duration::from_secs(90 * 60)
        );
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("750us").unwrap(), Duration::from_micros(750));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_duration_rejects_garbage() {
        for raw in ["bogus", "", "10", "2x", "-5s", "m"] {
            assert!(parse_duration(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let mut value = DateTime::<Utc>::default();
        value.unmarshal_text(b"2016-08-16T18:57:05Z").unwrap();
        assert_eq!(value, Utc.with_ymd_and_hms(2016, 8, 16, 18, 57, 5).unwrap());
    }

    #[test]
    fn test_timestamp_offset_preserved() {
        let mut value = DateTime::<FixedOffset>::default();
        value.unmarshal_text(b"2016-08-16T18:57:05+09:00").unwrap();
        assert_eq!(value.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        let mut value = DateTime::<Utc>::default();
        assert!(value.unmarshal_text(b"yesterday").is_err());
    }
}
