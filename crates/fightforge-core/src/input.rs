//! Lenient numeric input coercion.
//!
//! Budgets and modifiers come from interactive form fields. Anything that
//! does not parse becomes `0` instead of an error: [`lenient_int`] reads the
//! longest leading integer, [`lenient_float`] the longest leading decimal
//! number, both after optional leading whitespace.
//!
//! The `deserialize_*` functions apply the same rules to serde input, where a
//! field may arrive as a number, a numeric string, `null`, or not at all.
//! Arrays and objects in a scalar field are skipped and read as 0 (or
//! `false` for flags).

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

/// Parses the leading integer of `s`, or returns 0.
///
/// # Examples
///
/// ```
/// use fightforge_core::lenient_int;
///
/// assert_eq!(lenient_int("42"), 42);
/// assert_eq!(lenient_int("  17 points"), 17);
/// assert_eq!(lenient_int("-3"), -3);
/// assert_eq!(lenient_int("12.9"), 12);
/// assert_eq!(lenient_int(""), 0);
/// assert_eq!(lenient_int("abc"), 0);
/// ```
pub fn lenient_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = split_sign(s);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as i64));
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Parses the leading decimal number of `s`, or returns 0.
///
/// Non-finite results also become 0.
///
/// # Examples
///
/// ```
/// use fightforge_core::lenient_float;
///
/// assert_eq!(lenient_float("0.25"), 0.25);
/// assert_eq!(lenient_float(".5x"), 0.5);
/// assert_eq!(lenient_float("1e2"), 100.0);
/// assert_eq!(lenient_float("-"), 0.0);
/// assert_eq!(lenient_float("1e999"), 0.0);
/// ```
pub fn lenient_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    finite_or_zero(s[..end].parse().unwrap_or(0.0))
}

/// Maps NaN and infinities to 0.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn drain_seq<'de, A: SeqAccess<'de>>(mut seq: A) -> Result<(), A::Error> {
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(())
}

fn drain_map<'de, A: MapAccess<'de>>(mut map: A) -> Result<(), A::Error> {
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
    Ok(())
}

struct LenientF64;

impl<'de> Visitor<'de> for LenientF64 {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string, or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(finite_or_zero(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(lenient_float(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_none<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<f64, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<f64, A::Error> {
        drain_seq(seq)?;
        Ok(0.0)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<f64, A::Error> {
        drain_map(map)?;
        Ok(0.0)
    }
}

/// Deserializes an `f64` leniently (see module docs).
pub fn deserialize_lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    d.deserialize_any(LenientF64)
}

/// Deserializes a non-negative integer leniently.
///
/// Fractions are truncated, negative values become 0.
pub fn deserialize_lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    struct LenientU32;

    impl<'de> Visitor<'de> for LenientU32 {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer, a numeric string, or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            Ok(clamp_u32(finite_or_zero(v).trunc() as i64))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            Ok(clamp_u32(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            Ok(v.min(u32::MAX as u64) as u32)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            Ok(clamp_u32(lenient_int(v)))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<u32, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<u32, A::Error> {
            drain_seq(seq)?;
            Ok(0)
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<u32, A::Error> {
            drain_map(map)?;
            Ok(0)
        }
    }

    d.deserialize_any(LenientU32)
}

/// Deserializes a flag leniently.
///
/// `true`, `1` and the strings `"true"` and `"1"` (case-insensitive,
/// surrounding whitespace ignored) are set; anything else is unset.
pub fn deserialize_lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    struct LenientBool;

    impl<'de> Visitor<'de> for LenientBool {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, a boolean string, or null")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v == 1)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v == 1)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v == 1.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            let v = v.trim();
            Ok(v.eq_ignore_ascii_case("true") || v == "1")
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<bool, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<bool, A::Error> {
            drain_seq(seq)?;
            Ok(false)
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<bool, A::Error> {
            drain_map(map)?;
            Ok(false)
        }
    }

    d.deserialize_any(LenientBool)
}

/// Clamps a parsed integer into `0..=u32::MAX`.
#[inline]
pub fn clamp_u32(v: i64) -> u32 {
    v.clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "deserialize_lenient_u32")]
        budget: u32,
        #[serde(default, deserialize_with = "deserialize_lenient_f64")]
        bonus: f64,
        #[serde(default, deserialize_with = "deserialize_lenient_bool")]
        flag: bool,
    }

    #[test]
    fn test_lenient_int_prefix() {
        assert_eq!(lenient_int("55sp"), 55);
        assert_eq!(lenient_int("+8"), 8);
        assert_eq!(lenient_int("- 8"), 0);
        assert_eq!(lenient_int("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_lenient_float_forms() {
        assert_eq!(lenient_float("  3.5kg"), 3.5);
        assert_eq!(lenient_float("-0.25"), -0.25);
        assert_eq!(lenient_float("7."), 7.0);
        assert_eq!(lenient_float("2e"), 2.0);
        assert_eq!(lenient_float("."), 0.0);
        assert_eq!(lenient_float("NaN"), 0.0);
    }

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let form: Form = serde_json::from_str(r#"{"budget": "120", "bonus": "0.05"}"#).unwrap();
        assert_eq!(form.budget, 120);
        assert_eq!(form.bonus, 0.05);

        let form: Form = serde_json::from_str(r#"{"budget": 33.9, "bonus": 4}"#).unwrap();
        assert_eq!(form.budget, 33);
        assert_eq!(form.bonus, 4.0);
    }

    #[test]
    fn test_deserialize_missing_and_garbage() {
        let form: Form = serde_json::from_str(r#"{"budget": null, "bonus": "n/a"}"#).unwrap();
        assert_eq!(form.budget, 0);
        assert_eq!(form.bonus, 0.0);

        let form: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(form.budget, 0);

        let form: Form = serde_json::from_str(r#"{"budget": -12}"#).unwrap();
        assert_eq!(form.budget, 0);
    }

    #[test]
    fn test_deserialize_arrays_and_objects_become_zero() {
        let form: Form =
            serde_json::from_str(r#"{"budget": [1, [2]], "bonus": {"a": [1]}, "flag": [true]}"#)
                .unwrap();
        assert_eq!(form.budget, 0);
        assert_eq!(form.bonus, 0.0);
        assert!(!form.flag);

        let body = r#"{"budget": {}, "bonus": [], "flag": {}}"#;
        let form: Form = serde_json::from_str(body).unwrap();
        assert_eq!(form.budget, 0);
        assert_eq!(form.bonus, 0.0);
        assert!(!form.flag);
    }

    #[test]
    fn test_deserialize_flags() {
        for (body, expected) in [
            (r#"{"flag": true}"#, true),
            (r#"{"flag": "true"}"#, true),
            (r#"{"flag": " TRUE "}"#, true),
            (r#"{"flag": "1"}"#, true),
            (r#"{"flag": 1}"#, true),
            (r#"{"flag": "yes"}"#, false),
            (r#"{"flag": "false"}"#, false),
            (r#"{"flag": 0}"#, false),
            (r#"{"flag": null}"#, false),
            (r#"{}"#, false),
        ] {
            let form: Form = serde_json::from_str(body).unwrap();
            assert_eq!(form.flag, expected, "{}", body);
        }
    }
}
