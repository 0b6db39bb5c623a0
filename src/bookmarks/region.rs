use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A bookmarked genomic interval.
///
/// Coordinates are kept as `f64` because imported text is coerced the way a
/// JavaScript `Number()` call would, so values may be fractional, reversed or
/// NaN. No validation happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    pub assembly_name: String,
    pub ref_name: String,
    #[serde(with = "coord", default = "coord::missing")]
    pub start: f64,
    #[serde(with = "coord", default = "coord::missing")]
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RegionRecord {
    pub fn new(
        assembly_name: impl Into<String>,
        ref_name: impl Into<String>,
        start: f64,
        end: f64,
        label: Option<String>,
    ) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            ref_name: ref_name.into(),
            start,
            end,
            label,
        }
    }

    /// 1-based display locus, e.g. `chr1:101..200`.
    pub fn loc_string(&self) -> String {
        format!(
            "{}:{}..{}",
            self.ref_name,
            JsNumber(self.start + 1.0),
            JsNumber(self.end)
        )
    }

    /// Coordinate-wise equality that treats two NaNs as equal.
    pub fn same_as(&self, other: &RegionRecord) -> bool {
        let same = |a: f64, b: f64| a == b || (a.is_nan() && b.is_nan());
        self.assembly_name == other.assembly_name
            && self.ref_name == other.ref_name
            && same(self.start, other.start)
            && same(self.end, other.end)
            && self.label == other.label
    }
}

/// Formats a number the way JavaScript string interpolation does.
pub struct JsNumber(pub f64);

impl fmt::Display for JsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            write!(f, "NaN")
        } else if value.is_infinite() {
            write!(f, "{}Infinity", if value < 0.0 { "-" } else { "" })
        } else if value == 0.0 {
            write!(f, "0")
        } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
            let exponential = format!("{:e}", value);
            match exponential.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, exponent)
                }
                _ => write!(f, "{}", exponential),
            }
        } else {
            write!(f, "{}", value)
        }
    }
}

/// JavaScript `Number(text)` coercion. A missing field is NaN, blank text
/// is 0, anything that is not a numeric literal is NaN.
pub fn coerce_number(field: Option<&str>) -> f64 {
    let text = match field {
        Some(text) => text.trim(),
        None => return f64::NAN,
    };
    if text.is_empty() {
        return 0.0;
    }

    // Accumulated as f64 so literals wider than 64 bits stay finite.
    let radix_literal = |prefix: [&str; 2], radix: u32| {
        prefix
            .iter()
            .find_map(|p| text.strip_prefix(p))
            .map(|digits| {
                if digits.is_empty() {
                    return f64::NAN;
                }
                digits
                    .chars()
                    .try_fold(0.0, |acc, c| {
                        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
                    })
                    .unwrap_or(f64::NAN)
            })
    };
    if let Some(value) = radix_literal(["0x", "0X"], 16)
        .or_else(|| radix_literal(["0o", "0O"], 8))
        .or_else(|| radix_literal(["0b", "0B"], 2))
    {
        return value;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let is_decimal_literal = text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_decimal_literal {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

mod coord {
    use super::*;

    pub fn missing() -> f64 {
        f64::NAN
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
        if !value.is_finite() {
            serializer.serialize_none()
        } else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
