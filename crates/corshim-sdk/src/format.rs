//! Numeric formatting collaborator
//!
//! Implements the origin's standard numeric format strings (`D`, `X`, `F`,
//! `N`, `E`, `G`, `P`, `R`, each with an optional precision) and its
//! canonical round-trip float text, for the invariant culture or any
//! [`NumberFormatInfo`] a caller supplies.
//!
//! Custom pattern strings (`"0.00"`, `"#,##0"`) are rejected.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{ShimError, ShimResult};

/// Default fractional digits for `F`, `N` and `P`
pub const DEFAULT_FIXED_DECIMALS: usize = 2;

/// Default mantissa digits for `E`
pub const DEFAULT_EXPONENT_DECIMALS: usize = 6;

/// Decimal exponent at which canonical double text switches to exponent form
pub const DOUBLE_PRECISION: usize = 15;

/// Decimal exponent at which canonical single text switches to exponent form
pub const SINGLE_PRECISION: usize = 7;

/// Largest precision accepted after a format specifier
pub const MAX_FORMAT_PRECISION: usize = 99;

/// Culture-specific symbols used while formatting (the format provider)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormatInfo {
    /// Sign prefix of negative numbers
    pub negative_sign: String,
    /// Sign used for positive exponents
    pub positive_sign: String,
    /// Separator between integral and fractional digits
    pub decimal_separator: String,
    /// Separator between digit groups (`N` and `P`)
    pub group_separator: String,
    /// Digits per group
    pub group_size: usize,
    /// Percent symbol (`P`)
    pub percent_symbol: String,
    /// Text for NaN
    pub nan_symbol: String,
    /// Text for positive infinity
    pub positive_infinity_symbol: String,
    /// Text for negative infinity
    pub negative_infinity_symbol: String,
}

impl NumberFormatInfo {
    /// The invariant culture
    pub fn invariant() -> Self {
        Self {
            negative_sign: "-".to_string(),
            positive_sign: "+".to_string(),
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            group_size: 3,
            percent_symbol: "%".to_string(),
            nan_symbol: "NaN".to_string(),
            positive_infinity_symbol: "Infinity".to_string(),
            negative_infinity_symbol: "-Infinity".to_string(),
        }
    }
}

impl Default for NumberFormatInfo {
    fn default() -> Self {
        Self::invariant()
    }
}

/// A primitive number handed to the formatter, tagged with its native type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberArg {
    /// Signed 8-bit
    I8(i8),
    /// Unsigned 8-bit
    U8(u8),
    /// Signed 16-bit
    I16(i16),
    /// Unsigned 16-bit
    U16(u16),
    /// Signed 32-bit
    I32(i32),
    /// Unsigned 32-bit
    U32(u32),
    /// Signed 64-bit
    I64(i64),
    /// Unsigned 64-bit
    U64(u64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
}

impl NumberArg {
    /// Integral value, `None` for floats
    pub fn integer(self) -> Option<i128> {
        match self {
            NumberArg::I8(v) => Some(v as i128),
            NumberArg::U8(v) => Some(v as i128),
            NumberArg::I16(v) => Some(v as i128),
            NumberArg::U16(v) => Some(v as i128),
            NumberArg::I32(v) => Some(v as i128),
            NumberArg::U32(v) => Some(v as i128),
            NumberArg::I64(v) => Some(v as i128),
            NumberArg::U64(v) => Some(v as i128),
            NumberArg::F32(_) | NumberArg::F64(_) => None,
        }
    }

    /// Two's-complement bits at native width, `None` for floats
    pub fn hex_bits(self) -> Option<u64> {
        match self {
            NumberArg::I8(v) => Some(v as u8 as u64),
            NumberArg::U8(v) => Some(v as u64),
            NumberArg::I16(v) => Some(v as u16 as u64),
            NumberArg::U16(v) => Some(v as u64),
            NumberArg::I32(v) => Some(v as u32 as u64),
            NumberArg::U32(v) => Some(v as u64),
            NumberArg::I64(v) => Some(v as u64),
            NumberArg::U64(v) => Some(v),
            NumberArg::F32(_) | NumberArg::F64(_) => None,
        }
    }
}

/// Number formatting / canonical text, consumed by the boxed-value core
pub trait NumberFormatter: Send + Sync {
    /// Format `value` with a standard format string
    fn format_number(
        &self,
        format: &str,
        provider: Option<&NumberFormatInfo>,
        value: NumberArg,
    ) -> ShimResult<String>;

    /// Canonical round-trippable text of a double
    fn double_to_string(&self, value: f64) -> String;

    /// Canonical round-trippable text of a single
    fn single_to_string(&self, value: f32) -> String;
}

/// Formatter implementing the origin's standard format strings
///
/// Calls without a provider use the formatter's own symbols, invariant unless
/// configured otherwise. Canonical float text is always invariant.
#[derive(Debug, Default, Clone)]
pub struct StandardFormatter {
    info: NumberFormatInfo,
}

impl StandardFormatter {
    /// Formatter whose default provider is the invariant culture
    pub fn new() -> Self {
        Self::default()
    }

    /// Formatter whose default provider is `info`
    pub fn with_info(info: NumberFormatInfo) -> Self {
        Self { info }
    }

    /// Symbols used when a call passes no provider
    pub fn info(&self) -> &NumberFormatInfo {
        &self.info
    }
}

impl NumberFormatter for StandardFormatter {
    fn format_number(
        &self,
        format: &str,
        provider: Option<&NumberFormatInfo>,
        value: NumberArg,
    ) -> ShimResult<String> {
        let info = provider.unwrap_or(&self.info);
        let (specifier, precision) = parse_format(format)?;
        format_standard(specifier, precision, info, value)
    }

    fn double_to_string(&self, value: f64) -> String {
        let info = NumberFormatInfo::invariant();
        non_finite(value, &info)
            .unwrap_or_else(|| general(DecimalDigits::from_f64(value), None, DOUBLE_PRECISION, &info))
    }

    fn single_to_string(&self, value: f32) -> String {
        let info = NumberFormatInfo::invariant();
        non_finite(value as f64, &info)
            .unwrap_or_else(|| general(DecimalDigits::from_f32(value), None, SINGLE_PRECISION, &info))
    }
}

static NUMBER_FORMATTER: OnceCell<Box<dyn NumberFormatter>> = OnceCell::new();

/// Install the process-wide number formatter; fails once one is in use
pub fn install_number_formatter(
    formatter: Box<dyn NumberFormatter>,
) -> Result<(), Box<dyn NumberFormatter>> {
    NUMBER_FORMATTER.set(formatter)
}

/// The installed number formatter, an invariant [`StandardFormatter`] if none
/// was installed
pub fn number_formatter() -> &'static dyn NumberFormatter {
    NUMBER_FORMATTER
        .get_or_init(|| Box::new(StandardFormatter::new()))
        .as_ref()
}

// ============================================================================
// Format string parsing
// ============================================================================

fn parse_format(format: &str) -> ShimResult<(char, Option<usize>)> {
    let mut chars = format.chars();
    let specifier = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => c,
        _ => return Err(custom_format(format)),
    };
    let rest = chars.as_str();
    if rest.is_empty() {
        return Ok((specifier, None));
    }
    if !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(custom_format(format));
    }
    let precision: usize = rest.parse().map_err(|_| custom_format(format))?;
    if precision > MAX_FORMAT_PRECISION {
        return Err(ShimError::Format(format!(
            "Precision {} exceeds maximum of {}",
            precision, MAX_FORMAT_PRECISION
        )));
    }
    Ok((specifier, Some(precision)))
}

fn custom_format(format: &str) -> ShimError {
    ShimError::Format(format!("Custom numeric format '{}' is not supported", format))
}

fn format_standard(
    specifier: char,
    precision: Option<usize>,
    info: &NumberFormatInfo,
    value: NumberArg,
) -> ShimResult<String> {
    match specifier.to_ascii_uppercase() {
        'D' => {
            let v = value.integer().ok_or_else(|| integral_only(specifier))?;
            let digits = v.unsigned_abs().to_string();
            let width = precision.unwrap_or(0);
            let mut out = String::new();
            if v < 0 {
                out.push_str(&info.negative_sign);
            }
            out.push_str(&format!("{:0>width$}", digits, width = width));
            return Ok(out);
        }
        'X' => {
            let bits = value.hex_bits().ok_or_else(|| integral_only(specifier))?;
            let width = precision.unwrap_or(0);
            return Ok(if specifier == 'x' {
                format!("{:0>width$x}", bits, width = width)
            } else {
                format!("{:0>width$X}", bits, width = width)
            });
        }
        'F' | 'N' | 'E' | 'G' | 'P' | 'R' => {}
        _ => {
            return Err(ShimError::Format(format!(
                "Unknown format specifier '{}'",
                specifier
            )))
        }
    }

    let (digits, threshold) = match value {
        NumberArg::F32(f) => {
            if let Some(text) = non_finite(f as f64, info) {
                return Ok(text);
            }
            (DecimalDigits::from_f32(f), SINGLE_PRECISION)
        }
        NumberArg::F64(f) => {
            if let Some(text) = non_finite(f, info) {
                return Ok(text);
            }
            (DecimalDigits::from_f64(f), DOUBLE_PRECISION)
        }
        other => (
            DecimalDigits::from_integer(other.integer().unwrap_or_default()),
            usize::MAX,
        ),
    };

    Ok(match specifier.to_ascii_uppercase() {
        'F' => fixed(digits, precision.unwrap_or(DEFAULT_FIXED_DECIMALS), false, info),
        'N' => fixed(digits, precision.unwrap_or(DEFAULT_FIXED_DECIMALS), true, info),
        'E' => scientific(
            digits,
            precision.unwrap_or(DEFAULT_EXPONENT_DECIMALS),
            if specifier == 'e' { 'e' } else { 'E' },
            info,
        ),
        'P' => {
            let mut digits = digits;
            if !digits.is_zero() {
                digits.scale += 2;
            }
            let mut text = fixed(digits, precision.unwrap_or(DEFAULT_FIXED_DECIMALS), true, info);
            text.push(' ');
            text.push_str(&info.percent_symbol);
            text
        }
        'R' => general(digits, None, threshold, info),
        _ => general(digits, precision.filter(|p| *p > 0), threshold, info),
    })
}

fn integral_only(specifier: char) -> ShimError {
    ShimError::Format(format!(
        "Format specifier '{}' is only valid for integral types",
        specifier
    ))
}

fn non_finite(value: f64, info: &NumberFormatInfo) -> Option<String> {
    if value.is_nan() {
        Some(info.nan_symbol.clone())
    } else if value == f64::INFINITY {
        Some(info.positive_infinity_symbol.clone())
    } else if value == f64::NEG_INFINITY {
        Some(info.negative_infinity_symbol.clone())
    } else {
        None
    }
}

// ============================================================================
// Decimal digit model
// ============================================================================

/// A finite number as `0.d1d2d3... × 10^scale`
///
/// `digits` never has trailing zeros; zero is the empty digit list.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DecimalDigits {
    negative: bool,
    digits: Vec<u8>,
    scale: i32,
}

impl DecimalDigits {
    fn from_integer(value: i128) -> Self {
        let text = value.unsigned_abs().to_string();
        let mut out = Self {
            negative: value < 0,
            digits: text.bytes().map(|b| b - b'0').collect(),
            scale: text.len() as i32,
        };
        out.normalize();
        out
    }

    fn from_f64(value: f64) -> Self {
        Self::from_exponent_text(&format!("{:e}", value.abs()), value.is_sign_negative())
    }

    fn from_f32(value: f32) -> Self {
        Self::from_exponent_text(&format!("{:e}", value.abs()), value.is_sign_negative())
    }

    /// Parse Rust's shortest round-trip exponent text, e.g. `1.2345e-7`
    fn from_exponent_text(text: &str, negative: bool) -> Self {
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let mut out = Self {
            negative,
            digits: mantissa
                .bytes()
                .filter(u8::is_ascii_digit)
                .map(|b| b - b'0')
                .collect(),
            scale: exponent + 1,
        };
        out.normalize();
        out
    }

    fn normalize(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        let leading = self.digits.iter().take_while(|d| **d == 0).count();
        if leading > 0 {
            self.digits.drain(..leading);
            self.scale -= leading as i32;
        }
        if self.digits.is_empty() {
            self.scale = 0;
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digit at position `index` (0 is the most significant), zero outside
    fn digit(&self, index: i32) -> u8 {
        if index < 0 {
            return 0;
        }
        self.digits.get(index as usize).copied().unwrap_or(0)
    }

    /// Keep `keep` significant digits, rounding half away from zero
    fn round_to(&mut self, keep: i32) {
        if keep < 0 {
            self.digits.clear();
            self.scale = 0;
            return;
        }
        let keep = keep as usize;
        if self.digits.len() <= keep {
            return;
        }
        let round_up = self.digits[keep] >= 5;
        self.digits.truncate(keep);
        if round_up {
            let mut i = keep;
            loop {
                if i == 0 {
                    self.digits.insert(0, 1);
                    self.scale += 1;
                    break;
                }
                i -= 1;
                if self.digits[i] == 9 {
                    self.digits[i] = 0;
                } else {
                    self.digits[i] += 1;
                    break;
                }
            }
        }
        self.normalize();
    }
}

fn push_sign(out: &mut String, digits: &DecimalDigits, info: &NumberFormatInfo) {
    if digits.negative {
        out.push_str(&info.negative_sign);
    }
}

fn group(integral: &str, info: &NumberFormatInfo) -> String {
    if info.group_size == 0 || integral.len() <= info.group_size {
        return integral.to_string();
    }
    let mut out = String::new();
    let first = integral.len() % info.group_size;
    if first > 0 {
        out.push_str(&integral[..first]);
    }
    for (i, chunk) in integral.as_bytes()[first..].chunks(info.group_size).enumerate() {
        if i > 0 || first > 0 {
            out.push_str(&info.group_separator);
        }
        out.extend(chunk.iter().map(|b| *b as char));
    }
    out
}

fn fixed(mut digits: DecimalDigits, decimals: usize, grouped: bool, info: &NumberFormatInfo) -> String {
    digits.round_to(digits.scale + decimals as i32);

    let integral: String = if digits.scale <= 0 {
        "0".to_string()
    } else {
        (0..digits.scale)
            .map(|i| (b'0' + digits.digit(i)) as char)
            .collect()
    };

    let mut out = String::new();
    push_sign(&mut out, &digits, info);
    if grouped {
        out.push_str(&group(&integral, info));
    } else {
        out.push_str(&integral);
    }
    if decimals > 0 {
        out.push_str(&info.decimal_separator);
        for k in 0..decimals as i32 {
            out.push((b'0' + digits.digit(digits.scale + k)) as char);
        }
    }
    out
}

fn push_exponent(out: &mut String, exponent: i32, min_digits: usize, info: &NumberFormatInfo) {
    if exponent < 0 {
        out.push_str(&info.negative_sign);
    } else {
        out.push_str(&info.positive_sign);
    }
    out.push_str(&format!(
        "{:0>width$}",
        exponent.unsigned_abs(),
        width = min_digits
    ));
}

fn scientific(mut digits: DecimalDigits, decimals: usize, marker: char, info: &NumberFormatInfo) -> String {
    digits.round_to(decimals as i32 + 1);
    let exponent = if digits.is_zero() { 0 } else { digits.scale - 1 };

    let mut out = String::new();
    push_sign(&mut out, &digits, info);
    out.push((b'0' + digits.digit(0)) as char);
    if decimals > 0 {
        out.push_str(&info.decimal_separator);
        for k in 1..=decimals as i32 {
            out.push((b'0' + digits.digit(k)) as char);
        }
    }
    out.push(marker);
    push_exponent(&mut out, exponent, 3, info);
    out
}

/// `G` formatting; `precision` of `None` keeps every significant digit
fn general(
    mut digits: DecimalDigits,
    precision: Option<usize>,
    threshold: usize,
    info: &NumberFormatInfo,
) -> String {
    let max_digits = match precision {
        Some(p) => {
            digits.round_to(p as i32);
            p
        }
        None => digits.digits.len().max(threshold),
    };

    let mut out = String::new();
    push_sign(&mut out, &digits, info);
    if digits.is_zero() {
        out.push('0');
        return out;
    }

    let scale = digits.scale;
    if scale < -3 || (scale > 0 && scale as usize > max_digits) {
        out.push((b'0' + digits.digit(0)) as char);
        if digits.digits.len() > 1 {
            out.push_str(&info.decimal_separator);
            out.extend(digits.digits[1..].iter().map(|d| (b'0' + d) as char));
        }
        out.push('E');
        push_exponent(&mut out, scale - 1, 2, info);
        return out;
    }

    if scale <= 0 {
        out.push('0');
    } else {
        for i in 0..scale {
            out.push((b'0' + digits.digit(i)) as char);
        }
    }
    let fractional = digits.digits.len() as i32 - scale.max(0);
    if fractional > 0 {
        out.push_str(&info.decimal_separator);
        for _ in scale..0 {
            out.push('0');
        }
        for i in scale.max(0)..digits.digits.len() as i32 {
            out.push((b'0' + digits.digit(i)) as char);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(format: &str, value: NumberArg) -> String {
        StandardFormatter::new().format_number(format, None, value).unwrap()
    }

    #[test]
    fn test_canonical_double() {
        let f = StandardFormatter::new();
        assert_eq!(f.double_to_string(0.0), "0");
        assert_eq!(f.double_to_string(-0.0), "-0");
        assert_eq!(f.double_to_string(1.5), "1.5");
        assert_eq!(f.double_to_string(-2.25), "-2.25");
        assert_eq!(f.double_to_string(0.1), "0.1");
        assert_eq!(f.double_to_string(100.0), "100");
        assert_eq!(f.double_to_string(1e14), "100000000000000");
        assert_eq!(f.double_to_string(1e15), "1E+15");
        assert_eq!(f.double_to_string(0.0001), "0.0001");
        assert_eq!(f.double_to_string(0.00001), "1E-05");
        assert_eq!(f.double_to_string(1.2345e-7), "1.2345E-07");
        assert_eq!(f.double_to_string(f64::NAN), "NaN");
        assert_eq!(f.double_to_string(f64::INFINITY), "Infinity");
        assert_eq!(f.double_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_canonical_single() {
        let f = StandardFormatter::new();
        assert_eq!(f.single_to_string(0.1), "0.1");
        assert_eq!(f.single_to_string(1234567.0), "1234567");
        assert_eq!(f.single_to_string(1e10), "1E+10");
        assert_eq!(f.single_to_string(f32::MAX), "3.4028235E+38");
    }

    #[test]
    fn test_decimal_and_hex() {
        assert_eq!(fmt("D", NumberArg::I32(42)), "42");
        assert_eq!(fmt("D5", NumberArg::I32(-42)), "-00042");
        assert_eq!(fmt("X", NumberArg::I8(-1)), "FF");
        assert_eq!(fmt("x4", NumberArg::U16(0xAB)), "00ab");
        assert_eq!(fmt("X", NumberArg::I32(-1)), "FFFFFFFF");
    }

    #[test]
    fn test_integral_specifier_on_float_fails() {
        let err = StandardFormatter::new()
            .format_number("D", None, NumberArg::F32(1.0))
            .unwrap_err();
        assert!(matches!(err, ShimError::Format(_)));
        assert!(StandardFormatter::new()
            .format_number("X", None, NumberArg::F64(1.0))
            .is_err());
    }

    #[test]
    fn test_fixed_and_number() {
        assert_eq!(fmt("F", NumberArg::F64(1.5)), "1.50");
        assert_eq!(fmt("F0", NumberArg::F64(2.5)), "3");
        assert_eq!(fmt("F3", NumberArg::I32(7)), "7.000");
        assert_eq!(fmt("F2", NumberArg::F64(0.125)), "0.13");
        assert_eq!(fmt("F2", NumberArg::F64(0.004)), "0.00");
        assert_eq!(fmt("F1", NumberArg::F64(9.96)), "10.0");
        assert_eq!(fmt("N", NumberArg::I64(1234567)), "1,234,567.00");
        assert_eq!(fmt("N1", NumberArg::F64(-1234.56)), "-1,234.6");
        assert_eq!(fmt("N0", NumberArg::I32(999)), "999");
    }

    #[test]
    fn test_exponent() {
        assert_eq!(fmt("E", NumberArg::F64(1234.5678)), "1.234568E+003");
        assert_eq!(fmt("e2", NumberArg::F64(0.000123)), "1.23e-004");
        assert_eq!(fmt("E0", NumberArg::I32(0)), "0E+000");
    }

    #[test]
    fn test_general() {
        assert_eq!(fmt("G", NumberArg::I32(12345)), "12345");
        assert_eq!(fmt("G3", NumberArg::I32(12345)), "1.23E+04");
        assert_eq!(fmt("G4", NumberArg::F64(3.14159)), "3.142");
        assert_eq!(fmt("G", NumberArg::F32(0.5)), "0.5");
        assert_eq!(fmt("R", NumberArg::F64(0.1)), "0.1");
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt("P", NumberArg::F64(0.125)), "12.50 %");
        assert_eq!(fmt("P0", NumberArg::I32(3)), "300 %");
    }

    #[test]
    fn test_non_finite_uses_provider_symbols() {
        let mut info = NumberFormatInfo::invariant();
        info.nan_symbol = "nan".to_string();
        let text = StandardFormatter::new()
            .format_number("F2", Some(&info), NumberArg::F32(f32::NAN))
            .unwrap();
        assert_eq!(text, "nan");
        assert_eq!(fmt("E", NumberArg::F64(f64::NEG_INFINITY)), "-Infinity");
    }

    #[test]
    fn test_provider_separators() {
        let info = NumberFormatInfo {
            decimal_separator: ",".to_string(),
            group_separator: ".".to_string(),
            ..NumberFormatInfo::invariant()
        };
        let text = StandardFormatter::new()
            .format_number("N2", Some(&info), NumberArg::F64(1234.5))
            .unwrap();
        assert_eq!(text, "1.234,50");
    }

    #[test]
    fn test_configured_symbols_apply_without_provider() {
        let info = NumberFormatInfo {
            decimal_separator: ",".to_string(),
            group_separator: ".".to_string(),
            ..NumberFormatInfo::invariant()
        };
        let f = StandardFormatter::with_info(info.clone());
        assert_eq!(f.info(), &info);
        assert_eq!(
            f.format_number("N2", None, NumberArg::F64(1234.5)).unwrap(),
            "1.234,50"
        );
        let invariant = NumberFormatInfo::invariant();
        assert_eq!(
            f.format_number("N2", Some(&invariant), NumberArg::F64(1234.5))
                .unwrap(),
            "1,234.50"
        );
        assert_eq!(f.double_to_string(1234.5), "1234.5");
    }

    #[test]
    fn test_rejects_custom_and_unknown_formats() {
        for format in ["0.00", "#,##0", "Q", "F1x"] {
            let err = StandardFormatter::new()
                .format_number(format, None, NumberArg::I32(1))
                .unwrap_err();
            assert!(matches!(err, ShimError::Format(_)), "{}", format);
        }
        assert!(StandardFormatter::new()
            .format_number("F100", None, NumberArg::I32(1))
            .is_err());
    }
}
