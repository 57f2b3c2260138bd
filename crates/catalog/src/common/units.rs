//! Byte-size and frequency quantities.
//!
//! Simulator configuration scripts write quantities as strings such as `"32kB"`, `"1MB"`,
//! or `"1.5GHz"`. This module stores them as exact integers and converts both ways:
//! 1. **Sizes:** Binary multiples (`kB` = 1024 bytes), integers only.
//! 2. **Frequencies:** Decimal multiples of hertz; fractional mantissas are allowed as long
//!    as the result is a whole number of hertz.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to parse a quantity string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitParseError {
    /// The input was empty or whitespace.
    #[error("empty quantity")]
    Empty,
    /// The numeric part could not be read.
    #[error("invalid number in quantity `{0}`")]
    InvalidNumber(String),
    /// The suffix is not a recognised unit.
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
    /// The quantity does not fit in 64 bits.
    #[error("quantity `{0}` overflows")]
    Overflow(String),
    /// The quantity is not a whole number of base units.
    #[error("quantity `{0}` is not a whole number of base units")]
    Inexact(String),
}

/// Splits `"1.5GHz"` into `("1.5", "GHz")`.
fn split_quantity(s: &str) -> Result<(&str, &str), UnitParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(UnitParseError::Empty);
    }
    let idx = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(idx);
    if number.is_empty() {
        return Err(UnitParseError::InvalidNumber(s.to_string()));
    }
    Ok((number, unit.trim()))
}

/// Parses a decimal mantissa and scales it by `multiplier`, requiring an exact result.
fn scale_decimal(raw: &str, number: &str, multiplier: u128) -> Result<u64, UnitParseError> {
    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(UnitParseError::InvalidNumber(raw.to_string()));
    }
    if frac_part.len() > 18 {
        return Err(UnitParseError::Inexact(raw.to_string()));
    }
    let overflow = || UnitParseError::Overflow(raw.to_string());

    let mut mantissa: u128 = 0;
    for c in int_part.chars().chain(frac_part.chars()) {
        mantissa = mantissa
            .checked_mul(10)
            .and_then(|m| m.checked_add(u128::from(c as u8 - b'0')))
            .ok_or_else(overflow)?;
    }
    let divisor = 10u128.pow(frac_part.len() as u32);
    let scaled = mantissa.checked_mul(multiplier).ok_or_else(overflow)?;
    if scaled % divisor != 0 {
        return Err(UnitParseError::Inexact(raw.to_string()));
    }
    u64::try_from(scaled / divisor).map_err(|_| overflow())
}

/// A memory or cache size in bytes.
///
/// Parsed from and displayed in simulator notation, where every prefix is binary:
///
/// ```
/// use uarch_catalog::common::ByteSize;
///
/// let l2: ByteSize = "1MB".parse().unwrap();
/// assert_eq!(l2.bytes(), 1024 * 1024);
/// assert_eq!(ByteSize::kib(32).to_string(), "32kB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ByteSize(u64);

impl ByteSize {
    /// Binary units from largest to smallest, with their display suffix.
    const UNITS: [(u64, &'static str); 4] = [
        (1 << 40, "TB"),
        (1 << 30, "GB"),
        (1 << 20, "MB"),
        (1 << 10, "kB"),
    ];

    /// Creates a size of exactly `bytes` bytes.
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Creates a size of `n` KiB.
    pub const fn kib(n: u64) -> Self {
        Self(n << 10)
    }

    /// Creates a size of `n` MiB.
    pub const fn mib(n: u64) -> Self {
        Self(n << 20)
    }

    /// Creates a size of `n` GiB.
    pub const fn gib(n: u64) -> Self {
        Self(n << 30)
    }

    /// Returns the size in bytes.
    pub const fn bytes(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, suffix) in Self::UNITS {
            if self.0 >= unit && self.0 % unit == 0 {
                return write!(f, "{}{}", self.0 / unit, suffix);
            }
        }
        write!(f, "{}B", self.0)
    }
}

impl FromStr for ByteSize {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, unit) = split_quantity(s)?;
        if number.contains('.') {
            return Err(UnitParseError::Inexact(s.trim().to_string()));
        }
        let multiplier: u128 = match unit {
            "" | "B" => 1,
            "k" | "kB" | "KB" | "KiB" => 1 << 10,
            "M" | "MB" | "MiB" => 1 << 20,
            "G" | "GB" | "GiB" => 1 << 30,
            "T" | "TB" | "TiB" => 1 << 40,
            other => return Err(UnitParseError::UnknownUnit(other.to_string())),
        };
        scale_decimal(s.trim(), number, multiplier).map(Self)
    }
}

impl TryFrom<String> for ByteSize {
    type Error = UnitParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ByteSize> for String {
    fn from(value: ByteSize) -> Self {
        value.to_string()
    }
}

/// A clock frequency in hertz.
///
/// ```
/// use uarch_catalog::common::Frequency;
///
/// let clk: Frequency = "1.5GHz".parse().unwrap();
/// assert_eq!(clk.hz(), 1_500_000_000);
/// assert_eq!(clk.to_string(), "1.5GHz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Frequency(u64);

impl Frequency {
    const UNITS: [(u64, &'static str); 3] = [
        (1_000_000_000, "GHz"),
        (1_000_000, "MHz"),
        (1_000, "kHz"),
    ];

    /// Creates a frequency of `hz` hertz.
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Creates a frequency of `n` MHz.
    pub const fn mhz(n: u64) -> Self {
        Self(n * 1_000_000)
    }

    /// Creates a frequency of `n` GHz.
    pub const fn ghz(n: u64) -> Self {
        Self(n * 1_000_000_000)
    }

    /// Returns the frequency in hertz.
    pub const fn hz(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, suffix) in Self::UNITS {
            if self.0 >= unit {
                let whole = self.0 / unit;
                let rem = self.0 % unit;
                if rem == 0 {
                    return write!(f, "{whole}{suffix}");
                }
                let width = unit.ilog10() as usize;
                let frac = format!("{rem:0width$}");
                return write!(f, "{whole}.{}{suffix}", frac.trim_end_matches('0'));
            }
        }
        write!(f, "{}Hz", self.0)
    }
}

impl FromStr for Frequency {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, unit) = split_quantity(s)?;
        let multiplier: u128 = match unit.to_ascii_lowercase().as_str() {
            "" | "hz" => 1,
            "khz" => 1_000,
            "mhz" => 1_000_000,
            "ghz" => 1_000_000_000,
            _ => return Err(UnitParseError::UnknownUnit(unit.to_string())),
        };
        scale_decimal(s.trim(), number, multiplier).map(Self)
    }
}

impl TryFrom<String> for Frequency {
    type Error = UnitParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.to_string()
    }
}
