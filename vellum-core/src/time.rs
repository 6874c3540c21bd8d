//! Time periods
//!
//! Accepted forms:
//! - `<number><unit>` with optional whitespace, e.g. `5s`, `1.5 min`, `250ms`
//! - `HH:MM` or `HH:MM:SS`
//! - `never` (update intervals only)
//!
//! Periods are stored with millisecond precision. Anything finer is
//! rejected rather than rounded.

use core::fmt;
use core::str::FromStr;

use serde::{Serialize, Serializer};
use toml::Value;

use crate::error::ErrorKind;

const NANOS_PER_MILLI: u128 = 1_000_000;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Runtime sentinel meaning "never run"
pub const NEVER_MS: u32 = u32::MAX;

/// Unit suffixes and their length in nanoseconds
const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("nanoseconds", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("microseconds", 1_000),
    ("ms", 1_000_000),
    ("milliseconds", 1_000_000),
    ("s", 1_000_000_000),
    ("sec", 1_000_000_000),
    ("secs", 1_000_000_000),
    ("seconds", 1_000_000_000),
    ("min", 60_000_000_000),
    ("mins", 60_000_000_000),
    ("minutes", 60_000_000_000),
    ("h", 3_600_000_000_000),
    ("hours", 3_600_000_000_000),
    ("d", 86_400_000_000_000),
    ("days", 86_400_000_000_000),
];

/// Non-negative duration with millisecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimePeriod {
    millis: u64,
}

impl TimePeriod {
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self {
            millis: secs * MS_PER_SECOND,
        }
    }

    pub const fn as_millis(&self) -> u64 {
        self.millis
    }
}

impl fmt::Display for TimePeriod {
    /// Uses the largest unit that represents the period exactly
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.millis;
        if ms == 0 {
            return f.write_str("0ms");
        }
        let (value, unit) = if ms % MS_PER_DAY == 0 {
            (ms / MS_PER_DAY, "d")
        } else if ms % MS_PER_HOUR == 0 {
            (ms / MS_PER_HOUR, "h")
        } else if ms % MS_PER_MINUTE == 0 {
            (ms / MS_PER_MINUTE, "min")
        } else if ms % MS_PER_SECOND == 0 {
            (ms / MS_PER_SECOND, "s")
        } else {
            (ms, "ms")
        };
        write!(f, "{}{}", value, unit)
    }
}

impl FromStr for TimePeriod {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(':') {
            return parse_colon(s);
        }

        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
            .unwrap_or(s.len());
        let (number, unit) = (s[..split].trim(), s[split..].trim());

        if number.is_empty() {
            return Err(ErrorKind::InvalidTimePeriod(format!(
                "'{}' does not start with a number",
                s
            )));
        }
        if unit.is_empty() {
            return Err(ErrorKind::InvalidTimePeriod(format!(
                "'{}' has no time unit, did you mean '{}s'?",
                s, number
            )));
        }

        let unit_lower = unit.to_lowercase();
        let unit_ns = UNITS
            .iter()
            .find(|(name, _)| *name == unit_lower)
            .map(|(_, ns)| *ns)
            .ok_or_else(|| {
                ErrorKind::InvalidTimePeriod(format!("unknown time unit '{}'", unit))
            })?;

        let (negative, mantissa, scale) = parse_decimal(number).ok_or_else(|| {
            ErrorKind::InvalidTimePeriod(format!("'{}' is not a valid number", number))
        })?;
        if negative && mantissa != 0 {
            return Err(ErrorKind::InvalidTimePeriod(format!(
                "'{}' is negative",
                s
            )));
        }

        let divisor = 10u128
            .checked_pow(scale)
            .ok_or_else(|| ErrorKind::InvalidTimePeriod(format!("'{}' is out of range", s)))?;
        let total = mantissa
            .checked_mul(unit_ns)
            .ok_or_else(|| ErrorKind::InvalidTimePeriod(format!("'{}' is out of range", s)))?;
        if total % divisor != 0 {
            return Err(ErrorKind::InvalidTimePeriod(format!(
                "'{}' is more precise than one nanosecond",
                s
            )));
        }
        let nanos = total / divisor;
        if nanos % NANOS_PER_MILLI != 0 {
            return Err(ErrorKind::InvalidTimePeriod(format!(
                "maximum precision is milliseconds, got '{}'",
                s
            )));
        }

        let millis = u64::try_from(nanos / NANOS_PER_MILLI)
            .map_err(|_| ErrorKind::InvalidTimePeriod(format!("'{}' is out of range", s)))?;
        Ok(Self { millis })
    }
}

impl Serialize for TimePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `[+-]digits[.digits]` into (negative, mantissa, decimal places)
fn parse_decimal(s: &str) -> Option<(bool, u128, u32)> {
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut mantissa: u128 = 0;
    for c in int_part.chars().chain(frac_part.chars()) {
        mantissa = mantissa
            .checked_mul(10)?
            .checked_add(u128::from(c.to_digit(10)?))?;
    }
    Some((negative, mantissa, u32::try_from(frac_part.len()).ok()?))
}

/// Parse `HH:MM` or `HH:MM:SS`
fn parse_colon(s: &str) -> Result<TimePeriod, ErrorKind> {
    let invalid = || ErrorKind::InvalidTimePeriod(format!("expected HH:MM or HH:MM:SS, got '{}'", s));

    let parts = s
        .split(':')
        .map(|p| p.trim().parse::<u64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m] => (*h, *m, 0),
        [h, m, sec] => (*h, *m, *sec),
        _ => return Err(invalid()),
    };

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|ms| ms.checked_add(minutes.checked_mul(MS_PER_MINUTE)?))
        .and_then(|ms| ms.checked_add(seconds.checked_mul(MS_PER_SECOND)?))
        .map(TimePeriod::from_millis)
        .ok_or_else(invalid)
}

/// Validate a raw value as a time period
///
/// Bare numbers are rejected so a missing unit never silently means seconds.
pub fn time_period(value: &Value) -> Result<TimePeriod, ErrorKind> {
    match value {
        Value::String(s) => s.parse(),
        Value::Integer(i) => Err(ErrorKind::InvalidTimePeriod(format!(
            "'{}' has no time unit, did you mean '{}s'?",
            i, i
        ))),
        Value::Float(f) => Err(ErrorKind::InvalidTimePeriod(format!(
            "'{}' has no time unit, did you mean '{}s'?",
            f, f
        ))),
        other => Err(ErrorKind::WrongType {
            expected: "time period",
            found: other.type_str(),
        }),
    }
}

/// How often a polling component updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateInterval {
    /// Only updated on demand
    Never,
    Every(TimePeriod),
}

impl UpdateInterval {
    /// Interval in milliseconds as passed to the runtime
    ///
    /// `Never` maps to [`NEVER_MS`]. Validated intervals always fit.
    pub fn as_runtime_millis(&self) -> u32 {
        match self {
            UpdateInterval::Never => NEVER_MS,
            UpdateInterval::Every(period) => {
                u32::try_from(period.as_millis()).unwrap_or(NEVER_MS - 1)
            }
        }
    }
}

impl fmt::Display for UpdateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateInterval::Never => f.write_str("never"),
            UpdateInterval::Every(period) => write!(f, "{}", period),
        }
    }
}

impl FromStr for UpdateInterval {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("never") {
            return Ok(UpdateInterval::Never);
        }
        let period: TimePeriod = s.parse()?;
        check_interval_range(period)
    }
}

impl Serialize for UpdateInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn check_interval_range(period: TimePeriod) -> Result<UpdateInterval, ErrorKind> {
    let max = u64::from(NEVER_MS - 1);
    if period.as_millis() > max {
        return Err(ErrorKind::TooLarge {
            max: max as i64,
            value: i64::try_from(period.as_millis()).unwrap_or(i64::MAX),
        });
    }
    Ok(UpdateInterval::Every(period))
}

/// Validate a raw value as an update interval
pub fn update_interval(value: &Value) -> Result<UpdateInterval, ErrorKind> {
    match value {
        Value::String(s) => s.parse(),
        other => check_interval_range(time_period(other)?),
    }
}
