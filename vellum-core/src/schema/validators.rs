//! Raw value validators
//!
//! Each validator is a pure function from a raw value to a typed value.
//! Paths are attached by the field chain, not here.

use toml::value::Table;
use toml::Value;

use crate::error::ErrorKind;

/// Coerce to an integer
///
/// Accepts integers, integral floats and numeric strings, including
/// `0x`-prefixed hexadecimal.
pub fn int_(value: &Value) -> Result<i64, ErrorKind> {
    match value {
        Value::Integer(i) => Ok(*i),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if *f < i64::MIN as f64 || *f > i64::MAX as f64 {
                return Err(ErrorKind::NotAnInteger(f.to_string()));
            }
            Ok(*f as i64)
        }
        Value::Float(f) => Err(ErrorKind::NotAnInteger(f.to_string())),
        Value::String(s) => parse_int(s.trim()).ok_or_else(|| ErrorKind::NotAnInteger(s.clone())),
        other => Err(ErrorKind::WrongType {
            expected: "integer",
            found: other.type_str(),
        }),
    }
}

fn parse_int(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let hex = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"));
    match hex {
        Some(hex) => {
            let v = i64::from_str_radix(hex, 16).ok()?;
            Some(if negative { -v } else { v })
        }
        None => s.parse().ok(),
    }
}

/// Integer in `1..=u32::MAX`
pub fn positive_int(value: &Value) -> Result<u32, ErrorKind> {
    let v = int_(value)?;
    if v < 1 {
        return Err(ErrorKind::TooSmall { min: 1, value: v });
    }
    u32::try_from(v).map_err(|_| ErrorKind::TooLarge {
        max: i64::from(u32::MAX),
        value: v,
    })
}

/// Coerce to a finite float
pub fn float_(value: &Value) -> Result<f32, ErrorKind> {
    let (v, raw) = match value {
        Value::Integer(i) => (*i as f32, i.to_string()),
        Value::Float(f) => (*f as f32, f.to_string()),
        Value::String(s) => (
            s.trim()
                .parse::<f32>()
                .map_err(|_| ErrorKind::NotANumber(s.clone()))?,
            s.clone(),
        ),
        other => {
            return Err(ErrorKind::WrongType {
                expected: "number",
                found: other.type_str(),
            })
        }
    };
    if !v.is_finite() {
        return Err(ErrorKind::NotANumber(raw));
    }
    Ok(v)
}

/// Coerce to a boolean
///
/// Besides real booleans, `true/yes/on/enable` and `false/no/off/disable`
/// are accepted in any case.
pub fn boolean(value: &Value) -> Result<bool, ErrorKind> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "enable" => Ok(true),
            "false" | "no" | "off" | "disable" => Ok(false),
            _ => Err(ErrorKind::NotABoolean(s.clone())),
        },
        other => Err(ErrorKind::NotABoolean(other.to_string())),
    }
}

/// Coerce scalars to a string
pub fn string(value: &Value) -> Result<String, ErrorKind> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        other => Err(ErrorKind::WrongType {
            expected: "string",
            found: other.type_str(),
        }),
    }
}

/// Require a table
pub fn table(value: &Value) -> Result<&Table, ErrorKind> {
    value.as_table().ok_or(ErrorKind::WrongType {
        expected: "table",
        found: value.type_str(),
    })
}

/// Treat a single value as a one-item list
pub fn ensure_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Case-insensitive match against a fixed set of names
///
/// Returns the value paired with the uppercase canonical name.
pub fn enum_upper<'o, E: Copy>(
    options: &'o [(&'static str, E)],
) -> impl Fn(&Value) -> Result<E, ErrorKind> + 'o {
    move |value: &Value| {
        let raw = string(value)?;
        let upper = raw.trim().to_uppercase();
        options
            .iter()
            .find(|(name, _)| *name == upper)
            .map(|(_, v)| *v)
            .ok_or_else(|| ErrorKind::UnknownValue {
                value: raw,
                allowed: options.iter().map(|(name, _)| *name).collect(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_coercion() {
        assert_eq!(int_(&Value::Integer(100)), Ok(100));
        assert_eq!(int_(&Value::Float(50.0)), Ok(50));
        assert_eq!(int_(&Value::String(" 240 ".into())), Ok(240));
        assert!(matches!(
            int_(&Value::Float(1.5)),
            Err(ErrorKind::NotAnInteger(_))
        ));
        assert!(matches!(
            int_(&Value::String("wide".into())),
            Err(ErrorKind::NotAnInteger(_))
        ));
        assert!(matches!(
            int_(&Value::Boolean(true)),
            Err(ErrorKind::WrongType { expected: "integer", found: "boolean" })
        ));
    }

    #[test]
    fn test_positive_int() {
        assert_eq!(positive_int(&Value::Integer(1)), Ok(1));
        assert_eq!(
            positive_int(&Value::Integer(0)),
            Err(ErrorKind::TooSmall { min: 1, value: 0 })
        );
        assert!(matches!(
            positive_int(&Value::Integer(-4)),
            Err(ErrorKind::TooSmall { .. })
        ));
        assert!(matches!(
            positive_int(&Value::Integer(i64::from(u32::MAX) + 1)),
            Err(ErrorKind::TooLarge { .. })
        ));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(&Value::Boolean(false)), Ok(false));
        assert_eq!(boolean(&Value::String("Yes".into())), Ok(true));
        assert_eq!(boolean(&Value::String("off".into())), Ok(false));
        assert!(boolean(&Value::String("maybe".into())).is_err());
        assert!(boolean(&Value::Integer(1)).is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(float_(&Value::Integer(600)), Ok(600.0));
        assert_eq!(float_(&Value::String("-100.5".into())), Ok(-100.5));
        assert!(float_(&Value::String("high".into())).is_err());
    }

    #[test]
    fn test_float_rejects_non_finite() {
        assert!(matches!(
            float_(&Value::Float(f64::NAN)),
            Err(ErrorKind::NotANumber(_))
        ));
        assert!(matches!(
            float_(&Value::Float(f64::INFINITY)),
            Err(ErrorKind::NotANumber(_))
        ));
        assert!(matches!(
            float_(&Value::String("nan".into())),
            Err(ErrorKind::NotANumber(_))
        ));
        assert!(matches!(
            float_(&Value::String("-inf".into())),
            Err(ErrorKind::NotANumber(_))
        ));
        // Finite in f64 but overflows f32
        assert!(matches!(
            float_(&Value::Float(1e300)),
            Err(ErrorKind::NotANumber(_))
        ));
    }

    #[test]
    fn test_int_hex_strings() {
        assert_eq!(int_(&Value::String("0x80".into())), Ok(128));
        assert_eq!(int_(&Value::String("0XfF".into())), Ok(255));
        assert_eq!(int_(&Value::String("-0x10".into())), Ok(-16));
        assert_eq!(int_(&Value::String("+12".into())), Ok(12));
        assert!(matches!(
            int_(&Value::String("0xZZ".into())),
            Err(ErrorKind::NotAnInteger(_))
        ));
        assert!(matches!(
            int_(&Value::String("0x".into())),
            Err(ErrorKind::NotAnInteger(_))
        ));
    }

    #[test]
    fn test_ensure_list() {
        let single = Value::Table(Table::new());
        assert_eq!(ensure_list(&single).len(), 1);

        let list = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
        assert_eq!(ensure_list(&list).len(), 2);
    }

    #[test]
    fn test_enum_upper() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Mode {
            Fast,
            Slow,
        }
        let options = [("FAST", Mode::Fast), ("SLOW", Mode::Slow)];
        let validate = enum_upper(&options);

        assert_eq!(validate(&Value::String("fast".into())), Ok(Mode::Fast));
        assert_eq!(validate(&Value::String("sLoW".into())), Ok(Mode::Slow));
        assert_eq!(
            validate(&Value::String("medium".into())),
            Err(ErrorKind::UnknownValue {
                value: "medium".into(),
                allowed: vec!["FAST", "SLOW"],
            })
        );
    }
}
