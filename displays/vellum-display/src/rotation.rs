//! Display rotation

use core::fmt;

use serde::{Serialize, Serializer};
use toml::Value;
use vellum_core::ErrorKind;

/// Clockwise rotation applied to everything drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

const ALLOWED: &[&str] = &["0", "90", "180", "270"];

impl Rotation {
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Runtime constant passed to `set_rotation`
    pub fn cpp_constant(self) -> String {
        format!("display::DISPLAY_ROTATION_{}_DEGREES", self.degrees())
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl Serialize for Rotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.degrees())
    }
}

/// Validate a rotation given as degrees, with an optional `°` suffix
pub fn rotation(value: &Value) -> Result<Rotation, ErrorKind> {
    let unknown = |raw: String| ErrorKind::UnknownValue {
        value: raw,
        allowed: ALLOWED.to_vec(),
    };
    let degrees = match value {
        Value::Integer(i) => *i,
        Value::String(s) => {
            let trimmed = s.trim();
            let trimmed = trimmed.strip_suffix('°').unwrap_or(trimmed).trim_end();
            trimmed.parse::<i64>().map_err(|_| unknown(s.clone()))?
        }
        other => {
            return Err(ErrorKind::WrongType {
                expected: "rotation in degrees",
                found: other.type_str(),
            })
        }
    };
    Rotation::from_degrees(degrees).ok_or_else(|| unknown(degrees.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_values() {
        assert_eq!(rotation(&Value::Integer(90)), Ok(Rotation::Deg90));
        assert_eq!(rotation(&Value::String("180°".into())), Ok(Rotation::Deg180));
        assert_eq!(rotation(&Value::String(" 270 ".into())), Ok(Rotation::Deg270));
        assert_eq!(rotation(&Value::Integer(0)), Ok(Rotation::Deg0));
    }

    #[test]
    fn test_rotation_rejects_other_angles() {
        assert!(matches!(
            rotation(&Value::Integer(45)),
            Err(ErrorKind::UnknownValue { .. })
        ));
        assert!(matches!(
            rotation(&Value::String("sideways".into())),
            Err(ErrorKind::UnknownValue { .. })
        ));
        assert!(matches!(
            rotation(&Value::Boolean(true)),
            Err(ErrorKind::WrongType { .. })
        ));
    }

    #[test]
    fn test_cpp_constant() {
        assert_eq!(
            Rotation::Deg90.cpp_constant(),
            "display::DISPLAY_ROTATION_90_DEGREES"
        );
        assert_eq!(Rotation::Deg270.to_string(), "270°");
    }
}
