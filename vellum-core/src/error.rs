//! Validation errors
//!
//! Every failure carries the path of the offending key so the host build
//! pipeline can point at it.

use core::fmt;

use thiserror::Error;

/// One step in a configuration path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside the raw configuration
///
/// Renders as `display_buffer[0].pages[1].lambda`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigPath(Vec<PathSegment>);

impl ConfigPath {
    /// The empty path (the mapping being validated)
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a key below this one
    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    /// Path of a list item below this one
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// What went wrong with a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("required key not provided")]
    MissingKey,
    #[error("extra keys not allowed")]
    UnknownKey,
    #[error("expected {expected}, got {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("expected integer, got '{0}'")]
    NotAnInteger(String),
    #[error("expected number, got '{0}'")]
    NotANumber(String),
    #[error("cannot convert '{0}' to a boolean, use 'true' or 'false'")]
    NotABoolean(String),
    #[error("value must be at least {min}, got {value}")]
    TooSmall { min: i64, value: i64 },
    #[error("value must be at most {max}, got {value}")]
    TooLarge { max: i64, value: i64 },
    #[error("unknown value '{value}', valid options are {}", .allowed.join(", "))]
    UnknownValue {
        value: String,
        allowed: Vec<&'static str>,
    },
    #[error("invalid time period: {0}")]
    InvalidTimePeriod(String),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("id '{0}' is declared more than once")]
    DuplicateId(String),
    #[error("list must contain at least {0} item(s)")]
    TooFewItems(usize),
    #[error("cannot specify more than one of {}", .0.join(", "))]
    MutuallyExclusive(Vec<String>),
}

/// A configuration validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct ValidationError {
    /// Offending key
    pub path: ConfigPath,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(path: ConfigPath, kind: ErrorKind) -> Self {
        Self { path, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = ConfigPath::root()
            .key("display_buffer")
            .index(0)
            .key("pages")
            .index(1)
            .key("lambda");
        assert_eq!(path.to_string(), "display_buffer[0].pages[1].lambda");
        assert_eq!(ConfigPath::root().to_string(), "<root>");
    }

    #[test]
    fn test_error_message() {
        let path = ConfigPath::root().key("display_buffer").index(2).key("format");
        let err = ValidationError::new(path, ErrorKind::MissingKey);
        assert_eq!(
            err.to_string(),
            "display_buffer[2].format: required key not provided"
        );
    }

    #[test]
    fn test_kind_messages() {
        let kind = ErrorKind::UnknownValue {
            value: "rgb999".into(),
            allowed: vec!["RGB565", "RGB888"],
        };
        assert_eq!(
            kind.to_string(),
            "unknown value 'rgb999', valid options are RGB565, RGB888"
        );

        let kind = ErrorKind::MutuallyExclusive(vec!["pages".into(), "lambda".into()]);
        assert_eq!(
            kind.to_string(),
            "cannot specify more than one of pages, lambda"
        );
    }
}
