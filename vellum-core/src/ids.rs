//! Instance identifiers
//!
//! Every generated object is bound to a variable named by its id. Ids are
//! either declared explicitly in the configuration or generated from the
//! object's runtime type.

use core::fmt;
use std::collections::BTreeSet;

use heapless::String as HString;
use serde::{Serialize, Serializer};
use vellum_emit::TypeRef;

use crate::error::ErrorKind;

/// Maximum id length
pub const MAX_ID_LEN: usize = 64;

/// Names that would collide with C++ keywords or runtime globals
const RESERVED_IDS: &[&str] = &[
    // C++ keywords
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char",
    "class", "const", "constexpr", "continue", "default", "delete", "do", "double", "else",
    "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "nullptr",
    "operator", "or", "private", "protected", "public", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "template", "this", "throw", "true",
    "try", "typedef", "typename", "union", "unsigned", "using", "virtual", "void",
    "volatile", "while", "xor",
    // Runtime globals
    "App", "it", "id", "setup", "loop", "delay", "millis", "micros", "display",
    "display_buffer", "esphome",
];

/// A validated identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(HString<MAX_ID_LEN>);

impl Id {
    /// Validate and wrap an explicit id
    pub fn new(name: &str) -> Result<Self, ErrorKind> {
        validate_id_name(name)?;
        HString::try_from(name)
            .map(Self)
            .map_err(|_| ErrorKind::InvalidId(format!("id is longer than {} characters", MAX_ID_LEN)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Check that `name` can be used as a variable name
pub fn validate_id_name(name: &str) -> Result<(), ErrorKind> {
    let first = name
        .chars()
        .next()
        .ok_or_else(|| ErrorKind::InvalidId("id must not be empty".into()))?;

    if first.is_ascii_digit() {
        return Err(ErrorKind::InvalidId(format!(
            "'{}' starts with a digit",
            name
        )));
    }
    if name.contains('-') {
        return Err(ErrorKind::InvalidId(format!(
            "dashes are not supported in ids, use '{}' instead",
            name.replace('-', "_")
        )));
    }
    if let Some(c) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(ErrorKind::InvalidId(format!(
            "'{}' is not a valid id character, ids may only contain [a-zA-Z0-9_]",
            c
        )));
    }
    if RESERVED_IDS.contains(&name) {
        return Err(ErrorKind::InvalidId(format!("'{}' is a reserved word", name)));
    }
    if name.len() > MAX_ID_LEN {
        return Err(ErrorKind::InvalidId(format!(
            "id is longer than {} characters",
            MAX_ID_LEN
        )));
    }
    Ok(())
}

/// Ids known within one configuration document
///
/// Explicit ids can be reserved up front so that ids generated for earlier
/// components never take a name a later component declares.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    declared: BTreeSet<String>,
    reserved: BTreeSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `name` free for a later explicit declaration
    pub fn reserve(&mut self, name: &str) {
        self.reserved.insert(name.into());
    }

    /// Declare an explicit id
    pub fn declare(&mut self, name: &str) -> Result<Id, ErrorKind> {
        let id = Id::new(name)?;
        if !self.declared.insert(name.into()) {
            return Err(ErrorKind::DuplicateId(name.into()));
        }
        Ok(id)
    }

    /// Generate an id for an object of type `ty`
    ///
    /// The base name is the snake-cased qualified type name, suffixed with
    /// `_2`, `_3`, ... until it is unused.
    pub fn generate(&mut self, ty: &TypeRef) -> Result<Id, ErrorKind> {
        let base = ty.id_base();
        let mut candidate = base.clone();
        let mut n = 1;
        while self.declared.contains(&candidate) || self.reserved.contains(&candidate) {
            n += 1;
            candidate = format!("{}_{}", base, n);
        }
        let id = Id::new(&candidate)?;
        self.declared.insert(candidate);
        Ok(id)
    }

    /// Number of declared ids
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id_name() {
        assert!(validate_id_name("my_buffer").is_ok());
        assert!(validate_id_name("_fb2").is_ok());
        assert!(validate_id_name("").is_err());
        assert!(validate_id_name("2fb").is_err());
        assert!(validate_id_name("class").is_err());
        assert!(validate_id_name("App").is_err());
        assert!(validate_id_name("fb.main").is_err());

        match validate_id_name("my-buffer") {
            Err(ErrorKind::InvalidId(msg)) => assert!(msg.contains("my_buffer")),
            other => panic!("unexpected {:?}", other),
        }

        let long = "a".repeat(MAX_ID_LEN + 1);
        assert!(validate_id_name(&long).is_err());
    }

    #[test]
    fn test_declare_duplicate() {
        let mut ids = IdRegistry::new();
        assert_eq!(ids.declare("fb").unwrap().as_str(), "fb");
        assert_eq!(ids.declare("fb"), Err(ErrorKind::DuplicateId("fb".into())));
    }

    #[test]
    fn test_generate_unique() {
        let ty = TypeRef::new("display_buffer::Buffer");
        let mut ids = IdRegistry::new();
        assert_eq!(ids.generate(&ty).unwrap().as_str(), "display_buffer_buffer");
        assert_eq!(ids.generate(&ty).unwrap().as_str(), "display_buffer_buffer_2");
        assert_eq!(ids.generate(&ty).unwrap().as_str(), "display_buffer_buffer_3");
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_generate_skips_reserved() {
        let ty = TypeRef::new("display::DisplayPage");
        let mut ids = IdRegistry::new();
        ids.reserve("display_displaypage");

        assert_eq!(ids.generate(&ty).unwrap().as_str(), "display_displaypage_2");
        // The reserved name is still available for its explicit declaration
        assert!(ids.declare("display_displaypage").is_ok());
    }

    proptest::proptest! {
        #[test]
        fn test_generated_ids_unique(count in 1usize..50, reserved in proptest::collection::vec(2usize..50, 0..5)) {
            let ty = TypeRef::new("display_buffer::Buffer");
            let mut ids = IdRegistry::new();
            for n in &reserved {
                ids.reserve(&format!("display_buffer_buffer_{}", n));
            }
            let mut seen = BTreeSet::new();
            for _ in 0..count {
                let id = ids.generate(&ty).unwrap();
                proptest::prop_assert!(validate_id_name(id.as_str()).is_ok());
                proptest::prop_assert!(seen.insert(id.as_str().to_string()));
                for n in &reserved {
                    proptest::prop_assert_ne!(id.as_str(), format!("display_buffer_buffer_{}", n));
                }
            }
        }
    }
}
