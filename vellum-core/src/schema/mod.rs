//! Field chain
//!
//! A component schema is an ordered chain of per-key validators applied to
//! one raw mapping. Schema fragments contributed by collaborators consume
//! their keys from the same [`Fields`]; whatever is left when the chain
//! finishes is an unknown key.

pub mod validators;

use std::collections::BTreeSet;

use toml::value::Table;
use toml::Value;
use vellum_emit::TypeRef;

use crate::error::{ConfigPath, ErrorKind, ValidationError};
use crate::ids::{Id, IdRegistry};

pub use validators::*;

/// Key holding an instance id
pub const CONF_ID: &str = "id";

/// Keys of one raw mapping, consumed by validators in order
#[derive(Debug)]
pub struct Fields<'a> {
    table: &'a Table,
    path: ConfigPath,
    consumed: BTreeSet<String>,
}

impl<'a> Fields<'a> {
    pub fn new(table: &'a Table, path: ConfigPath) -> Self {
        Self {
            table,
            path,
            consumed: BTreeSet::new(),
        }
    }

    /// Path of the mapping itself
    pub fn path(&self) -> &ConfigPath {
        &self.path
    }

    /// Whether the raw mapping holds `key`
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    fn error(&self, key: &str, kind: ErrorKind) -> ValidationError {
        ValidationError::new(self.path.key(key), kind)
    }

    /// Validate a key that must be present
    pub fn required<T>(
        &mut self,
        key: &str,
        validate: impl FnOnce(&'a Value) -> Result<T, ErrorKind>,
    ) -> Result<T, ValidationError> {
        self.optional(key, validate)?
            .ok_or_else(|| self.error(key, ErrorKind::MissingKey))
    }

    /// Validate a key that may be absent
    pub fn optional<T>(
        &mut self,
        key: &str,
        validate: impl FnOnce(&'a Value) -> Result<T, ErrorKind>,
    ) -> Result<Option<T>, ValidationError> {
        self.consumed.insert(key.into());
        let table: &'a Table = self.table;
        match table.get(key) {
            Some(value) => validate(value)
                .map(Some)
                .map_err(|kind| self.error(key, kind)),
            None => Ok(None),
        }
    }

    /// Validate a key, falling back to `default` when absent
    pub fn optional_or<T>(
        &mut self,
        key: &str,
        default: T,
        validate: impl FnOnce(&'a Value) -> Result<T, ErrorKind>,
    ) -> Result<T, ValidationError> {
        Ok(self.optional(key, validate)?.unwrap_or(default))
    }

    /// Validate a key whose value is itself structured
    ///
    /// The validator receives the path of the key so nested errors point
    /// below it.
    pub fn optional_nested<T>(
        &mut self,
        key: &str,
        validate: impl FnOnce(&'a Value, ConfigPath) -> Result<T, ValidationError>,
    ) -> Result<Option<T>, ValidationError> {
        self.consumed.insert(key.into());
        let table: &'a Table = self.table;
        match table.get(key) {
            Some(value) => validate(value, self.path.key(key)).map(Some),
            None => Ok(None),
        }
    }

    /// Declare the explicit `id`, or generate one for `ty`
    pub fn declare_id(
        &mut self,
        ids: &mut IdRegistry,
        ty: &TypeRef,
    ) -> Result<Id, ValidationError> {
        match self.optional(CONF_ID, string)? {
            Some(name) => ids
                .declare(&name)
                .map_err(|kind| self.error(CONF_ID, kind)),
            None => ids
                .generate(ty)
                .map_err(|kind| self.error(CONF_ID, kind)),
        }
    }

    /// Reject any key no validator consumed
    pub fn finish(self) -> Result<(), ValidationError> {
        match self
            .table
            .keys()
            .find(|key| !self.consumed.contains(key.as_str()))
        {
            Some(key) => Err(self.error(key, ErrorKind::UnknownKey)),
            None => Ok(()),
        }
    }
}

/// Fail if more than one of `keys` is present in `table`
pub fn has_at_most_one_key(
    table: &Table,
    path: &ConfigPath,
    keys: &[&str],
) -> Result<(), ValidationError> {
    let present: Vec<String> = keys
        .iter()
        .filter(|key| table.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if present.len() > 1 {
        return Err(ValidationError::new(
            path.clone(),
            ErrorKind::MutuallyExclusive(present),
        ));
    }
    Ok(())
}

/// Validate every item of a list (or single value) as a table
pub fn table_list<'a, T>(
    value: &'a Value,
    path: &ConfigPath,
    min_items: usize,
    mut validate: impl FnMut(&'a Table, ConfigPath) -> Result<T, ValidationError>,
) -> Result<Vec<T>, ValidationError> {
    let items = ensure_list(value);
    if items.len() < min_items {
        return Err(ValidationError::new(
            path.clone(),
            ErrorKind::TooFewItems(min_items),
        ));
    }
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = path.index(i);
            let item_table =
                table(item).map_err(|kind| ValidationError::new(item_path.clone(), kind))?;
            validate(item_table, item_path)
        })
        .collect()
}
