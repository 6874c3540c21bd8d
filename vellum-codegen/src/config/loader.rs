//! Document loader

use core::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml::value::Table;
use toml::Value;
use tracing::{debug, info, warn};
use vellum_core::schema::{ensure_list, CONF_ID};
use vellum_core::{
    ComponentLifecycle, ConfigPath, ErrorKind, IdRegistry, InlineLambdaCompiler, LambdaCompiler,
    StandardLifecycle, ValidationError,
};
use vellum_display::{DisplaySubsystem, StandardDisplay, CONF_PAGES};
use vellum_emit::EmitProgram;

use super::report::boxed_report;
use crate::buffer::{BufferConfig, BufferEmitter, BufferSchema, COMPONENT_KEY};

/// Every validation failure of one document
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigErrors(Vec<ValidationError>);

impl ConfigErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Boxed report listing every error
    pub fn report(&self) -> String {
        boxed_report(
            "Invalid display_buffer configuration",
            self.0.iter().map(|e| e.to_string()),
        )
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} configuration error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

/// Loading a document failed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid TOML syntax: {0}")]
    Syntax(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigErrors),
}

/// Validates and emits every display buffer of a document
pub struct Loader<'c> {
    schema: BufferSchema<'c>,
    emitter: BufferEmitter<'c>,
}

impl<'c> Loader<'c> {
    pub fn new(
        display: &'c dyn DisplaySubsystem,
        lifecycle: &'c dyn ComponentLifecycle,
        lambdas: &'c dyn LambdaCompiler,
    ) -> Self {
        Self {
            schema: BufferSchema::new(display, lifecycle),
            emitter: BufferEmitter::new(display, lifecycle, lambdas),
        }
    }

    /// Validate every entry of a parsed document
    ///
    /// Explicit ids are reserved before validation so generated ids never
    /// take a name declared further down. Validation continues past a
    /// failing entry and all failures are returned together.
    pub fn validate(&self, document: &Table) -> Result<Vec<BufferConfig>, ConfigErrors> {
        let entries = match document.get(COMPONENT_KEY) {
            Some(value) => ensure_list(value),
            None => {
                warn!("no {} entries in document", COMPONENT_KEY);
                return Ok(Vec::new());
            }
        };
        for key in document.keys().filter(|k| k.as_str() != COMPONENT_KEY) {
            debug!("ignoring top-level key '{}'", key);
        }

        let mut ids = IdRegistry::new();
        for entry in &entries {
            reserve_explicit_ids(entry, &mut ids);
        }

        let base = ConfigPath::root().key(COMPONENT_KEY);
        let mut configs = Vec::with_capacity(entries.len());
        let mut errors = Vec::new();

        for (i, entry) in entries.into_iter().enumerate() {
            let path = base.index(i);
            let result = match entry.as_table() {
                Some(raw) => self.schema.validate(raw, path, &mut ids),
                None => Err(ValidationError::new(
                    path,
                    ErrorKind::WrongType {
                        expected: "table",
                        found: entry.type_str(),
                    },
                )),
            };
            match result {
                Ok(config) => configs.push(config),
                Err(e) => {
                    warn!("{}", e);
                    errors.push(e);
                }
            }
        }

        if errors.is_empty() {
            Ok(configs)
        } else {
            Err(ConfigErrors(errors))
        }
    }

    /// Parse, validate and emit a document
    pub fn load_str(&self, source: &str) -> Result<Vec<EmitProgram>, LoadError> {
        let document: Table = toml::from_str(source)?;
        let configs = self.validate(&document)?;
        for config in &configs {
            info!("{}", config.summary());
        }
        let programs: Vec<EmitProgram> = configs.iter().map(|c| self.emitter.emit(c)).collect();
        info!("emitted {} {} program(s)", programs.len(), COMPONENT_KEY);
        Ok(programs)
    }

    pub fn load_file(&self, path: &Path) -> Result<Vec<EmitProgram>, LoadError> {
        let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded {} ({} bytes)", path.display(), source.len());
        self.load_str(&source)
    }
}

fn reserve_explicit_ids(entry: &Value, ids: &mut IdRegistry) {
    let Some(raw) = entry.as_table() else {
        return;
    };
    if let Some(Value::String(id)) = raw.get(CONF_ID) {
        ids.reserve(id);
    }
    if let Some(pages) = raw.get(CONF_PAGES) {
        for page in ensure_list(pages) {
            if let Some(Value::String(id)) = page.get(CONF_ID) {
                ids.reserve(id);
            }
        }
    }
}

/// Load a document with the standard collaborators
pub fn load_str(source: &str) -> Result<Vec<EmitProgram>, LoadError> {
    let lambdas = InlineLambdaCompiler::default();
    Loader::new(&StandardDisplay, &StandardLifecycle, &lambdas).load_str(source)
}

/// Load a document file with the standard collaborators
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<EmitProgram>, LoadError> {
    let lambdas = InlineLambdaCompiler::default();
    Loader::new(&StandardDisplay, &StandardLifecycle, &lambdas).load_file(path.as_ref())
}
