//! Model definition loader
//!
//! - Definitions stored at `<model_dir>/model_<name>.json`
//! - One file per model type
//! - Files are registered parent-first, whatever order they are read in

use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::{log_event_with_fields, Event};
use crate::schema::ModelDefinition;

use super::errors::{LoadError, LoadResult, RegistryError};
use super::ModelRegistry;

/// Reads model definition files from disk into a registry.
pub struct ModelLoader {
    /// Directory containing model definition files
    model_dir: PathBuf,
}

impl ModelLoader {
    pub fn new(model_dir: &Path) -> Self {
        Self {
            model_dir: model_dir.to_path_buf(),
        }
    }

    /// Reads every `.json` definition in the model directory, sorted by path.
    ///
    /// A missing directory is created and yields no definitions.
    pub fn read_definitions(&self) -> LoadResult<Vec<ModelDefinition>> {
        if !self.model_dir.exists() {
            fs::create_dir_all(&self.model_dir).map_err(|e| self.io_error(&self.model_dir, e))?;
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.model_dir).map_err(|e| self.io_error(&self.model_dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| self.io_error(&self.model_dir, e))?.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        paths.iter().map(|path| self.read_definition(path)).collect()
    }

    fn read_definition(&self, path: &Path) -> LoadResult<ModelDefinition> {
        let content = fs::read_to_string(path).map_err(|e| self.io_error(path, e))?;
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads all definitions into `registry`, parents before children.
    ///
    /// Definitions are registered into a copy of `registry` first; on error
    /// `registry` is left exactly as it was. Returns the number of model types
    /// registered.
    pub fn load_all(&self, registry: &mut ModelRegistry) -> LoadResult<usize> {
        let mut pending = self.read_definitions()?;
        let mut staged = registry.clone();
        let mut loaded = 0;

        while !pending.is_empty() {
            let ready = pending.iter().position(|def| {
                def.parent
                    .as_deref()
                    .map_or(true, |parent| staged.contains(parent))
            });

            match ready {
                Some(index) => {
                    staged.register(pending.remove(index))?;
                    loaded += 1;
                }
                None => {
                    // Parent never appears (or the chain is cyclic)
                    let def = &pending[0];
                    return Err(RegistryError::UnknownParent {
                        model: def.name.clone(),
                        parent: def.parent.clone().unwrap_or_default(),
                    }
                    .into());
                }
            }
        }
        *registry = staged;

        let count = loaded.to_string();
        let dir = self.model_dir.display().to_string();
        log_event_with_fields(
            Event::ModelsLoaded,
            &[("count", count.as_str()), ("model_dir", dir.as_str())],
        );

        Ok(loaded)
    }

    /// Builds a fresh registry from the model directory.
    pub fn load_registry(&self) -> LoadResult<ModelRegistry> {
        let mut registry = ModelRegistry::new();
        self.load_all(&mut registry)?;
        Ok(registry)
    }

    /// Path a definition with the given name is stored at
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.model_dir.join(format!("model_{}.json", name))
    }

    /// Saves a definition to disk. Existing files are never overwritten.
    pub fn save_model(&self, definition: &ModelDefinition) -> LoadResult<PathBuf> {
        let path = self.path_for(&definition.name);

        if path.exists() {
            return Err(LoadError::AlreadyExists(path));
        }

        if !self.model_dir.exists() {
            fs::create_dir_all(&self.model_dir).map_err(|e| self.io_error(&self.model_dir, e))?;
        }

        let content = serde_json::to_string_pretty(definition).map_err(|source| LoadError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|e| self.io_error(&path, e))?;

        let display = path.display().to_string();
        log_event_with_fields(
            Event::ModelSaved,
            &[("model", definition.name.as_str()), ("path", display.as_str())],
        );

        Ok(path)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> LoadError {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
