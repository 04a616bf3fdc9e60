//! Variant sinks
//!
//! A sink persists each lent-out variant before the generator rewrites the
//! document for the next vehicle.

use crate::document::MapDocument;
use crate::error::{ApiError, StorageError};
use crate::generator::{Variant, Variants};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Receives generated variants
pub trait Sink<D: ?Sized> {
    /// Persist `document` at `relative_path`. Must finish with the document before returning.
    fn accept(&mut self, document: &D, relative_path: &str) -> Result<(), StorageError>;
}

/// Writes variants as JSON documents below a root directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    written: Vec<PathBuf>,
    overwritten: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
            overwritten: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Files this sink wrote more than once, in the order they were replaced
    pub fn overwritten(&self) -> &[PathBuf] {
        &self.overwritten
    }

    fn resolve(&self, relative_path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(relative_path);
        let escapes = relative.components().any(|c| {
            !matches!(c, std::path::Component::Normal(_) | std::path::Component::CurDir)
        });
        if escapes {
            return Err(StorageError::InvalidPath(format!(
                "output path must stay below the output directory: {}",
                relative_path
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl<D: Serialize + ?Sized> Sink<D> for DirectorySink {
    fn accept(&mut self, document: &D, relative_path: &str) -> Result<(), StorageError> {
        let path = self.resolve(relative_path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| StorageError::Encode {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, bytes)?;
        if self.written.contains(&path) {
            warn!(path = %path.display(), "Overwrote a variant written earlier in this run");
            self.overwritten.push(path.clone());
        } else {
            debug!(path = %path.display(), "Wrote variant");
        }
        self.written.push(path);
        Ok(())
    }
}

/// Collects output paths without writing anything
#[derive(Debug, Clone, Default)]
pub struct DryRunSink {
    pub paths: Vec<String>,
}

impl<D: ?Sized> Sink<D> for DryRunSink {
    fn accept(&mut self, _document: &D, relative_path: &str) -> Result<(), StorageError> {
        self.paths.push(relative_path.to_string());
        Ok(())
    }
}

/// Drive `variants` to the end, handing every variant to `sink`.
///
/// Returns the relative paths of all variants. When the sink fails, the
/// source map is still restored before the error is returned.
pub fn drain_into<D, S>(
    mut variants: Variants<'_, '_, D>,
    sink: &mut S,
) -> Result<Vec<String>, ApiError>
where
    D: MapDocument + ?Sized,
    S: Sink<D> + ?Sized,
{
    let mut paths = Vec::new();
    while let Some(variant) = variants.next_variant() {
        let Variant { document, path, .. } = variant?;
        if let Err(e) = sink.accept(document, &path) {
            warn!(path = %path, error = %e, "Sink rejected variant, restoring map");
            variants.finish()?;
            return Err(e.into());
        }
        paths.push(path);
    }
    Ok(paths)
}
