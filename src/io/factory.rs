// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Reader construction with format classification.
//!
//! This module selects and constructs the correct raw decoder for a set
//! of input paths. Classification is extension-based, with a small
//! static override table consulted first for legacy formats that the
//! general path cannot classify.
//!
//! A file-set is always bound to exactly its first path: multi-file
//! formats are expected to self-discover sibling files from the first
//! path. This is a documented format-level assumption, not a bug.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use ephysio::io::factory::FormatRegistry;
//!
//! let registry = FormatRegistry::new();
//! // registry.register(Box::new(MyFormat));
//! let reader = registry.open_file_set(&[PathBuf::from("session.smr")])?;
//! # Ok::<(), ephysio::AdapterError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::AdapterError;
use crate::Result;

use super::traits::{FileMode, RawFormat, RawReader};

/// Legacy extension overrides, consulted before the general classifier.
///
/// Maps a lowercase file extension to the name of the format that must
/// handle it. This is an explicit escape hatch for formats that cannot
/// be auto-classified through the general path; any new format must go
/// through general classification unless appended here.
pub const EXTENSION_OVERRIDES: &[(&str, &str)] = &[
    // CED Spike2 files resist general lookup in the upstream reader zoo.
    ("smr", "ced"),
];

/// Registry of acquisition formats.
///
/// Formats are consulted in registration order. The registry owns the
/// format objects and constructs readers bound to one file-set.
#[derive(Default)]
pub struct FormatRegistry {
    formats: Vec<Box<dyn RawFormat>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a format.
    pub fn register(&mut self, format: Box<dyn RawFormat>) {
        self.formats.push(format);
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Check if no formats are registered.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Look up a registered format by name.
    pub fn find_by_name(&self, name: &str) -> Option<&dyn RawFormat> {
        self.formats
            .iter()
            .map(|f| f.as_ref())
            .find(|f| f.name() == name)
    }

    /// Classify a path to the format that should decode it.
    ///
    /// The override table is checked first; then each registered format
    /// in order, matching file formats by extension and directory
    /// formats by the path being a directory. Fails with
    /// `FormatNotRecognized` naming every classifier attempted.
    pub fn classify(&self, path: &Path) -> Result<&dyn RawFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        if let Some(ext) = ext.as_deref() {
            if let Some((_, name)) = EXTENSION_OVERRIDES.iter().find(|(o, _)| *o == ext) {
                if let Some(format) = self.find_by_name(name) {
                    debug!(extension = ext, format = name, "extension override matched");
                    return Ok(format);
                }
            }
        }

        let is_dir = path.is_dir();
        for format in &self.formats {
            let matched = match format.file_mode() {
                FileMode::SingleFile | FileMode::MultiFile => ext
                    .as_deref()
                    .is_some_and(|e| format.extensions().contains(&e)),
                FileMode::Directory => is_dir,
            };
            if matched {
                debug!(
                    format = format.name(),
                    mode = %format.file_mode(),
                    "classified path"
                );
                return Ok(format.as_ref());
            }
        }

        Err(AdapterError::format_not_recognized(
            path.to_string_lossy(),
            self.formats.iter().map(|f| f.name().to_string()),
        ))
    }

    /// Construct a reader bound to the first path of a file-set.
    ///
    /// `SingleFile` and `MultiFile` formats receive the file path;
    /// `Directory` formats receive the directory path (the path itself
    /// if it is a directory, otherwise its parent).
    pub fn open_file_set(&self, paths: &[PathBuf]) -> Result<Box<dyn RawReader>> {
        let first = paths
            .first()
            .ok_or_else(|| AdapterError::Other("file-set is empty".to_string()))?;

        let format = self.classify(first)?;
        match format.file_mode() {
            FileMode::SingleFile | FileMode::MultiFile => format.open(first),
            FileMode::Directory => {
                let dir = if first.is_dir() {
                    first.as_path()
                } else {
                    first.parent().unwrap_or(first.as_path())
                };
                format.open(dir)
            }
        }
    }
}
