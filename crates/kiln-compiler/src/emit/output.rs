//! Output sinks and the emission result.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use kiln_core::ClassName;
use serde::Serialize;

use super::EmitError;

/// Destination for emitted artifacts.
pub trait OutputSink {
    fn write(&mut self, name: &str, contents: &str) -> Result<(), EmitError>;
}

/// Keeps artifacts in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: IndexMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, name: &str, contents: &str) -> Result<(), EmitError> {
        self.files.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

/// Writes artifacts under a root directory, creating parents as needed.
#[derive(Debug)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirSink {
    fn write(&mut self, name: &str, contents: &str) -> Result<(), EmitError> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }
}

/// What downstream tooling needs to run the emitted program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryPointInfo {
    /// The program's entry class.
    pub class: ClassName,
    /// Synthetic `<entry>_EntryPoint` class name.
    pub entry_class: ClassName,
    pub file_path: String,
    pub main_method: String,
}

impl EntryPointInfo {
    pub fn new(class: &ClassName) -> Self {
        let entry_class = class.with_suffix("_EntryPoint");
        Self {
            class: class.clone(),
            file_path: entry_class.simple_name().to_string(),
            entry_class,
            main_method: "main".to_string(),
        }
    }
}

/// Finished emission.
#[derive(Clone, Debug)]
pub struct EmitResult {
    pub source: String,
    /// Source map JSON, present in debug mode.
    pub source_map: Option<String>,
    pub entry_point: EntryPointInfo,
}
