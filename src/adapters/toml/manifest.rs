//! Manifest file format
//!
//! ```toml
//! [weaving]
//! type_level_depth = 1
//!
//! [[type]]
//! name = "App.Foo"
//! interfaces = ["App.IFoo"]
//!
//! [[type.method]]
//! name = "Save"
//! returns = "System.Void"
//! params = ["System.Int32"]
//!
//! [[component]]
//! implementation = "App.Foo"
//! contracts = ["App.IFoo"]
//!
//! [[binding]]
//! type = "App.Foo"
//!
//! [[binding.method]]
//! name = "Save"
//! advices = ["audit"]
//!
//! [[advice]]
//! id = "audit"
//! kind = "logging"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use super::ManifestError;
use crate::config::WeavingConfig;
use crate::core::models::{Access, CutPointKind};

/// File name suffix of manifests discovered in directories
pub const MANIFEST_SUFFIX: &str = ".weave.toml";

/// One manifest file
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    /// Weaving settings; the last manifest that sets them wins
    #[serde(default)]
    pub weaving: Option<WeavingConfig>,

    /// Type metadata
    #[serde(default, rename = "type")]
    pub types: Vec<TypeEntry>,

    /// Registered components, in registration order
    #[serde(default, rename = "component")]
    pub components: Vec<ComponentEntry>,

    /// Interception bindings
    #[serde(default, rename = "binding")]
    pub bindings: Vec<BindingEntry>,

    /// Advice declarations
    #[serde(default, rename = "advice")]
    pub advices: Vec<AdviceEntry>,

    /// Global aspects
    #[serde(default, rename = "aspect")]
    pub aspects: Vec<AspectEntry>,
}

/// A `[[type]]` entry
#[derive(Debug, Deserialize)]
pub struct TypeEntry {
    /// Full type name
    pub name: String,

    /// Base type
    #[serde(default)]
    pub base: Option<String>,

    /// Directly implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Declared methods
    #[serde(default, rename = "method")]
    pub methods: Vec<MethodEntry>,
}

/// A `[[type.method]]` entry
#[derive(Debug, Deserialize)]
pub struct MethodEntry {
    /// Method name
    pub name: String,

    /// Full return type name
    #[serde(default = "default_returns")]
    pub returns: String,

    /// Full parameter type names, in order
    #[serde(default)]
    pub params: Vec<String>,

    /// Access level
    #[serde(default)]
    pub access: Access,
}

fn default_returns() -> String {
    "System.Void".to_string()
}

/// A `[[component]]` entry
#[derive(Debug, Deserialize)]
pub struct ComponentEntry {
    /// Implementation type
    pub implementation: String,

    /// Contracts the component is exposed under
    #[serde(default)]
    pub contracts: Vec<String>,
}

/// A `[[binding]]` entry
#[derive(Debug, Deserialize)]
pub struct BindingEntry {
    /// Bound implementation type
    #[serde(rename = "type")]
    pub type_name: String,

    /// Type-level advice
    #[serde(default)]
    pub advices: Vec<String>,

    /// Type-level depth bound, overriding `[weaving]`
    #[serde(default)]
    pub depth: Option<u32>,

    /// Method-level bindings
    #[serde(default, rename = "method")]
    pub methods: Vec<MethodBindingEntry>,
}

/// A `[[binding.method]]` entry
#[derive(Debug, Deserialize)]
pub struct MethodBindingEntry {
    /// Method name
    pub name: String,

    /// Parameter types selecting one overload; absent selects all
    #[serde(default)]
    pub params: Option<Vec<String>>,

    /// Advice to run around the method
    pub advices: Vec<String>,
}

/// An `[[advice]]` entry
#[derive(Debug, Deserialize)]
pub struct AdviceEntry {
    /// Advice identifier
    pub id: String,

    /// Built-in interceptor kind: `logging` or `deny`
    pub kind: String,

    /// Log label for `logging` (defaults to the id)
    #[serde(default)]
    pub label: Option<String>,

    /// Refusal reason for `deny`
    #[serde(default)]
    pub reason: Option<String>,
}

/// An `[[aspect]]` entry
#[derive(Debug, Deserialize)]
pub struct AspectEntry {
    /// Target selector: `glob:..`, `regex:..` or an exact type name
    pub target: String,

    /// Pointcuts
    #[serde(default, rename = "pointcut")]
    pub pointcuts: Vec<PointcutEntry>,
}

/// An `[[aspect.pointcut]]` entry; unset fields are wildcards
#[derive(Debug, Deserialize)]
pub struct PointcutEntry {
    /// Method name
    #[serde(default)]
    pub method: Option<String>,

    /// Return type
    #[serde(default)]
    pub returns: Option<String>,

    /// Exact parameter list
    #[serde(default)]
    pub params: Option<Vec<String>>,

    /// Accepted access levels
    #[serde(default)]
    pub access: Option<Vec<Access>>,

    /// Declaration kind
    #[serde(default)]
    pub kind: CutPointKind,

    /// Hierarchy bound for type-level pointcuts
    #[serde(default)]
    pub depth: Option<u32>,

    /// Advice to run around matched methods
    pub advices: Vec<String>,
}

impl Manifest {
    /// Append another manifest's declarations to this one
    pub fn merge(&mut self, other: Self) {
        if other.weaving.is_some() {
            self.weaving = other.weaving;
        }
        self.types.extend(other.types);
        self.components.extend(other.components);
        self.bindings.extend(other.bindings);
        self.advices.extend(other.advices);
        self.aspects.extend(other.aspects);
    }
}

/// Parse manifest text
pub fn parse(content: &str, path: &Path) -> Result<Manifest, ManifestError> {
    toml::from_str(content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a manifest file
pub fn load_file(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Expand a path into manifest files
///
/// A file is returned as is. A directory is walked for files ending in
/// [`MANIFEST_SUFFIX`], sorted by path.
#[must_use]
pub fn find_manifests(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(MANIFEST_SUFFIX))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}
