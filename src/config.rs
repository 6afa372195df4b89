//! Weaving configuration
//!
//! Settings that shape the pointcuts the registrar derives from type-level
//! bindings. Read from the `[weaving]` table of a TOML file; a missing file
//! or table falls back to defaults.
//!
//! ```toml
//! [weaving]
//! type_level_depth = 1
//! type_level_access = ["public"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::models::{Access, AccessMask, Depth};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaveConfig {
    /// Type-level pointcut settings
    #[serde(default)]
    pub weaving: WeavingConfig,
}

/// Settings for type-level pointcuts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeavingConfig {
    /// How far up the hierarchy a type-level binding reaches (absent: no limit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_level_depth: Option<u32>,

    /// Access levels a type-level binding intercepts
    #[serde(default = "default_access")]
    pub type_level_access: Vec<Access>,
}

fn default_access() -> Vec<Access> {
    vec![Access::Public, Access::Protected]
}

impl Default for WeavingConfig {
    fn default() -> Self {
        Self {
            type_level_depth: None,
            type_level_access: default_access(),
        }
    }
}

impl WeaveConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file, or defaults if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Depth bound for type-level pointcuts
    #[must_use]
    pub fn type_level_depth(&self) -> Depth {
        Depth::from(self.weaving.type_level_depth)
    }

    /// Access mask for type-level pointcuts
    #[must_use]
    pub fn type_level_access(&self) -> AccessMask {
        self.weaving.type_level_access.iter().copied().collect()
    }
}
