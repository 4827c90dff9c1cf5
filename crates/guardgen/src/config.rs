//! Configuration for guardgen.
//!
//! Loaded from `.guardgen/config.toml` under the project root, or from an
//! explicit path. Every key is optional; unset keys fall back to defaults.
//!
//! Example config.toml:
//! ```toml
//! source = "types.ts"
//! output = "schema.js"
//!
//! [policy]
//! required = ["title", "category"]
//! temporal_types = ["Date"]
//! server_managed = [
//!     { name = "id", type = "number" },
//!     { name = "createdAt", type = "string" },
//!     { name = "updatedAt", type = "string" },
//! ]
//! ```

use crate::policy::{Policy, ServerManagedField};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_SOURCE: &str = "types.ts";
const DEFAULT_OUTPUT: &str = "schema.js";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Field policy overrides.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    /// Fields assigned by the server; never accepted from the declaration.
    pub server_managed: Option<Vec<ServerManagedField>>,
    /// Fields forced to mandatory strings.
    pub required: Option<Vec<String>>,
    /// Reference names validated as ISO date-time strings.
    pub temporal_types: Option<Vec<String>>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GuardgenConfig {
    /// Declaration source, relative to the project root.
    pub source: Option<PathBuf>,
    /// Generated artifact, relative to the project root.
    pub output: Option<PathBuf>,
    pub policy: PolicyConfig,
}

impl GuardgenConfig {
    /// Load configuration for a project.
    ///
    /// A missing `.guardgen/config.toml` yields the defaults; a malformed one is an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(".guardgen").join("config.toml");
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load config from an explicit file path.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn source(&self) -> &Path {
        self.source
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SOURCE))
    }

    pub fn output(&self) -> &Path {
        self.output
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT))
    }

    /// Resolve the policy, filling unset keys with defaults.
    pub fn policy(&self) -> Policy {
        let defaults = Policy::default();
        Policy {
            server_managed: self
                .policy
                .server_managed
                .clone()
                .unwrap_or(defaults.server_managed),
            required: self.policy.required.clone().unwrap_or(defaults.required),
            temporal_types: self
                .policy
                .temporal_types
                .clone()
                .unwrap_or(defaults.temporal_types),
        }
    }
}
