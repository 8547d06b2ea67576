//! Atrium configuration
//!
//! Configuration is layered: defaults, then an optional TOML file, then
//! `ATRIUM_*` environment overrides, then validation.
//!
//! ```toml
//! log_level = "info"
//! navigation = "nav.toml"
//! default_user = "u-001"
//!
//! [[roles]]
//! id = "auditor"
//! name = "Auditor"
//! permissions = ["employees.view", "reports.view"]
//! ```

use crate::errors::{AtriumError, AtriumResult};
use crate::identity::{RoleId, UserId};
use crate::permission::PermissionToken;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ATRIUM_";

/// Role definition as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Longer description
    #[serde(default)]
    pub description: String,
    /// Granted tokens as raw strings
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleDefinition {
    /// Parse the tokens and build an immutable [`Role`].
    pub fn to_role(&self) -> AtriumResult<Role> {
        let permissions = self
            .permissions
            .iter()
            .map(|raw| PermissionToken::parse(raw.as_str()))
            .collect::<AtriumResult<Vec<_>>>()?;
        Ok(Role::new(
            RoleId::new(self.id.as_str()),
            self.name.as_str(),
            self.description.as_str(),
            permissions,
        ))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtriumConfig {
    /// Tracing filter used when no `RUST_LOG`-style override is given
    pub log_level: String,
    /// Optional TOML file holding a navigation tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<PathBuf>,
    /// Optional user the demo session starts as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<UserId>,
    /// Role catalog; empty means "use the built-in catalog"
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleDefinition>,
}

impl Default for AtriumConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            navigation: None,
            default_user: None,
            roles: Vec::new(),
        }
    }
}

impl AtriumConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> AtriumResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> AtriumResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            AtriumError::io(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content).map_err(|e| {
            AtriumError::config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Full load: file, environment, validation.
    pub fn load(path: &Path) -> AtriumResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.merge_with_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `ATRIUM_*` overrides from the process environment.
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(std::env::vars());
    }

    /// Apply overrides from `(key, value)` pairs; unknown keys are ignored.
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(key) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match key {
                "LOG_LEVEL" => self.log_level = value.into(),
                "NAVIGATION" => self.navigation = Some(PathBuf::from(value.into())),
                "DEFAULT_USER" => self.default_user = Some(UserId::new(value)),
                _ => {}
            }
        }
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> AtriumResult<()> {
        if self.log_level.trim().is_empty() {
            return Err(AtriumError::config("log_level must not be empty"));
        }
        let mut seen = BTreeSet::new();
        for definition in &self.roles {
            if definition.id.trim().is_empty() {
                return Err(AtriumError::config("role id must not be empty"));
            }
            if !seen.insert(definition.id.as_str()) {
                return Err(AtriumError::config(format!(
                    "duplicate role id '{}'",
                    definition.id
                )));
            }
            definition.to_role()?;
        }
        Ok(())
    }

    /// Build the configured roles. Empty when the built-in catalog applies.
    pub fn configured_roles(&self) -> AtriumResult<Vec<Role>> {
        self.roles.iter().map(RoleDefinition::to_role).collect()
    }
}
