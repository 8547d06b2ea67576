//! Shared state built once per invocation.

use anyhow::{anyhow, Context, Result};
use atrium_authorization::RoleStore;
use atrium_core::{AtriumConfig, Role, RoleId};
use atrium_navigation::{default_navigation, NavigationTree};
use std::path::Path;
use std::sync::Arc;

/// Loaded configuration, role store and navigation tree.
pub struct CliContext {
    pub config: AtriumConfig,
    pub roles: Arc<RoleStore>,
    pub navigation: NavigationTree,
    pub json: bool,
}

impl CliContext {
    pub fn load(config_path: &Path, json: bool) -> Result<Self> {
        let config = AtriumConfig::load(config_path)
            .with_context(|| format!("loading {}", config_path.display()))?;
        let roles = Arc::new(RoleStore::from_config(&config)?);
        let navigation = match &config.navigation {
            Some(path) => NavigationTree::load(path)?,
            None => default_navigation(),
        };
        Ok(Self {
            config,
            roles,
            navigation,
            json,
        })
    }

    /// Look up a role, failing with the list of known ids.
    pub fn role(&self, id: &str) -> Result<&Role> {
        self.roles.find_role(&RoleId::new(id)).ok_or_else(|| {
            let known: Vec<_> = self.roles.list_roles().map(|r| r.id().as_str()).collect();
            anyhow!("unknown role '{id}' (known: {})", known.join(", "))
        })
    }

    /// Print `value` as pretty JSON.
    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
