//! Hook configuration loading
//!
//! Parses a YAML or JSON document mapping event names to hook lists into the
//! typed model consumed by [`HookRunner`](crate::hooks::HookRunner).
//! Validation happens here; the runner assumes well-formed hooks.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use serde::{Deserialize, Serialize};

use crate::hooks::Hook;

/// Top-level hook configuration document.
///
/// ```yaml
/// hooks:
///   after_move:
///     - type: exec
///       cmd: notify-send
///       args: ["moved {name}"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Event name → ordered hook list. Order defines execution order.
    #[serde(default)]
    pub hooks: HashMap<String, Vec<Hook>>,
}

impl HooksConfig {
    /// Load and validate a hook configuration file.
    ///
    /// The format is picked by extension: `.yaml`/`.yml` or `.json`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read hook config {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML in {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON in {}", path.display()))?,
            other => bail!(
                "unsupported hook config extension '{}' (expected yaml, yml, or json)",
                other
            ),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check per-hook invariants across the whole document.
    pub fn validate(&self) -> Result<()> {
        for (event, hooks) in &self.hooks {
            for (idx, hook) in hooks.iter().enumerate() {
                hook.validate()
                    .with_context(|| format!("hooks.{event}[{idx}]"))?;
            }
        }
        Ok(())
    }

    /// Consume the config into the runner's registry form.
    pub fn into_registry(self) -> HashMap<String, Vec<Hook>> {
        self.hooks
    }
}
