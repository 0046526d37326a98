//! Mapping store: the health rule tables loaded once at startup

use std::fs;
use std::path::Path;

use anyhow::Context;
use shared::{PreventionTable, RuleTable};

use crate::config::MappingsConfig;

/// Rule and prevention tables, immutable for the process lifetime
#[derive(Debug, Clone)]
pub struct HealthMappings {
    pub rules: RuleTable,
    pub preventions: PreventionTable,
}

impl HealthMappings {
    /// Parse both tables from JSON documents
    pub fn from_json(rules: &str, preventions: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            rules: serde_json::from_str(rules)?,
            preventions: serde_json::from_str(preventions)?,
        })
    }

    /// Read both tables from the configured files
    pub fn load(config: &MappingsConfig) -> anyhow::Result<Self> {
        let rules = read_table(&config.rules_path)?;
        let preventions = read_table(&config.preventions_path)?;

        let mappings = Self::from_json(&rules, &preventions)
            .context("Failed to parse health mapping tables")?;

        tracing::info!(
            "Loaded {} condition rules and {} prevention entries",
            mappings.rules.conditions.len(),
            mappings.preventions.len()
        );

        Ok(mappings)
    }
}

fn read_table(path: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
