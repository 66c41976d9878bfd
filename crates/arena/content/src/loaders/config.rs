//! Combat balance loader.

use std::path::Path;

use arena_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Embedded default balance table.
const BUILTIN_COMBAT_TOML: &str = include_str!("../../data/combat.toml");

/// Loader for combat balance tables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a balance table from a TOML file.
    ///
    /// Keys missing from the file keep their [`CombatConfig::default`] value.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a balance table from TOML text.
    pub fn from_toml(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }

    /// The balance table shipped with the crate.
    pub fn builtin() -> LoadResult<CombatConfig> {
        Self::from_toml(BUILTIN_COMBAT_TOML)
    }
}

fn validate(config: &CombatConfig) -> LoadResult<()> {
    let probabilities = [
        ("special_chance", config.special_chance),
        ("miss_chance", config.miss_chance),
        ("crit_chance", config.crit_chance),
    ];
    for (key, value) in probabilities {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("{} must be within 0..=1, got {}", key, value);
        }
    }
    if config.variance_min > config.variance_max {
        anyhow::bail!(
            "variance_min ({}) is greater than variance_max ({})",
            config.variance_min,
            config.variance_max
        );
    }
    if config.max_rounds == 0 {
        anyhow::bail!("max_rounds must be at least 1");
    }
    Ok(())
}
