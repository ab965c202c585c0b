pub mod definition;
pub mod provider;
pub mod table;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use definition::BlockDefinition;
pub use provider::DefinitionProvider;
pub use table::BlockDefinitionTable;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Block name {name:?} is empty or not canonical")]
    InvalidName { name: String },

    #[error("Block {name:?} is primary and also names a primary block")]
    ConflictingRole { name: String },

    #[error("Block {name:?} is defined more than once")]
    DuplicateBlock { name: String },

    #[error("Block {name:?} continues {primary:?}, which is not a primary block")]
    UnknownPrimary { name: String, primary: String },

    #[error("Block {name:?} must be nested in {parent:?}, which is not defined")]
    UnknownParent { name: String, parent: String },

    #[error("Block {name:?} has max_count 0")]
    InvalidMaxCount { name: String },

    #[error("Alias {alias:?} for {target:?} clashes with a block name or another alias")]
    AliasConflict { alias: String, target: String },
}

/// One `[[block]]` entry of a definitions file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_block: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub last: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !value
}

fn default_true() -> bool {
    true
}

/// Block definitions as written in `blocks.toml`.
///
/// Entries are layered over the Angular built-ins unless `builtin = false`;
/// an entry with the same name as a built-in replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    #[serde(default = "default_true")]
    pub builtin: bool,
    #[serde(default, rename = "block")]
    pub blocks: Vec<BlockEntry>,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            blocks: Vec::new(),
        }
    }
}

impl BlockConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: BlockConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/ngflow");
        PathBuf::from(config_dir.as_ref()).join("blocks.toml")
    }

    /// Expand `~` and environment variables in a user-supplied path.
    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// Validate and build the lookup table.
    pub fn into_table(self) -> Result<BlockDefinitionTable, ConfigError> {
        let mut definitions = if self.builtin {
            table::angular_definitions()
        } else {
            Vec::new()
        };
        let mut aliases = Vec::new();

        for entry in self.blocks {
            let def = entry.to_definition();
            aliases.extend(
                entry
                    .aliases
                    .into_iter()
                    .map(|alias| (alias, def.name.clone())),
            );
            definitions.retain(|existing| existing.name != def.name);
            definitions.push(def);
        }

        BlockDefinitionTable::new(definitions, aliases)
    }
}

impl BlockEntry {
    fn to_definition(&self) -> BlockDefinition {
        BlockDefinition {
            name: ngflow_syntax::canonical_block_name(&self.name),
            is_primary: self.primary,
            primary_block: self
                .primary_block
                .as_deref()
                .map(ngflow_syntax::canonical_block_name),
            last: self.last,
            parent: self
                .parent
                .as_deref()
                .map(ngflow_syntax::canonical_block_name),
            max_count: self.max_count,
        }
    }
}
