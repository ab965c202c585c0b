//! Versioned access to the current definition table.
//!
//! Readers take an `Arc` snapshot and keep using it for the duration of a
//! query, so a concurrent [`DefinitionProvider::update`] never changes a
//! table underneath a running chain walk.

use std::path::Path;
use std::sync::{Arc, RwLock};

use crate::{BlockConfig, BlockDefinitionTable, ConfigError};

#[derive(Debug)]
struct State {
    version: u64,
    table: Arc<BlockDefinitionTable>,
}

#[derive(Debug)]
pub struct DefinitionProvider {
    state: RwLock<State>,
}

impl Default for DefinitionProvider {
    fn default() -> Self {
        Self::new(Arc::new(BlockDefinitionTable::angular()))
    }
}

impl DefinitionProvider {
    pub fn new(table: Arc<BlockDefinitionTable>) -> Self {
        Self {
            state: RwLock::new(State { version: 0, table }),
        }
    }

    /// Provider for the definitions in `config_path`, or the built-ins if
    /// the file does not exist.
    pub fn from_config_file<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config = BlockConfig::load_from_path(config_path)?.unwrap_or_default();
        Ok(Self::new(Arc::new(config.into_table()?)))
    }

    /// The current table. Cheap: the table is built once per version.
    pub fn table(&self) -> Arc<BlockDefinitionTable> {
        match self.state.read() {
            Ok(state) => Arc::clone(&state.table),
            Err(poisoned) => Arc::clone(&poisoned.into_inner().table),
        }
    }

    pub fn version(&self) -> u64 {
        match self.state.read() {
            Ok(state) => state.version,
            Err(poisoned) => poisoned.into_inner().version,
        }
    }

    /// Rebuild from a new configuration. On error the current table stays.
    pub fn update(&self, config: BlockConfig) -> Result<u64, ConfigError> {
        let table = Arc::new(config.into_table()?);
        let mut state = match self.state.write() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.version += 1;
        state.table = table;
        log::debug!(
            "Rebuilt block definition table v{} ({} definitions)",
            state.version,
            state.table.len()
        );
        Ok(state.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockEntry;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn unless_config() -> BlockConfig {
        BlockConfig {
            builtin: false,
            blocks: vec![BlockEntry {
                name: "unless".to_string(),
                primary: true,
                primary_block: None,
                last: false,
                parent: None,
                max_count: None,
                aliases: Vec::new(),
            }],
        }
    }

    #[test]
    fn default_provides_angular_table() {
        let provider = DefinitionProvider::default();
        assert_eq!(provider.version(), 0);
        assert!(provider.table().get("if").is_some());
    }

    #[test]
    fn table_is_shared_until_update() {
        let provider = DefinitionProvider::default();
        let first = provider.table();
        let second = provider.table();
        assert!(Arc::ptr_eq(&first, &second));

        assert_eq!(provider.update(unless_config()).unwrap(), 1);
        let third = provider.table();
        assert!(!Arc::ptr_eq(&first, &third));
        assert!(third.get("unless").is_some());
        // Earlier snapshots are unaffected
        assert!(first.get("if").is_some());
    }

    #[test]
    fn failed_update_keeps_current_table() {
        let provider = DefinitionProvider::default();
        let mut bad = unless_config();
        bad.blocks[0].primary_block = Some("if".to_string());

        assert!(provider.update(bad).is_err());
        assert_eq!(provider.version(), 0);
        assert!(provider.table().get("if").is_some());
    }

    #[test]
    fn from_missing_config_file_uses_builtins() {
        let temp_dir = TempDir::new().unwrap();
        let provider = DefinitionProvider::from_config_file(temp_dir.path().join("none.toml"))
            .unwrap();
        assert_eq!(*provider.table(), BlockDefinitionTable::angular());
    }

    #[test]
    fn from_config_file_reads_entries() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("blocks.toml");
        unless_config().save_to_path(&config_file).unwrap();

        let provider = DefinitionProvider::from_config_file(&config_file).unwrap();
        assert_eq!(provider.table().len(), 1);
    }
}
