//! Name-keyed lookup of block definitions.
//!
//! Keys are canonical names (see [`ngflow_syntax::naming`]). Aliases map a
//! canonical alternative spelling onto a defined name and are resolved
//! after canonicalization, so `@otherwise` and `@otherwise  ` both reach
//! the same entry. A non-canonical key never matches anything.

use std::collections::{BTreeMap, HashMap};

use ngflow_syntax::naming::{canonical_block_name, is_canonical_block_name};

use crate::ConfigError;
use crate::definition::BlockDefinition;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDefinitionTable {
    definitions: HashMap<String, BlockDefinition>,
    aliases: HashMap<String, String>,
}

impl BlockDefinitionTable {
    /// Build a table, checking that definitions are consistent with each
    /// other. Names must already be canonical.
    pub fn new(
        definitions: impl IntoIterator<Item = BlockDefinition>,
        aliases: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        let mut table = Self::default();

        for def in definitions {
            if !is_canonical_block_name(&def.name) {
                return Err(ConfigError::InvalidName { name: def.name });
            }
            if def.is_primary && def.primary_block.is_some() {
                return Err(ConfigError::ConflictingRole { name: def.name });
            }
            if def.max_count == Some(0) {
                return Err(ConfigError::InvalidMaxCount { name: def.name });
            }
            if table.definitions.contains_key(&def.name) {
                return Err(ConfigError::DuplicateBlock { name: def.name });
            }
            table.definitions.insert(def.name.clone(), def);
        }

        for def in table.definitions.values() {
            if let Some(primary) = &def.primary_block {
                if !table.definitions.get(primary).is_some_and(|p| p.is_primary) {
                    return Err(ConfigError::UnknownPrimary {
                        name: def.name.clone(),
                        primary: primary.clone(),
                    });
                }
            }
            if let Some(parent) = &def.parent {
                if !table.definitions.contains_key(parent) {
                    return Err(ConfigError::UnknownParent {
                        name: def.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        for (alias, target) in aliases {
            let alias = canonical_block_name(&alias);
            let target = canonical_block_name(&target);
            if alias.is_empty()
                || table.definitions.contains_key(&alias)
                || !table.definitions.contains_key(&target)
                || table.aliases.get(&alias).is_some_and(|t| *t != target)
            {
                return Err(ConfigError::AliasConflict { alias, target });
            }
            table.aliases.insert(alias, target);
        }

        Ok(table)
    }

    /// The Angular built-in control-flow blocks.
    pub fn angular() -> Self {
        Self {
            definitions: angular_definitions()
                .into_iter()
                .map(|def| (def.name.clone(), def))
                .collect(),
            aliases: HashMap::new(),
        }
    }

    /// Definition for a canonical name or alias.
    pub fn get(&self, name: &str) -> Option<&BlockDefinition> {
        let name = self.aliases.get(name).map_or(name, String::as_str);
        self.definitions.get(name)
    }

    /// Definition for raw source text such as `@else   if`.
    pub fn lookup(&self, raw: &str) -> Option<&BlockDefinition> {
        self.get(&canonical_block_name(raw))
    }

    /// The defined name a canonical name or alias refers to.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(|def| def.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        let sorted: BTreeMap<_, _> = self.definitions.iter().collect();
        sorted.into_values()
    }

    /// Aliases ordered by alias name, as `(alias, target)`.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        let sorted: BTreeMap<_, _> = self.aliases.iter().collect();
        sorted
            .into_iter()
            .map(|(alias, target)| (alias.as_str(), target.as_str()))
    }
}

pub(crate) fn angular_definitions() -> Vec<BlockDefinition> {
    vec![
        BlockDefinition::primary("if"),
        BlockDefinition::secondary("else if", "if"),
        BlockDefinition::secondary("else", "if").with_last(),
        BlockDefinition::primary("for"),
        BlockDefinition::secondary("empty", "for")
            .with_last()
            .with_max_count(1),
        BlockDefinition::standalone("switch"),
        BlockDefinition::standalone("case").with_parent("switch"),
        BlockDefinition::standalone("default").with_parent("switch"),
        BlockDefinition::primary("defer"),
        BlockDefinition::secondary("placeholder", "defer").with_max_count(1),
        BlockDefinition::secondary("loading", "defer").with_max_count(1),
        BlockDefinition::secondary("error", "defer").with_max_count(1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn no_aliases() -> Vec<(String, String)> {
        Vec::new()
    }

    #[test]
    fn angular_table_is_consistent() {
        let table = BlockDefinitionTable::angular();
        let rebuilt = BlockDefinitionTable::new(angular_definitions(), no_aliases()).unwrap();
        assert_eq!(table, rebuilt);
        assert_eq!(table.len(), 12);
    }

    #[rstest]
    #[case("if", true, None, false)]
    #[case("else if", false, Some("if"), false)]
    #[case("else", false, Some("if"), true)]
    #[case("for", true, None, false)]
    #[case("empty", false, Some("for"), true)]
    #[case("switch", false, None, false)]
    #[case("defer", true, None, false)]
    #[case("placeholder", false, Some("defer"), false)]
    fn angular_roles(
        #[case] name: &str,
        #[case] is_primary: bool,
        #[case] primary_block: Option<&str>,
        #[case] last: bool,
    ) {
        let table = BlockDefinitionTable::angular();
        let def = table.get(name).unwrap();
        assert_eq!(def.is_primary, is_primary);
        assert_eq!(def.primary_block.as_deref(), primary_block);
        assert_eq!(def.last, last);
    }

    #[test]
    fn lookup_canonicalizes_raw_text() {
        let table = BlockDefinitionTable::angular();
        assert_eq!(table.lookup("@else   if").unwrap().name, "else if");
        assert_eq!(table.lookup("@else\tif").unwrap().name, "else if");
    }

    #[rstest]
    #[case("else  if")]
    #[case("@if")]
    #[case(" if")]
    #[case("If")]
    #[case("unknown")]
    fn get_fails_closed(#[case] name: &str) {
        assert!(BlockDefinitionTable::angular().get(name).is_none());
    }

    #[test]
    fn aliases_resolve_to_target() {
        let table = BlockDefinitionTable::new(
            angular_definitions(),
            vec![("@otherwise".to_string(), "else".to_string())],
        )
        .unwrap();
        assert_eq!(table.resolve_name("otherwise"), Some("else"));
        assert_eq!(table.lookup("@otherwise").unwrap().name, "else");
        assert_eq!(table.aliases().collect::<Vec<_>>(), vec![("otherwise", "else")]);
    }

    #[test]
    fn alias_cannot_shadow_a_definition() {
        let err = BlockDefinitionTable::new(
            angular_definitions(),
            vec![("if".to_string(), "else".to_string())],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::AliasConflict { .. }));
    }

    #[test]
    fn alias_must_have_a_target() {
        let err = BlockDefinitionTable::new(
            angular_definitions(),
            vec![("otherwise".to_string(), "nope".to_string())],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::AliasConflict { .. }));
    }

    #[test]
    fn primary_with_primary_block_is_rejected() {
        let mut bad = BlockDefinition::primary("if");
        bad.primary_block = Some("if".to_string());
        let err = BlockDefinitionTable::new(vec![bad], no_aliases()).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingRole { name } if name == "if"));
    }

    #[test]
    fn secondary_needs_a_primary() {
        let err = BlockDefinitionTable::new(
            vec![
                BlockDefinition::standalone("switch"),
                BlockDefinition::secondary("case", "switch"),
            ],
            no_aliases(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPrimary { .. }));
    }

    #[test]
    fn parent_must_exist() {
        let err = BlockDefinitionTable::new(
            vec![BlockDefinition::standalone("case").with_parent("switch")],
            no_aliases(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParent { .. }));
    }

    #[test]
    fn duplicate_and_non_canonical_names_are_rejected() {
        let err = BlockDefinitionTable::new(
            vec![BlockDefinition::primary("if"), BlockDefinition::primary("if")],
            no_aliases(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateBlock { .. }));

        let err = BlockDefinitionTable::new(vec![BlockDefinition::primary("@if")], no_aliases())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidName { .. }));
    }

    #[test]
    fn zero_max_count_is_rejected() {
        let err = BlockDefinitionTable::new(
            vec![BlockDefinition::primary("if").with_max_count(0)],
            no_aliases(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxCount { .. }));
    }

    #[test]
    fn iter_is_sorted() {
        let table = BlockDefinitionTable::angular();
        let names: Vec<_> = table
            .iter()
            .map(|def| def.name.as_str())
            .take(3)
            .collect();
        assert_eq!(names, vec!["case", "default", "defer"]);
    }
}
