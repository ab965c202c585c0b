use ngflow_config::{BlockDefinition, BlockDefinitionTable};
use ngflow_syntax::Block;

/// Where the engine gets block definitions from.
///
/// Lookups are by canonical name; a name that is not canonical, or that
/// nothing defines, has no definition.
pub trait BlockDefinitions {
    fn definition_for_name(&self, name: &str) -> Option<&BlockDefinition>;

    fn definition(&self, block: &Block) -> Option<&BlockDefinition> {
        self.definition_for_name(&block.name())
    }
}

impl BlockDefinitions for BlockDefinitionTable {
    fn definition_for_name(&self, name: &str) -> Option<&BlockDefinition> {
        self.get(name)
    }
}
