/// How one block name takes part in chains.
///
/// A definition is either primary (it starts a chain), secondary (it names
/// the primary it continues via `primary_block`) or standalone (neither).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDefinition {
    pub name: String,
    pub is_primary: bool,
    pub primary_block: Option<String>,
    /// Nothing after this block belongs to the chain.
    pub last: bool,
    /// Name of the block whose contents must directly hold this one.
    pub parent: Option<String>,
    /// Maximum occurrences of this block within one chain.
    pub max_count: Option<usize>,
}

impl BlockDefinition {
    /// A block that starts a chain.
    pub fn primary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_primary: true,
            ..Self::standalone("")
        }
    }

    /// A block that continues the chain started by `primary_block`.
    pub fn secondary(name: impl Into<String>, primary_block: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_block: Some(primary_block.into()),
            ..Self::standalone("")
        }
    }

    /// A block that takes part in no chain.
    pub fn standalone(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_primary: false,
            primary_block: None,
            last: false,
            parent: None,
            max_count: None,
        }
    }

    pub fn with_last(mut self) -> Self {
        self.last = true;
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub fn is_secondary(&self) -> bool {
        self.primary_block.is_some()
    }

    pub fn is_standalone(&self) -> bool {
        !self.is_primary && self.primary_block.is_none()
    }
}
