//! # Chain Resolution
//!
//! Sibling blocks such as
//!
//! ```text
//! @if (a) { ... } @else if (b) { ... } @else { ... }
//! ```
//!
//! form one logical construct, a *chain*. The first block is the
//! **primary**; the others are **secondaries** that name the primary they
//! continue. Chains are never stored: they are recomputed from the tree and
//! the definition table on every query.
//!
//! ## Walking
//!
//! Both directions use the same [`ChainWalk`] iterator over sibling
//! elements:
//!
//! 1. skip insignificant siblings (whitespace-only or zero-length)
//! 2. yield blocks while they belong to the chain
//! 3. stop on the first sibling that does not, or right after a terminal
//!
//! Forward, a block belongs if its definition continues the same primary
//! and the walk ends after a `last` block. Backward, the primary itself
//! also belongs and the walk ends after it. Any other sibling (text, an
//! element, a comment, an unknown block) ends the walk without being
//! yielded.
//!
//! Walks are lazy and single-pass; collect them to iterate again.

use ngflow_config::BlockDefinition;
use ngflow_syntax::{AstNode, Block, SyntaxElement};
use rowan::{Direction, NodeOrToken};
use thiserror::Error;

use crate::definitions::BlockDefinitions;

#[derive(Debug, Error)]
pub enum ChainError {
    /// Chains only exist between siblings, which a tree root has none of.
    #[error("Block @{name} is not attached to a document")]
    Detached { name: String },
}

/// How a block takes part in chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Primary,
    Secondary,
    Standalone,
    Unknown,
}

/// Chain queries against one set of definitions.
pub struct ChainResolver<'d, D: ?Sized> {
    defs: &'d D,
}

impl<'d, D: BlockDefinitions + ?Sized> ChainResolver<'d, D> {
    pub fn new(defs: &'d D) -> Self {
        Self { defs }
    }

    pub fn role(&self, block: &Block) -> BlockRole {
        match self.defs.definition(block) {
            None => BlockRole::Unknown,
            Some(def) if def.is_primary => BlockRole::Primary,
            Some(def) if def.primary_block.is_some() => BlockRole::Secondary,
            Some(_) => BlockRole::Standalone,
        }
    }

    pub fn is_primary(&self, block: &Block) -> bool {
        self.defs.definition(block).is_some_and(|def| def.is_primary)
    }

    /// Name of the primary block of the chain this block belongs to: its
    /// own (defined) name if primary, otherwise the primary it continues.
    pub fn primary_block_name(&self, block: &Block) -> Option<&'d str> {
        primary_name_of(self.defs.definition(block)?)
    }

    pub fn primary_block_definition(&self, block: &Block) -> Option<&'d BlockDefinition> {
        self.defs.definition_for_name(self.primary_block_name(block)?)
    }

    /// Later siblings continuing this block's chain.
    pub fn forward_chain(&self, block: &Block) -> Result<ChainWalk<'d, D>, ChainError> {
        ensure_attached(block)?;

        let Some(primary) = self.primary_block_name(block) else {
            return Ok(ChainWalk::empty(self.defs));
        };

        Ok(ChainWalk {
            defs: self.defs,
            primary,
            direction: Direction::Next,
            cursor: block.syntax().next_sibling_or_token(),
        })
    }

    /// Earlier siblings of this block's chain, nearest first, ending with
    /// the primary when one is reachable.
    pub fn backward_chain(&self, block: &Block) -> Result<ChainWalk<'d, D>, ChainError> {
        ensure_attached(block)?;

        let primary = self
            .defs
            .definition(block)
            .filter(|def| !def.is_primary)
            .and_then(|def| def.primary_block.as_deref());
        let Some(primary) = primary else {
            return Ok(ChainWalk::empty(self.defs));
        };

        Ok(ChainWalk {
            defs: self.defs,
            primary,
            direction: Direction::Prev,
            cursor: block.syntax().prev_sibling_or_token(),
        })
    }

    /// The head of this block's chain. `None` for orphaned secondaries,
    /// standalone and unknown blocks.
    pub fn primary_block(&self, block: &Block) -> Result<Option<Block>, ChainError> {
        ensure_attached(block)?;

        if self.is_primary(block) {
            return Ok(Some(block.clone()));
        }

        Ok(self
            .backward_chain(block)?
            .last()
            .filter(|head| self.is_primary(head)))
    }

    /// The whole chain in document order, starting from its primary when
    /// it has one, otherwise from `block`.
    pub fn chain(&self, block: &Block) -> Result<Vec<Block>, ChainError> {
        let head = self
            .primary_block(block)?
            .unwrap_or_else(|| block.clone());
        let mut chain = vec![head.clone()];
        chain.extend(self.forward_chain(&head)?);
        Ok(chain)
    }
}

fn primary_name_of(def: &BlockDefinition) -> Option<&str> {
    if def.is_primary {
        Some(&def.name)
    } else {
        def.primary_block.as_deref()
    }
}

fn ensure_attached(block: &Block) -> Result<(), ChainError> {
    match block.syntax().parent() {
        Some(_) => Ok(()),
        None => Err(ChainError::Detached { name: block.name() }),
    }
}

/// Lazy walk over the blocks of one chain in one direction.
pub struct ChainWalk<'d, D: ?Sized> {
    defs: &'d D,
    primary: &'d str,
    direction: Direction,
    cursor: Option<SyntaxElement>,
}

impl<'d, D: BlockDefinitions + ?Sized> ChainWalk<'d, D> {
    fn empty(defs: &'d D) -> Self {
        Self {
            defs,
            primary: "",
            direction: Direction::Next,
            cursor: None,
        }
    }

    fn step(&self, element: &SyntaxElement) -> Option<SyntaxElement> {
        match self.direction {
            Direction::Next => element.next_sibling_or_token(),
            Direction::Prev => element.prev_sibling_or_token(),
        }
    }

    fn is_member(&self, def: &BlockDefinition) -> bool {
        let continues = def.primary_block.as_deref() == Some(self.primary);
        match self.direction {
            Direction::Next => continues,
            Direction::Prev => continues || (def.is_primary && def.name == self.primary),
        }
    }

    fn is_terminal(&self, def: &BlockDefinition) -> bool {
        match self.direction {
            Direction::Next => def.last,
            Direction::Prev => def.is_primary,
        }
    }

    fn stop(&mut self, element: &SyntaxElement) -> Option<Block> {
        log::trace!(
            "Chain walk for @{} stopped at {:?} {:?}",
            self.primary,
            element.kind(),
            element.text_range()
        );
        self.cursor = None;
        None
    }
}

impl<D: BlockDefinitions + ?Sized> Iterator for ChainWalk<'_, D> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        while let Some(element) = self.cursor.take() {
            self.cursor = self.step(&element);

            if is_insignificant(&element) {
                continue;
            }

            let Some(block) = element.as_node().cloned().and_then(Block::cast) else {
                return self.stop(&element);
            };
            let Some(def) = self.defs.definition(&block).filter(|def| self.is_member(def))
            else {
                return self.stop(&element);
            };

            if self.is_terminal(def) {
                self.cursor = None;
            }
            return Some(block);
        }
        None
    }
}

/// Whitespace-only or zero-length siblings never affect chains.
fn is_insignificant(element: &SyntaxElement) -> bool {
    match element {
        NodeOrToken::Token(token) => {
            token.kind().is_trivia() || token.text().trim().is_empty()
        }
        NodeOrToken::Node(node) => node
            .text()
            .try_for_each_chunk(|chunk| {
                if chunk.trim().is_empty() {
                    Ok(())
                } else {
                    Err(())
                }
            })
            .is_ok(),
    }
}
