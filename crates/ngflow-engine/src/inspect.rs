//! Document-wide checks built on chain resolution.

use std::collections::HashMap;
use std::fmt;

use ngflow_syntax::{AstNode, Block, Root};
use rowan::TextRange;

use crate::chain::ChainResolver;
use crate::definitions::BlockDefinitions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// No definition for this block name.
    UnknownBlock,
    /// A secondary block with no reachable primary.
    OrphanedSecondary,
    /// A secondary block placed after its chain's `last` block.
    AfterTerminal,
    /// More occurrences in one chain than `max_count` allows.
    TooMany,
    /// A block with a required parent that is not directly inside it.
    MisplacedChild,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Canonical name of the offending block.
    pub name: String,
    /// Range of the block's `@name` token.
    pub range: TextRange,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        match self.kind {
            DiagnosticKind::UnknownBlock => write!(f, "unknown block @{name}"),
            DiagnosticKind::OrphanedSecondary => {
                write!(f, "@{name} does not follow the block it continues")
            }
            DiagnosticKind::AfterTerminal => {
                write!(f, "@{name} follows the final block of its chain")
            }
            DiagnosticKind::TooMany => write!(f, "@{name} appears too many times in this chain"),
            DiagnosticKind::MisplacedChild => {
                write!(f, "@{name} must be directly inside its parent block")
            }
        }
    }
}

/// Check every block in the document, in document order.
pub fn inspect<D: BlockDefinitions + ?Sized>(root: &Root, defs: &D) -> Vec<Diagnostic> {
    let resolver = ChainResolver::new(defs);
    let mut diagnostics = Vec::new();

    for block in root.blocks() {
        let Some(def) = defs.definition(&block) else {
            diagnostics.push(diagnostic(DiagnosticKind::UnknownBlock, &block));
            continue;
        };

        if let Some(parent) = &def.parent {
            let in_parent = block
                .enclosing_block()
                .and_then(|enclosing| defs.definition(&enclosing))
                .is_some_and(|enclosing| enclosing.name == *parent);
            if !in_parent {
                diagnostics.push(diagnostic(DiagnosticKind::MisplacedChild, &block));
            }
        }

        if def.is_primary {
            diagnostics.extend(too_many(&resolver, defs, &block));
        } else if def.primary_block.is_some() {
            diagnostics.extend(secondary_placement(&resolver, defs, &block));
        }
    }

    diagnostics.sort_by_key(|d| d.range.start());
    diagnostics
}

fn diagnostic(kind: DiagnosticKind, block: &Block) -> Diagnostic {
    let range = block
        .name_token()
        .map_or_else(|| block.syntax().text_range(), |token| token.text_range());
    Diagnostic {
        kind,
        name: block.name(),
        range,
    }
}

fn secondary_placement<D: BlockDefinitions + ?Sized>(
    resolver: &ChainResolver<'_, D>,
    defs: &D,
    block: &Block,
) -> Option<Diagnostic> {
    let earlier: Vec<Block> = resolver.backward_chain(block).ok()?.collect();
    let reaches_primary = earlier.last().is_some_and(|head| resolver.is_primary(head));

    if !reaches_primary {
        return Some(diagnostic(DiagnosticKind::OrphanedSecondary, block));
    }

    let follows_terminal = earlier
        .iter()
        .filter_map(|b| defs.definition(b))
        .any(|def| def.last && !def.is_primary);
    follows_terminal.then(|| diagnostic(DiagnosticKind::AfterTerminal, block))
}

/// Occurrences past `max_count` in the chain headed by `primary`.
fn too_many<D: BlockDefinitions + ?Sized>(
    resolver: &ChainResolver<'_, D>,
    defs: &D,
    primary: &Block,
) -> Vec<Diagnostic> {
    let Ok(walk) = resolver.forward_chain(primary) else {
        return Vec::new();
    };

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut diagnostics = Vec::new();
    for block in walk {
        let Some(def) = defs.definition(&block) else {
            continue;
        };
        let count = seen.entry(def.name.as_str()).or_default();
        *count += 1;
        if def.max_count.is_some_and(|max| *count > max) {
            diagnostics.push(diagnostic(DiagnosticKind::TooMany, &block));
        }
    }
    diagnostics
}
