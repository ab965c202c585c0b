//! # ngflow-engine
//!
//! Chain resolution over the syntax trees built by `ngflow-syntax`, driven
//! by the definitions from `ngflow-config`.
//!
//! ```
//! use ngflow_config::BlockDefinitionTable;
//! use ngflow_engine::ChainResolver;
//! use ngflow_syntax::{parse, AstNode, Root};
//!
//! let root = Root::cast(parse("@if (a) {} @else if (b) {} @else {}")).unwrap();
//! let blocks: Vec<_> = root.blocks().collect();
//! let table = BlockDefinitionTable::angular();
//! let resolver = ChainResolver::new(&table);
//!
//! let head = resolver.primary_block(&blocks[2]).unwrap();
//! assert_eq!(head, Some(blocks[0].clone()));
//!
//! let rest: Vec<_> = resolver.forward_chain(&blocks[0]).unwrap().map(|b| b.name()).collect();
//! assert_eq!(rest, ["else if", "else"]);
//! ```

pub mod chain;
pub mod definitions;
pub mod inspect;

pub use chain::{BlockRole, ChainError, ChainResolver, ChainWalk};
pub use definitions::BlockDefinitions;
pub use inspect::{Diagnostic, DiagnosticKind, inspect};
