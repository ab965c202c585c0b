//! # ngflow-syntax
//!
//! A lossless syntax tree for Angular-style templates with control-flow
//! blocks, using [Rowan] + [Logos] and following the [rust-analyzer]
//! architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The tree preserves **every byte** of the input, including whitespace
//! between blocks. That whitespace matters: chain resolution walks siblings
//! and has to see (and skip) it.
//!
//! ## Blocks
//!
//! ```text
//! @if (user.isAdmin) {
//!   <admin-panel/>
//! } @else if (user) {
//!   Hello {{ user.name }}
//! } @else {
//!   <login-form/>
//! }
//! ```
//!
//! parses into three sibling `BLOCK` nodes under `ROOT`, each holding a
//! `BLOCK_NAME` token, optional `BLOCK_PARAMETERS` and optional
//! `BLOCK_CONTENTS`. Whether they form one chain is decided later, by the
//! engine, from block definitions; the parser knows nothing about `if` or
//! `else`.
//!
//! ## Module Structure
//!
//! ```text
//! ngflow-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens, markers, nodes)
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── naming.rs        # Canonical block names
//! ├── ast.rs           # Typed views: Root, Block, BlockParameter, ...
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Root and shared content loop
//!         ├── block.rs # Blocks, parameters, bodies
//!         └── markup.rs# Text, elements, interpolations, expansion forms
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ngflow_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("@if (ready) { go } @else { wait }");
//!
//! assert_eq!(tree.text().to_string(), "@if (ready) { go } @else { wait }");
//!
//! let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
//! assert_eq!(kinds, vec![SyntaxKind::BLOCK, SyntaxKind::BLOCK]);
//! ```

pub mod ast;
pub mod lexer;
pub mod naming;
pub mod parser;
pub mod syntax_kind;

pub use ast::{AstNode, Block, BlockContents, BlockParameter, Root};
pub use naming::canonical_block_name;
pub use parser::parse;
pub use syntax_kind::{
    SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TemplateLang, TokenCategory,
};
