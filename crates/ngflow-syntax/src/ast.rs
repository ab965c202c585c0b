//! Typed views over the untyped Rowan tree.
//!
//! Each view wraps a [`SyntaxNode`] of one kind and exposes accessors for
//! its parts. Views never own anything: cloning one clones a cheap
//! reference-counted handle into the same tree, and sibling or parent
//! navigation always goes through the underlying node.

use crate::naming::canonical_block_name;
use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed view over a node of a specific kind.
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then_some(Self { syntax: node })
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

ast_node!(
    /// The document root.
    Root,
    ROOT
);
ast_node!(
    /// One occurrence of `@name (parameters) { contents }`.
    Block,
    BLOCK
);
ast_node!(
    /// The parenthesised parameter list of a block.
    BlockParameters,
    BLOCK_PARAMETERS
);
ast_node!(
    /// A single `;`-separated parameter.
    BlockParameter,
    BLOCK_PARAMETER
);
ast_node!(
    /// The braced body of a block.
    BlockContents,
    BLOCK_CONTENTS
);

impl Root {
    /// Every block in the document, in document order, at any depth.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + use<> {
        self.syntax.descendants().filter_map(Block::cast)
    }
}

impl Block {
    /// The raw `@name` token.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SyntaxKind::BLOCK_NAME)
    }

    /// Canonical block name, empty if the node has no name token.
    pub fn name(&self) -> String {
        self.name_token()
            .map(|token| canonical_block_name(token.text()))
            .unwrap_or_default()
    }

    /// Parameters in source order. Empty when the block has no `(...)`.
    pub fn parameters(&self) -> Vec<BlockParameter> {
        self.syntax
            .children()
            .find_map(BlockParameters::cast)
            .map(|params| params.parameters().collect())
            .unwrap_or_default()
    }

    /// The braced body, absent when the block has no `{`.
    pub fn contents(&self) -> Option<BlockContents> {
        self.syntax.children().find_map(BlockContents::cast)
    }

    /// The block whose body directly contains this block.
    pub fn enclosing_block(&self) -> Option<Block> {
        let contents = self.syntax.parent().and_then(BlockContents::cast)?;
        contents.syntax.parent().and_then(Block::cast)
    }
}

impl BlockParameters {
    pub fn parameters(&self) -> impl Iterator<Item = BlockParameter> + use<> {
        self.syntax.children().filter_map(BlockParameter::cast)
    }

    /// True if the list ends with `)`.
    pub fn is_closed(&self) -> bool {
        self.syntax
            .last_token()
            .is_some_and(|token| token.kind() == SyntaxKind::BLOCK_PARAMETERS_END)
    }
}

impl BlockParameter {
    /// Parameter source text without surrounding whitespace.
    pub fn text(&self) -> String {
        self.syntax.text().to_string().trim().to_string()
    }

    /// Leading word of the parameter, e.g. `track` in `track item.id`.
    pub fn prefix(&self) -> Option<String> {
        self.text().split_whitespace().next().map(str::to_string)
    }
}

impl BlockContents {
    /// Blocks directly inside this body.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + use<> {
        self.syntax.children().filter_map(Block::cast)
    }

    /// True if the body ends with `}`.
    pub fn is_closed(&self) -> bool {
        self.syntax
            .last_token()
            .is_some_and(|token| token.kind() == SyntaxKind::BLOCK_END)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    fn blocks(source: &str) -> Vec<Block> {
        let root = Root::cast(parse(source)).unwrap();
        root.blocks().collect()
    }

    #[test]
    fn block_name_is_canonical() {
        let blocks = blocks("@else   if (x) {}");
        assert_eq!(blocks[0].name(), "else if");
        assert_eq!(blocks[0].name_token().unwrap().text(), "@else   if");
    }

    #[test]
    fn parameters_in_order() {
        let blocks = blocks("@for (item of items; track item.id; let i = $index) {}");
        let params: Vec<_> = blocks[0].parameters().iter().map(|p| p.text()).collect();
        assert_eq!(
            params,
            vec!["item of items", "track item.id", "let i = $index"]
        );
        let prefixes: Vec<_> = blocks[0]
            .parameters()
            .iter()
            .map(|p| p.prefix().unwrap())
            .collect();
        assert_eq!(prefixes, vec!["item", "track", "let"]);
    }

    #[test]
    fn nested_parens_stay_in_one_parameter() {
        let blocks = blocks("@if (check(a; b)) {}");
        let params: Vec<_> = blocks[0].parameters().iter().map(|p| p.text()).collect();
        assert_eq!(params, vec!["check(a; b)"]);
    }

    #[test]
    fn block_without_parameters() {
        let blocks = blocks("@else { x }");
        assert!(blocks[0].parameters().is_empty());
        assert!(blocks[0].contents().is_some());
    }

    #[test]
    fn block_without_body_has_no_contents() {
        let blocks = blocks("@else");
        assert_eq!(blocks[0].name(), "else");
        assert!(blocks[0].contents().is_none());
    }

    #[test]
    fn unclosed_body_is_reported() {
        let open = blocks("@if (a) { open");
        assert!(!open[0].contents().unwrap().is_closed());

        let closed = blocks("@if (a) { closed }");
        assert!(closed[0].contents().unwrap().is_closed());
    }

    #[test]
    fn unclosed_parameters_leave_body_intact() {
        let blocks = blocks("@if (a {x}");
        let params = blocks[0]
            .syntax()
            .children()
            .find_map(BlockParameters::cast)
            .unwrap();
        assert!(!params.is_closed());
        assert_eq!(blocks[0].contents().unwrap().syntax().text(), "{x}");
    }

    #[test]
    fn enclosing_block_is_direct_parent_block() {
        let blocks = blocks("@switch (v) { @case (1) { <p>@if (a) {}</p> } }");
        let names: Vec<_> = blocks.iter().map(Block::name).collect();
        assert_eq!(names, vec!["switch", "case", "if"]);

        assert_eq!(blocks[1].enclosing_block(), Some(blocks[0].clone()));
        // Inside an element, not directly in the case body
        assert_eq!(blocks[2].enclosing_block(), None);
        assert_eq!(blocks[0].enclosing_block(), None);
    }

    #[test]
    fn contents_lists_direct_blocks() {
        let blocks = blocks("@switch (v) { @case (1) { @if (a) {} } @default {} }");
        let direct: Vec<_> = blocks[0]
            .contents()
            .unwrap()
            .blocks()
            .map(|b| b.name())
            .collect();
        assert_eq!(direct, vec!["case", "default"]);
    }

    #[test]
    fn cast_rejects_other_kinds() {
        let root = parse("text");
        assert!(Block::cast(root.clone()).is_none());
        assert!(Root::cast(root).is_some());
    }
}
