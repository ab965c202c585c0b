//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect
//! tokens, consume them, and open/close nodes through markers.
//!
//! ## Module Structure
//!
//! - [`block`] - `@name (parameters) { contents }` constructs
//! - [`markup`] - text runs, elements, interpolations, expansion forms
//!
//! ## Content and Scope
//!
//! Every container (document root, element body, block body, expansion case
//! body) is parsed by the same [`content`] loop. What differs is *where it
//! stops*, which is carried in a [`Scope`]:
//!
//! - inside any `{ ... }` a `}` ends the content
//! - inside any element a `</` ends the content
//!
//! Outside those scopes the same tokens are stray and get wrapped in an
//! ERROR node, so the loop always makes progress and every byte lands in
//! the tree.
//!
//! Whitespace between constructs stays as direct WHITESPACE/NEWLINE
//! children of the container, which is what lets sibling walks skip it.

mod block;
mod markup;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Where the enclosing content loop has to stop.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scope {
    braces: u32,
    elements: u32,
}

impl Scope {
    fn in_braces(self) -> Self {
        Self {
            braces: self.braces + 1,
            ..self
        }
    }

    fn in_element(self) -> Self {
        Self {
            elements: self.elements + 1,
            ..self
        }
    }
}

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();
    content(p, Scope::default());
    m.complete(p, SyntaxKind::ROOT);
}

/// Parse a sequence of markup and blocks until the scope says stop.
fn content(p: &mut Parser<'_, '_>, scope: Scope) {
    loop {
        match p.current() {
            SyntaxKind::EOF => break,
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::COMMENT => p.bump(),
            SyntaxKind::R_BRACE if scope.braces > 0 => break,
            SyntaxKind::R_BRACE => stray(p),
            SyntaxKind::LT_SLASH if scope.elements > 0 => break,
            SyntaxKind::LT_SLASH => markup::stray_end_tag(p),
            SyntaxKind::BLOCK_NAME => block::block(p, scope),
            SyntaxKind::L_BRACE if p.nth(1) == SyntaxKind::L_BRACE => markup::interpolation(p),
            SyntaxKind::L_BRACE => markup::expansion_form(p, scope),
            SyntaxKind::LT if p.nth(1) == SyntaxKind::TEXT => markup::element(p, scope),
            _ => markup::text(p),
        }
    }
}

/// Wrap a single unexpected token in an ERROR node.
fn stray(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    m.complete(p, SyntaxKind::ERROR);
}

/// Consume a quoted run (`"..."` or `'...'`) including both quotes.
/// An unterminated quote runs to end of input.
fn quoted(p: &mut Parser<'_, '_>) {
    let quote = p.current();
    p.bump();
    while !p.at_end() && !p.at(quote) {
        p.bump();
    }
    p.eat(quote);
}
