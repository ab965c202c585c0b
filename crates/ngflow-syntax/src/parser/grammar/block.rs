//! Block grammar: `@name (param; param) { contents }`.
//!
//! Both the parameter list and the body are optional. A block without `{`
//! (e.g. a half-typed `@else`) still becomes a BLOCK node so that chain
//! queries see it.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{Scope, content, quoted};

/// Parse a block starting at its BLOCK_NAME token.
pub(super) fn block(p: &mut Parser<'_, '_>, scope: Scope) {
    let m = p.start();
    p.bump();

    if p.nth(p.trivia_ahead()) == SyntaxKind::L_PAREN {
        eat_trivia(p);
        parameters(p);
    }

    if p.nth(p.trivia_ahead()) == SyntaxKind::L_BRACE {
        eat_trivia(p);
        contents(p, scope);
    }

    m.complete(p, SyntaxKind::BLOCK);
}

fn eat_trivia(p: &mut Parser<'_, '_>) {
    while p.at(SyntaxKind::WHITESPACE) || p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
}

fn parameters(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_remap(SyntaxKind::BLOCK_PARAMETERS_START);

    loop {
        match p.current() {
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE => {
                p.bump_remap(SyntaxKind::EXPRESSION_WHITE_SPACE)
            }
            SyntaxKind::SEMICOLON => p.bump_remap(SyntaxKind::BLOCK_SEMICOLON),
            SyntaxKind::R_PAREN => {
                p.bump_remap(SyntaxKind::BLOCK_PARAMETERS_END);
                break;
            }
            // Unclosed parameter list: leave the brace for the body
            SyntaxKind::EOF | SyntaxKind::L_BRACE | SyntaxKind::R_BRACE => break,
            _ => parameter(p),
        }
    }

    m.complete(p, SyntaxKind::BLOCK_PARAMETERS);
}

/// One parameter, up to the next top-level `;` or `)`.
fn parameter(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let mut depth = 0usize;

    loop {
        match p.current() {
            SyntaxKind::EOF | SyntaxKind::L_BRACE | SyntaxKind::R_BRACE => break,
            SyntaxKind::SEMICOLON | SyntaxKind::R_PAREN if depth == 0 => break,
            SyntaxKind::L_PAREN => {
                depth += 1;
                p.bump();
            }
            SyntaxKind::R_PAREN => {
                depth -= 1;
                p.bump();
            }
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE => {
                p.bump_remap(SyntaxKind::EXPRESSION_WHITE_SPACE)
            }
            SyntaxKind::DOUBLE_QUOTE | SyntaxKind::SINGLE_QUOTE => quoted(p),
            _ => p.bump(),
        }
    }

    m.complete(p, SyntaxKind::BLOCK_PARAMETER);
}

fn contents(p: &mut Parser<'_, '_>, scope: Scope) {
    let m = p.start();
    p.bump_remap(SyntaxKind::BLOCK_START);

    content(p, scope.in_braces());
    if p.at(SyntaxKind::R_BRACE) {
        p.bump_remap(SyntaxKind::BLOCK_END);
    }

    m.complete(p, SyntaxKind::BLOCK_CONTENTS);
}
