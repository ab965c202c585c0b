//! Markup grammar: text runs, elements, interpolations and ICU expansion
//! forms. This is intentionally shallow HTML: tags are recognised well
//! enough to nest content, attributes are kept as raw tokens.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{Scope, content, quoted};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Parse a run of plain text up to the next construct boundary.
pub(super) fn text(p: &mut Parser<'_, '_>) {
    let m = p.start();
    loop {
        p.bump();
        if at_text_boundary(p) {
            break;
        }
    }
    m.complete(p, SyntaxKind::TEXT_RUN);
}

fn at_text_boundary(p: &Parser<'_, '_>) -> bool {
    match p.current() {
        SyntaxKind::EOF
        | SyntaxKind::BLOCK_NAME
        | SyntaxKind::L_BRACE
        | SyntaxKind::R_BRACE
        | SyntaxKind::LT_SLASH
        | SyntaxKind::COMMENT => true,
        SyntaxKind::LT => p.nth(1) == SyntaxKind::TEXT,
        _ => false,
    }
}

/// Parse `<name ...>content</name>`, `<name/>` or a void element.
pub(super) fn element(p: &mut Parser<'_, '_>, scope: Scope) {
    let m = p.start();
    let name = p.nth_text(1);

    let self_closed = start_tag(p);
    let is_void = VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name));

    if !self_closed && !is_void {
        content(p, scope.in_element());
        if p.at(SyntaxKind::LT_SLASH) && p.nth_text(1).eq_ignore_ascii_case(name) {
            end_tag(p);
        }
    }

    m.complete(p, SyntaxKind::ELEMENT);
}

/// Returns true if the tag closed itself with `/>`.
fn start_tag(p: &mut Parser<'_, '_>) -> bool {
    let m = p.start();
    p.bump();
    p.bump_remap(SyntaxKind::TAG_NAME);

    let mut self_closed = false;
    loop {
        match p.current() {
            SyntaxKind::GT => {
                p.bump();
                break;
            }
            SyntaxKind::SLASH_GT => {
                p.bump();
                self_closed = true;
                break;
            }
            // Unterminated tag: let the next tag start cleanly
            SyntaxKind::EOF | SyntaxKind::LT | SyntaxKind::LT_SLASH => break,
            SyntaxKind::DOUBLE_QUOTE | SyntaxKind::SINGLE_QUOTE => quoted(p),
            _ => p.bump(),
        }
    }

    m.complete(p, SyntaxKind::START_TAG);
    self_closed
}

fn end_tag(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    p.bump_remap(SyntaxKind::TAG_NAME);
    end_tag_rest(p);
    m.complete(p, SyntaxKind::END_TAG);
}

/// An end tag that closes nothing.
pub(super) fn stray_end_tag(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    end_tag_rest(p);
    m.complete(p, SyntaxKind::ERROR);
}

fn end_tag_rest(p: &mut Parser<'_, '_>) {
    while !matches!(
        p.current(),
        SyntaxKind::GT | SyntaxKind::EOF | SyntaxKind::LT | SyntaxKind::LT_SLASH
    ) {
        p.bump();
    }
    p.eat(SyntaxKind::GT);
}

/// Parse `{{ expression }}`. An unclosed interpolation stops at the next
/// end tag or at end of input.
pub(super) fn interpolation(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_n(2, SyntaxKind::INTERPOLATION_START);

    loop {
        match p.current() {
            SyntaxKind::EOF | SyntaxKind::LT_SLASH => break,
            SyntaxKind::R_BRACE if p.nth(1) == SyntaxKind::R_BRACE => {
                p.bump_n(2, SyntaxKind::INTERPOLATION_END);
                break;
            }
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE => {
                p.bump_remap(SyntaxKind::EXPRESSION_WHITE_SPACE)
            }
            _ => p.bump(),
        }
    }

    m.complete(p, SyntaxKind::INTERPOLATION);
}

/// Parse an ICU expansion form: `{value, type, case {content} ...}`.
pub(super) fn expansion_form(p: &mut Parser<'_, '_>, scope: Scope) {
    let m = p.start();
    p.bump_remap(SyntaxKind::EXPANSION_FORM_START);

    // Switch value and type, each terminated by a comma
    for _ in 0..2 {
        while !matches!(
            p.current(),
            SyntaxKind::COMMA | SyntaxKind::L_BRACE | SyntaxKind::R_BRACE | SyntaxKind::EOF
        ) {
            if p.current().is_trivia() {
                p.bump();
            } else {
                p.bump_remap(SyntaxKind::EXPANSION_FORM_CONTENT);
            }
        }
        if !p.at(SyntaxKind::COMMA) {
            break;
        }
        p.bump_remap(SyntaxKind::EXPANSION_FORM_COMMA);
    }

    loop {
        match p.current() {
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE => p.bump(),
            SyntaxKind::R_BRACE => {
                p.bump_remap(SyntaxKind::EXPANSION_FORM_END);
                break;
            }
            SyntaxKind::EOF | SyntaxKind::LT_SLASH => break,
            _ => expansion_case(p, scope),
        }
    }

    m.complete(p, SyntaxKind::EXPANSION_FORM);
}

fn expansion_case(p: &mut Parser<'_, '_>, scope: Scope) {
    let m = p.start();

    while !matches!(
        p.current(),
        SyntaxKind::L_BRACE
            | SyntaxKind::R_BRACE
            | SyntaxKind::WHITESPACE
            | SyntaxKind::NEWLINE
            | SyntaxKind::EOF
            | SyntaxKind::LT_SLASH
    ) {
        p.bump_remap(SyntaxKind::EXPANSION_FORM_CONTENT);
    }
    while p.at(SyntaxKind::WHITESPACE) || p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }

    if p.at(SyntaxKind::L_BRACE) {
        p.bump_remap(SyntaxKind::EXPANSION_FORM_CASE_START);
        content(p, scope.in_braces());
        if p.at(SyntaxKind::R_BRACE) {
            p.bump_remap(SyntaxKind::EXPANSION_FORM_CASE_END);
        }
    }

    m.complete(p, SyntaxKind::EXPANSION_CASE);
}
