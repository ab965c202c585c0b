//! # Lexer - Tokenizing Template Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Nothing is skipped:
//!
//! ```
//! use ngflow_syntax::lexer::lex;
//!
//! let input = "@if (user) { Hi {{ user.name }} }";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Context-Free Tokens
//!
//! The lexer does not know whether a `{` opens a block body, an expansion
//! form or an expansion case, or whether `}` closes one. The parser decides
//! and remaps the raw kind to the matching marker kind (`BLOCK_START`,
//! `EXPANSION_FORM_START`, ...). Only two tokens need a callback:
//!
//! - block names, which may contain inner whitespace (`@else if`)
//! - comments, which run until the next `-->`
//!
//! Neither `{{` nor `}}` is a token. A block body may open straight into an
//! interpolation (`@if (a) {{{ x }}}`) and nested blocks routinely close
//! with two adjacent braces, so the parser pairs two `L_BRACE`s into one
//! `INTERPOLATION_START` and two `R_BRACE`s into one `INTERPOLATION_END`.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// Logos needs its own enum for the derive; [`TokenKind::to_syntax_kind`]
/// maps each variant to its raw [`SyntaxKind`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    /// `@` followed by a name, extended across inner whitespace
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*", block_name)]
    BlockName,

    /// `@` that is not followed by a name
    #[token("@")]
    At,

    #[token("<!--", comment)]
    Comment,

    #[token("</")]
    LtSlash,

    #[token("<")]
    Lt,

    #[token("/>")]
    SlashGt,

    #[token(">")]
    Gt,

    #[token("/")]
    Slash,

    #[token("=")]
    Eq,

    #[token("\"")]
    DoubleQuote,

    #[token("'")]
    SingleQuote,

    /// Plain text - anything not matched by other rules
    #[regex(r#"[^\s{}()@;,<>/="']+"#)]
    Text,
}

/// Extends a block name over `<whitespace><word>` pairs so that `@else if`
/// (or `@else` and `if` on separate lines) lexes as a single token.
/// Trailing whitespace is left for the next token.
fn block_name(lex: &mut logos::Lexer<TokenKind>) -> bool {
    loop {
        let rest = lex.remainder();
        let gap = rest.len() - rest.trim_start_matches([' ', '\t', '\r', '\n']).len();
        if gap == 0 {
            break;
        }
        let after = &rest.as_bytes()[gap..];
        let starts_word = after
            .first()
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_');
        if !starts_word {
            break;
        }
        let word = after
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        lex.bump(gap + word);
    }
    true
}

/// Consumes a comment body up to and including `-->`, or to end of input.
fn comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    let len = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
    lex.bump(len);
    true
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::BlockName => SyntaxKind::BLOCK_NAME,
            TokenKind::At => SyntaxKind::AT,
            TokenKind::Comment => SyntaxKind::COMMENT,
            TokenKind::LtSlash => SyntaxKind::LT_SLASH,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::SlashGt => SyntaxKind::SLASH_GT,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::DoubleQuote => SyntaxKind::DOUBLE_QUOTE,
            TokenKind::SingleQuote => SyntaxKind::SINGLE_QUOTE,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Unrecognized characters (e.g. unicode whitespace) become text
            Err(()) => SyntaxKind::TEXT,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}
