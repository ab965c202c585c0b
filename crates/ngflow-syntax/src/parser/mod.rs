//! # Parser - Event-Based Tree Construction
//!
//! This module transforms a token stream into a syntax tree using the
//! **event-based** architecture from rust-analyzer.
//!
//! Grammar rules never touch Rowan directly. They emit a flat list of
//! [`Event`]s (Start, Token, Finish) and the [`Sink`] builds the green tree
//! from them afterwards. Templates nest blocks inside elements inside blocks
//! to arbitrary depth; the events keep tree construction itself flat.
//!
//! ## Remapping
//!
//! The lexer only knows raw kinds. When the grammar recognises a raw token as
//! a delimiter it emits it under a marker kind instead:
//!
//! ```text
//! L_BRACE after a block header  → BLOCK_START
//! L_BRACE L_BRACE in content    → INTERPOLATION_START (one token)
//! R_BRACE R_BRACE in {{ ... }}  → INTERPOLATION_END (one token)
//! WHITESPACE inside parameters  → EXPRESSION_WHITE_SPACE
//! ```
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] that **must** be either completed
//! with `marker.complete(parser, KIND)` or abandoned with
//! `marker.abandon(parser)`. Dropping it otherwise panics.
//!
//! ```ignore
//! let m = parser.start();
//! parser.bump();
//! m.complete(parser, SyntaxKind::TEXT_RUN);
//! ```
//!
//! ## Public API
//!
//! ```
//! use ngflow_syntax::parse;
//!
//! let tree = parse("@if (ready) { go }");
//! println!("{:#?}", tree);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `nth_text()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `bump_remap()`, `bump_n()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n positions ahead, or "" past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.bump_remap(kind);
        }
    }

    /// Consume the current token, emitting it under a different kind.
    pub fn bump_remap(&mut self, kind: SyntaxKind) {
        if !self.at_end() {
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n tokens as a single composite token.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if self.pos + n <= self.tokens.len() {
            self.events.push(Event::Token {
                kind,
                n_raw_tokens: n as u8,
            });
            self.pos += n;
        }
    }

    /// Number of whitespace/newline tokens starting at the current position.
    pub fn trivia_ahead(&self) -> usize {
        let mut n = 0;
        while matches!(self.nth(n), SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE) {
            n += 1;
        }
        n
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it. The `#[must_use]` attribute and the `Drop`
/// impl together enforce that every marker is either completed or abandoned.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start { kind };
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// Only removes the placeholder if it's the last event; otherwise the
    /// placeholder becomes inert and is ignored by the Sink.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Parse template source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
