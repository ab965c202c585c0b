//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree
//! building. The parser emits a **flat sequence** of events describing the
//! tree structure:
//!
//! ```text
//! Start(BLOCK)
//!   Token(BLOCK_NAME)
//!   Start(BLOCK_CONTENTS)
//!     Token(BLOCK_START)
//!     Token(BLOCK_END)
//!   Finish
//! Finish
//! ```
//!
//! The Sink processes these in order, maintaining a stack of open nodes.
//! Start pushes, Finish pops.

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a new composite node.
    Start { kind: SyntaxKind },

    /// Add a token to the current node.
    ///
    /// `kind` may differ from the lexer's kind when the grammar remaps a raw
    /// token to a marker. `n_raw_tokens` says how many lexer tokens are glued
    /// into this one tree token (two for `{{` and `}}`).
    Token { kind: SyntaxKind, n_raw_tokens: u8 },

    /// Finish the current node.
    Finish,

    /// A placeholder left by `parser.start()`; the Sink ignores it.
    Placeholder,
}

impl Event {
    /// Create a start event.
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    /// Create a token event for a single raw token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_start_creation() {
        assert_eq!(
            Event::start(SyntaxKind::BLOCK),
            Event::Start {
                kind: SyntaxKind::BLOCK
            }
        );
    }

    #[test]
    fn event_token_creation() {
        assert_eq!(
            Event::token(SyntaxKind::BLOCK_NAME),
            Event::Token {
                kind: SyntaxKind::BLOCK_NAME,
                n_raw_tokens: 1
            }
        );
    }
}
