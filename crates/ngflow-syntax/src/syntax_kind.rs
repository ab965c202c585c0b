//! SyntaxKind enum for all tokens and nodes in the template CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.
//!
//! Token kinds come in three flavours:
//!
//! - **Raw** kinds produced directly by the lexer (`TEXT`, `L_BRACE`, ...)
//! - **Structural markers** that the parser assigns when a raw token delimits a
//!   block, parameter list, interpolation or expansion form (`BLOCK_START`, ...)
//! - **Presentation markers** that only exist for highlighting
//!   (`EXPRESSION_WHITE_SPACE`, ...). Tree-walking code never matches on these.

/// All syntax kinds for the template CST.
///
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Raw tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// `{`
    L_BRACE,
    /// `}`
    R_BRACE,
    /// `(`
    L_PAREN,
    /// `)`
    R_PAREN,
    /// `;`
    SEMICOLON,
    /// `,`
    COMMA,
    /// A lone `@` that does not start a block name
    AT,
    /// `<`
    LT,
    /// `</`
    LT_SLASH,
    /// `>`
    GT,
    /// `/>`
    SLASH_GT,
    /// `/`
    SLASH,
    /// `=`
    EQ,
    /// `"`
    DOUBLE_QUOTE,
    /// `'`
    SINGLE_QUOTE,
    /// `<!-- ... -->`
    COMMENT,
    /// Element name inside a start or end tag
    TAG_NAME,

    // === Structural markers ===
    /// `{{` opening an interpolation
    INTERPOLATION_START,
    /// `}}` closing an interpolation
    INTERPOLATION_END,
    /// `{` opening an ICU expansion form
    EXPANSION_FORM_START,
    /// `}` closing an ICU expansion form
    EXPANSION_FORM_END,
    /// `{` opening an expansion case body
    EXPANSION_FORM_CASE_START,
    /// `}` closing an expansion case body
    EXPANSION_FORM_CASE_END,
    /// `@name` of a block, possibly with inner spaces (`@else if`)
    BLOCK_NAME,
    /// `{` opening block contents
    BLOCK_START,
    /// `}` closing block contents
    BLOCK_END,
    /// `(` opening block parameters
    BLOCK_PARAMETERS_START,
    /// `)` closing block parameters
    BLOCK_PARAMETERS_END,
    /// `;` separating block parameters
    BLOCK_SEMICOLON,

    // === Presentation markers ===
    /// Whitespace inside an expression (interpolation or block parameter)
    EXPRESSION_WHITE_SPACE,
    /// Switch value, type and case values of an expansion form
    EXPANSION_FORM_CONTENT,
    /// `,` separating the parts of an expansion form header
    EXPANSION_FORM_COMMA,

    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    /// A run of plain text
    TEXT_RUN,
    /// Element with its start tag, content and optional end tag
    ELEMENT,
    /// `<name ...>` or `<name ... />`
    START_TAG,
    /// `</name>`
    END_TAG,
    /// `{{ expression }}`
    INTERPOLATION,
    /// `{value, type, cases...}`
    EXPANSION_FORM,
    /// One `value {content}` case of an expansion form
    EXPANSION_CASE,
    /// `@name (parameters) { contents }`
    BLOCK,
    /// `( ... )` after a block name
    BLOCK_PARAMETERS,
    /// A single `;`-separated block parameter
    BLOCK_PARAMETER,
    /// `{ ... }` body of a block
    BLOCK_CONTENTS,

    /// Error recovery node
    ERROR,
}

/// Whether a marker kind shapes the tree or only affects highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Structural,
    Presentation,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer or marker output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::NEWLINE | Self::EXPRESSION_WHITE_SPACE
        )
    }

    /// Category of a marker kind, `None` for raw tokens and nodes.
    pub fn category(self) -> Option<TokenCategory> {
        use SyntaxKind::*;
        match self {
            INTERPOLATION_START
            | INTERPOLATION_END
            | EXPANSION_FORM_START
            | EXPANSION_FORM_END
            | EXPANSION_FORM_CASE_START
            | EXPANSION_FORM_CASE_END
            | BLOCK_NAME
            | BLOCK_START
            | BLOCK_END
            | BLOCK_PARAMETERS_START
            | BLOCK_PARAMETERS_END
            | BLOCK_SEMICOLON => Some(TokenCategory::Structural),
            EXPRESSION_WHITE_SPACE | EXPANSION_FORM_CONTENT | EXPANSION_FORM_COMMA => {
                Some(TokenCategory::Presentation)
            }
            _ => None,
        }
    }

    /// Returns true for markers that only exist for highlighting.
    pub fn is_presentation(self) -> bool {
        self.category() == Some(TokenCategory::Presentation)
    }

    /// Debug label of a marker kind, e.g. `NG:BLOCK_NAME`.
    pub fn label(self) -> Option<&'static str> {
        use SyntaxKind::*;
        let label = match self {
            INTERPOLATION_START => "NG:INTERPOLATION_START",
            INTERPOLATION_END => "NG:INTERPOLATION_END",
            EXPANSION_FORM_START => "NG:EXPANSION_FORM_START",
            EXPANSION_FORM_END => "NG:EXPANSION_FORM_END",
            EXPANSION_FORM_CASE_START => "NG:EXPANSION_FORM_CASE_START",
            EXPANSION_FORM_CASE_END => "NG:EXPANSION_FORM_CASE_END",
            BLOCK_NAME => "NG:BLOCK_NAME",
            BLOCK_START => "NG:BLOCK_START",
            BLOCK_END => "NG:BLOCK_END",
            BLOCK_PARAMETERS_START => "NG:BLOCK_PARAMETERS_START",
            BLOCK_PARAMETERS_END => "NG:BLOCK_PARAMETERS_END",
            BLOCK_SEMICOLON => "NG:BLOCK_SEMICOLON",
            EXPRESSION_WHITE_SPACE => "NG:EXPRESSION_WHITE_SPACE",
            EXPANSION_FORM_CONTENT => "NG:EXPANSION_FORM_CONTENT",
            EXPANSION_FORM_COMMA => "NG:EXPANSION_FORM_COMMA",
            _ => return None,
        };
        Some(label)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateLang {}

impl rowan::Language for TemplateLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<TemplateLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<TemplateLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<TemplateLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::BLOCK_NAME.is_token());
        assert!(SyntaxKind::EXPANSION_FORM_COMMA.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::BLOCK.is_node());
        assert!(SyntaxKind::BLOCK_CONTENTS.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(SyntaxKind::EXPRESSION_WHITE_SPACE.is_trivia());
        assert!(!SyntaxKind::TEXT.is_trivia());
    }

    #[test]
    fn markers_are_partitioned_into_categories() {
        assert_eq!(
            SyntaxKind::BLOCK_START.category(),
            Some(TokenCategory::Structural)
        );
        assert_eq!(
            SyntaxKind::INTERPOLATION_END.category(),
            Some(TokenCategory::Structural)
        );
        assert!(SyntaxKind::EXPANSION_FORM_CONTENT.is_presentation());
        assert!(!SyntaxKind::BLOCK_SEMICOLON.is_presentation());
        assert_eq!(SyntaxKind::L_BRACE.category(), None);
        assert_eq!(SyntaxKind::BLOCK.category(), None);
    }

    #[test]
    fn every_marker_has_a_label() {
        let markers = [
            SyntaxKind::INTERPOLATION_START,
            SyntaxKind::BLOCK_NAME,
            SyntaxKind::BLOCK_PARAMETERS_END,
            SyntaxKind::EXPRESSION_WHITE_SPACE,
        ];
        for kind in markers {
            let label = kind.label().unwrap();
            assert!(label.starts_with("NG:"), "{kind:?} has label {label}");
        }
        assert_eq!(SyntaxKind::BLOCK_END.label(), Some("NG:BLOCK_END"));
        assert_eq!(SyntaxKind::TEXT.label(), None);
    }

    #[test]
    fn marker_identity_is_variant_identity() {
        assert_ne!(SyntaxKind::BLOCK_START, SyntaxKind::EXPANSION_FORM_START);
        assert_ne!(SyntaxKind::BLOCK_END, SyntaxKind::EXPANSION_FORM_CASE_END);
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::BLOCK_PARAMETER;
        let raw: rowan::SyntaxKind = kind.into();
        let back = TemplateLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
