//! Lexical units produced by the tokenizer.

use std::fmt;
use tripod_api::parser::TextPosition;

/// The closed set of token kinds of the N-Triples token family.
///
/// Compound literal forms (language tagged, typed) are assembled by the
/// grammar drivers from a `Literal` token immediately followed by a
/// `LangSpec` or `Datatype` token.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Exactly once, before anything else.
    Bof,
    /// Terminal; repeated on every call past the end of input.
    Eof,
    /// A `# ...` comment, preserved so the parser decides to discard it.
    Comment,
    /// The statement terminator `.`.
    Dot,
    /// `<...>`, text is the IRI without the angle brackets, escapes decoded.
    Uri,
    /// A bare `_:` with no identifier, an anonymous blank node.
    BlankNode,
    /// `_:label`, text keeps the two character sigil.
    BlankNodeWithId,
    /// `"..."`, text is the unescaped lexical form.
    Literal,
    /// `@tag` right after a literal, text is the tag.
    LangSpec,
    /// `^^<...>` right after a literal, text is the datatype IRI.
    Datatype,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Bof => "beginning of file",
            TokenKind::Eof => "end of file",
            TokenKind::Comment => "comment",
            TokenKind::Dot => "'.'",
            TokenKind::Uri => "URI",
            TokenKind::BlankNode => "blank node",
            TokenKind::BlankNodeWithId => "blank node",
            TokenKind::Literal => "literal",
            TokenKind::LangSpec => "language specifier",
            TokenKind::Datatype => "datatype specifier",
        })
    }
}

/// An immutable lexical unit: kind, text and source position range.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Token {
    pub fn start(&self) -> TextPosition {
        TextPosition::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> TextPosition {
        TextPosition::new(self.end_line, self.end_column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.text, self.start())
    }
}
