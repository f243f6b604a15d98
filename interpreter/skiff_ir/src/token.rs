//! Token model.
//!
//! A token is `{kind, text, line}` with the text interned. The kind set is
//! closed: the two pseudo-kinds `Error` and `None` exist for the lexer's
//! state machine (an `Error` aborts analysis, a `None` is skipped) and
//! never appear in a finished [`TokenList`].

use std::fmt;

use crate::Name;

/// Classification of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Lexically invalid run; aborts analysis.
    Error,
    /// Whitespace or line terminator; filtered out.
    None,
    /// The `nil` literal.
    Nil,
    /// `true` or `false`.
    Bool,
    /// Integer or float literal; the payload text is preserved verbatim.
    Numeric,
    /// Quoted string literal (payload text excludes the quotes).
    Str,
    /// Reserved word.
    Keyword,
    /// Plain identifier.
    Ident,
    /// Single-character punctuation: `, : ; . ( ) [ ] { }`.
    Delimiter,
    /// Operator text, e.g. `+`, `<=`, `~=`.
    Operator,
}

impl TokenKind {
    /// Human-readable kind name for diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::None => "none",
            Self::Nil => "nil literal",
            Self::Bool => "boolean literal",
            Self::Numeric => "numeric literal",
            Self::Str => "string literal",
            Self::Keyword => "keyword",
            Self::Ident => "identifier",
            Self::Delimiter => "delimiter",
            Self::Operator => "operator",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One lexed token. Immutable once produced.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Interned payload text, exactly as it appeared in the source
    /// (strings lose their quotes, escapes resolve to the escaped char).
    pub text: Name,
    /// 1-based source line the token started on.
    pub line: u32,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, text: Name, line: u32) -> Self {
        Self { kind, text, line }
    }
}

/// Ordered list of tokens produced by one lexer run.
#[derive(Clone, Default, Debug)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().copied()
    }
}
