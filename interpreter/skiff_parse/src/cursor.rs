//! Token cursor with single-token lookahead.

use skiff_diagnostic::{Diagnostic, ErrorCode};
use skiff_ir::{StringInterner, Token, TokenKind, TokenList};
use tracing::trace;

pub(crate) struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Self {
            tokens,
            interner,
            pos: 0,
        }
    }

    /// Current token without consuming it.
    pub(crate) fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos)
    }

    /// Move past the current token.
    pub(crate) fn advance(&mut self) {
        if let Some(token) = self.peek() {
            trace!(pos = self.pos, kind = %token.kind, "advance");
        }
        self.pos += 1;
    }

    /// Consume and return the current token.
    pub(crate) fn take(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.advance();
        Some(token)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Payload text of a token.
    pub(crate) fn text(&self, token: Token) -> &'static str {
        self.interner.lookup(token.text)
    }

    /// Line of the current token, or of the last token at end of input.
    pub(crate) fn line(&self) -> u32 {
        self.peek().map_or_else(|| self.last_line(), |t| t.line)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn check_text(&self, kind: TokenKind, text: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == kind && self.text(t) == text)
    }

    /// Consume the current token when it matches kind and text.
    pub(crate) fn eat_text(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.check_text(kind, text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a token with this kind and text.
    pub(crate) fn expect_text(&mut self, kind: TokenKind, text: &str) -> Result<(), Diagnostic> {
        if self.eat_text(kind, text) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Require an identifier token.
    pub(crate) fn expect_ident(&mut self) -> Result<Token, Diagnostic> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Ident => {
                self.advance();
                Ok(token)
            }
            Some(token) => Err(Diagnostic::error(
                ErrorCode::E1003,
                format!("expected identifier near '{}'", self.text(token)),
                token.line,
            )),
            None => Err(self.end_of_input()),
        }
    }

    /// Diagnostic for the current token (or end of input).
    pub(crate) fn unexpected(&self) -> Diagnostic {
        match self.peek() {
            Some(token) => Diagnostic::error(
                ErrorCode::E1001,
                format!("unexpected symbol near '{}'", self.text(token)),
                token.line,
            ),
            None => self.end_of_input(),
        }
    }

    fn end_of_input(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E1002, "unexpected end of input", self.last_line())
    }

    fn last_line(&self) -> u32 {
        self.tokens
            .len()
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(1, |t| t.line)
    }
}
