//! The finite-state tokenizer.
//!
//! One pass over a [`SourceCursor`]: characters accumulate into a pending
//! buffer until one fails to continue the current run, at which point that
//! character is pushed back and the token is finalized from the previous
//! state. Identifier runs are classified after capture (nil, boolean,
//! keyword, then plain identifier). The first invalid input aborts the
//! whole analysis.

use skiff_diagnostic::{Diagnostic, ErrorCode};
use skiff_ir::{StringInterner, Token, TokenKind, TokenList};

use crate::cursor::SourceCursor;
use crate::profile::{Profile, ScriptProfile};

#[cfg(test)]
mod tests;

/// Tokenize `source` with the scripting profile.
pub fn tokenize(source: &str, interner: &StringInterner) -> Result<TokenList, Diagnostic> {
    tokenize_with(source, &ScriptProfile, interner)
}

/// Tokenize `source` with a caller-supplied profile.
pub fn tokenize_with<P: Profile>(
    source: &str,
    profile: &P,
    interner: &StringInterner,
) -> Result<TokenList, Diagnostic> {
    Lexer {
        cursor: SourceCursor::new(source),
        profile,
        interner,
        line: 1,
        buf: String::new(),
    }
    .run()
}

/// Machine states: `Begin → {Integer, Float, Str, Identity, Operator} → End`,
/// plus the direct `Begin → End` path for whitespace/newline/delimiter
/// singletons.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum State {
    Begin,
    Integer,
    Float,
    Str,
    Identity,
    Operator,
    End,
}

struct Lexer<'a, P> {
    cursor: SourceCursor,
    profile: &'a P,
    interner: &'a StringInterner,
    line: u32,
    buf: String,
}

impl<P: Profile> Lexer<'_, P> {
    fn run(mut self) -> Result<TokenList, Diagnostic> {
        let mut tokens = TokenList::new();
        while !self.cursor.is_end() {
            if let Some(token) = self.scan_token()? {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }

    /// Scan one token. `None` means a skipped whitespace/newline run.
    fn scan_token(&mut self) -> Result<Option<Token>, Diagnostic> {
        self.buf.clear();
        let mut state = State::Begin;
        let mut kind = TokenKind::None;

        while state != State::End {
            let Some(ch) = self.cursor.take() else { break };
            self.buf.push(ch);
            match state {
                State::Begin => {
                    if self.profile.is_whitespace(ch) {
                        kind = TokenKind::None;
                        state = State::End;
                    } else if self.profile.is_eol(ch) {
                        self.line += 1;
                        kind = TokenKind::None;
                        state = State::End;
                    } else if self.profile.is_delimiter(ch) {
                        kind = TokenKind::Delimiter;
                        state = State::End;
                    } else if self.profile.is_digit(ch) {
                        state = State::Integer;
                    } else if self.profile.is_quote(ch) {
                        state = State::Str;
                    } else if self.profile.is_ident_start(ch) {
                        state = State::Identity;
                    } else if self.profile.is_operator_char(ch) {
                        state = State::Operator;
                    } else {
                        return Err(self.fail(ErrorCode::E0002, format!("invalid character '{ch}'")));
                    }
                }
                State::Integer => {
                    if ch == '.' {
                        state = State::Float;
                    } else if !self.profile.is_digit(ch) {
                        if !self.ends_numeral(ch) {
                            return Err(self
                                .fail(ErrorCode::E0003, format!("malformed number '{}'", self.buf)));
                        }
                        self.buf.pop();
                        self.cursor.back();
                        kind = TokenKind::Numeric;
                        state = State::End;
                    }
                }
                State::Float => {
                    if ch == '.' || (!self.profile.is_digit(ch) && !self.ends_numeral(ch)) {
                        return Err(
                            self.fail(ErrorCode::E0003, format!("malformed number '{}'", self.buf))
                        );
                    }
                    if !self.profile.is_digit(ch) {
                        self.buf.pop();
                        self.cursor.back();
                        kind = TokenKind::Numeric;
                        state = State::End;
                    }
                }
                State::Str => {
                    let opening = self.buf.chars().next().unwrap_or('"');
                    if ch == '\\' {
                        // Escape: drop the backslash, keep the next char
                        // verbatim. At end of stream this consumes the
                        // final newline and the loop reports the string
                        // unterminated.
                        self.buf.pop();
                        if let Some(escaped) = self.cursor.take() {
                            self.buf.push(escaped);
                        }
                    } else if self.profile.is_quote(ch) && ch == opening {
                        self.buf.pop();
                        self.buf.remove(0);
                        kind = TokenKind::Str;
                        state = State::End;
                    } else if self.profile.is_eol(ch) {
                        self.buf.pop();
                        return Err(self.fail(
                            ErrorCode::E0001,
                            format!("unterminated string '{}'", self.buf),
                        ));
                    }
                }
                State::Identity => {
                    if !self.profile.is_ident_start(ch) && !self.profile.is_digit(ch) {
                        self.buf.pop();
                        self.cursor.back();
                        kind = self.classify_word();
                        state = State::End;
                    }
                }
                State::Operator => {
                    if !self.profile.is_operator_char(ch) {
                        self.buf.pop();
                        self.cursor.back();
                        if !self.profile.is_operator(&self.buf) {
                            return Err(self
                                .fail(ErrorCode::E0004, format!("unknown operator '{}'", self.buf)));
                        }
                        kind = TokenKind::Operator;
                        state = State::End;
                    }
                }
                // Unreachable: the loop guard stops on End.
                State::End => {}
            }
        }

        if state != State::End {
            // Stream ended mid-token; only an unclosed string gets here
            // (every other run is finalized by the guaranteed newline).
            return Err(self.fail(
                ErrorCode::E0001,
                format!("unterminated string '{}'", self.buf),
            ));
        }
        if kind == TokenKind::None {
            return Ok(None);
        }
        let text = self.interner.intern(&self.buf);
        Ok(Some(Token::new(kind, text, self.line)))
    }

    /// Classify a captured identifier run, in priority order.
    fn classify_word(&self) -> TokenKind {
        if self.profile.is_nil(&self.buf) {
            TokenKind::Nil
        } else if self.profile.is_boolean(&self.buf) {
            TokenKind::Bool
        } else if self.profile.is_keyword(&self.buf) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        }
    }

    /// Valid terminators for a numeral run.
    fn ends_numeral(&self, ch: char) -> bool {
        self.profile.is_whitespace(ch)
            || self.profile.is_eol(ch)
            || self.profile.is_delimiter(ch)
            || self.profile.is_operator_char(ch)
    }

    fn fail(&self, code: ErrorCode, message: String) -> Diagnostic {
        Diagnostic::error(code, message, self.line)
    }
}
