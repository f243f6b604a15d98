//! Character source with single-character pushback.

/// Cursor over source text.
///
/// Guarantees a trailing `\n` so every token run ends on a terminator
/// the state machine can classify. Supports exactly the primitives the
/// tokenizer needs: take, peek, and a one-character unget.
#[derive(Debug)]
pub struct SourceCursor {
    chars: Vec<char>,
    pos: usize,
}

impl SourceCursor {
    pub fn new(source: &str) -> Self {
        let mut chars: Vec<char> = source.chars().collect();
        if chars.last() != Some(&'\n') {
            chars.push('\n');
        }
        Self { chars, pos: 0 }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consume and return the next character.
    #[inline]
    pub fn take(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Push the most recently taken character back onto the source.
    #[inline]
    pub fn back(&mut self) {
        debug_assert!(self.pos > 0, "back() before any take()");
        self.pos = self.pos.saturating_sub(1);
    }
}
