//! Lexical profiles.
//!
//! A profile supplies every language-specific decision the state machine
//! makes: character classes, the delimiter/operator/quote sets, and the
//! keyword/nil/boolean classification of captured identifier runs. The
//! engine itself knows nothing about the concrete grammar.

/// Character classification and word sets consumed by the tokenizer.
pub trait Profile {
    /// Horizontal whitespace (line terminators are separate).
    fn is_whitespace(&self, ch: char) -> bool;
    /// Line terminator.
    fn is_eol(&self, ch: char) -> bool;
    fn is_digit(&self, ch: char) -> bool;
    fn is_quote(&self, ch: char) -> bool;
    /// May start an identifier run (continuation also allows digits).
    fn is_ident_start(&self, ch: char) -> bool;
    /// May appear in an operator run.
    fn is_operator_char(&self, ch: char) -> bool;
    fn is_delimiter(&self, ch: char) -> bool;

    /// The nil-literal text.
    fn is_nil(&self, text: &str) -> bool;
    /// A boolean-literal text.
    fn is_boolean(&self, text: &str) -> bool;
    /// A reserved word.
    fn is_keyword(&self, text: &str) -> bool;
    /// A complete, valid operator text (maximal-munch runs are validated
    /// as a whole; `=-` is not an operator even though `=` and `-` are).
    fn is_operator(&self, text: &str) -> bool;
}

/// The scripting-language profile.
#[derive(Copy, Clone, Default, Debug)]
pub struct ScriptProfile;

impl ScriptProfile {
    pub const KEYWORDS: &'static [&'static str] = &[
        "for", "if", "else", "while", "break", "continue", "fn", "return", "class",
    ];

    pub const OPERATORS: &'static [&'static str] = &[
        "+", "-", "*", "/", "=", "%", "^", "&", "|", "~", "<", ">", "<=", ">=", "&&", "||", "~=",
        "==", "<<", ">>", "+=", "-=",
    ];
}

impl Profile for ScriptProfile {
    fn is_whitespace(&self, ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\r')
    }

    fn is_eol(&self, ch: char) -> bool {
        ch == '\n'
    }

    fn is_digit(&self, ch: char) -> bool {
        ch.is_ascii_digit()
    }

    fn is_quote(&self, ch: char) -> bool {
        matches!(ch, '"' | '\'')
    }

    fn is_ident_start(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_operator_char(&self, ch: char) -> bool {
        matches!(
            ch,
            '+' | '-' | '*' | '/' | '=' | '%' | '^' | '&' | '|' | '~' | '<' | '>'
        )
    }

    fn is_delimiter(&self, ch: char) -> bool {
        matches!(
            ch,
            ',' | ':' | ';' | '.' | '(' | ')' | '[' | ']' | '{' | '}'
        )
    }

    fn is_nil(&self, text: &str) -> bool {
        text == "nil"
    }

    fn is_boolean(&self, text: &str) -> bool {
        matches!(text, "true" | "false")
    }

    fn is_keyword(&self, text: &str) -> bool {
        Self::KEYWORDS.contains(&text)
    }

    fn is_operator(&self, text: &str) -> bool {
        Self::OPERATORS.contains(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_classes() {
        let p = ScriptProfile;
        assert!(p.is_whitespace('\t'));
        assert!(!p.is_whitespace('\n'));
        assert!(p.is_eol('\n'));
        assert!(p.is_ident_start('_'));
        assert!(!p.is_ident_start('1'));
        assert!(p.is_delimiter('.'));
        assert!(p.is_operator_char('~'));
        assert!(p.is_quote('\''));
    }

    #[test]
    fn word_classification() {
        let p = ScriptProfile;
        assert!(p.is_nil("nil"));
        assert!(p.is_boolean("false"));
        assert!(p.is_keyword("while"));
        assert!(!p.is_keyword("nil"));
        assert!(!p.is_keyword("this"));
    }

    #[test]
    fn operator_texts_are_validated_whole() {
        let p = ScriptProfile;
        assert!(p.is_operator("~="));
        assert!(p.is_operator("<<"));
        assert!(p.is_operator("="));
        assert!(!p.is_operator("=-"));
        assert!(!p.is_operator("==="));
    }
}
