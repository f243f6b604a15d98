//! Recursive-descent parser.
//!
//! Consumes a [`TokenList`] and produces a flat [`SyntaxTree`]. The grammar
//! is a precedence ladder (comparison, additive, multiplicative) with
//! postfix chaining for assignment, member access, calls, and indexing at
//! the multiplicative tier. The first unexpected token aborts the parse
//! with a [`Diagnostic`].

use skiff_diagnostic::Diagnostic;
use skiff_ir::{StringInterner, SyntaxTree, TokenList};
use tracing::debug;

mod cursor;
mod grammar;

use grammar::Parser;

/// Parse a token list into a syntax tree.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<SyntaxTree, Diagnostic> {
    debug!(tokens = tokens.len(), "parse program");
    Parser::new(tokens, interner).run()
}

/// Tokenize and parse in one step.
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<SyntaxTree, Diagnostic> {
    let tokens = skiff_lexer::tokenize(source, interner)?;
    parse(&tokens, interner)
}
