//! Lexer for the Skiff scripting language.
//!
//! A hand-written finite-state tokenizer over a character cursor with
//! one-character pushback. All character classification and keyword sets
//! are delegated to a [`Profile`] so the engine can tokenize different
//! concrete grammars; [`ScriptProfile`] is the one the interpreter uses.
//!
//! The lexer aborts at the first invalid input and reports it as a
//! [`skiff_diagnostic::Diagnostic`]; it never produces a partial list.

mod cursor;
mod lexer;
mod profile;

pub use cursor::SourceCursor;
pub use lexer::{tokenize, tokenize_with};
pub use profile::{Profile, ScriptProfile};
