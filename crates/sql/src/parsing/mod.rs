//! Turning raw SQL text into an AST: lexer, token model, and parser.

pub mod ast;
mod lexer;
mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

/// Parses the input into a program, returning the statements parsed and
/// any error messages. The error list is empty exactly when the whole
/// input parsed.
pub fn parse(input: &str) -> (ast::Program, Vec<String>) {
    Parser::new(input).parse_program()
}
