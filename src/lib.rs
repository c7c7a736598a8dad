//! Evaluates a single `+ - * /` expression with parentheses under either
//! bounded integer or four-decimal float arithmetic.

pub mod error;
pub mod eval;
mod format;
pub mod lexer;
pub mod parser;
pub mod validate;

pub use error::ErrorKind;
pub use eval::{Mode, Number, BOUND};
pub use format::format;

use lexer::tokenize;
use parser::parse;
use validate::validate;

/// Tokenizes, validates, parses and evaluates `line`.
pub fn evaluate(line: &str, mode: Mode) -> Result<Number, ErrorKind> {
    let lexer = tokenize(line, mode)?;
    validate(&lexer)?;
    let root = parse(lexer, mode)?;
    eval::evaluate(&root, mode)
}

/// Evaluates `line` and formats the result for output.
pub fn calculate(line: &str, mode: Mode) -> Result<String, ErrorKind> {
    evaluate(line, mode).map(|x| format(x, mode))
}
