use crate::error::ErrorKind;
use crate::lexer::{Lexer, Op, Token};
use itertools::Itertools;
use std::iter;
use tracing::debug;

/// Rejects a `-` standing where an operand is expected, i.e. a negative
/// number. Binary subtraction is unaffected.
pub fn validate(lexer: &Lexer) -> Result<(), ErrorKind> {
    let tokens = iter::once(None).chain(lexer.tokens().iter().map(Some));

    for (index, (prev, cur)) in tokens.tuple_windows().enumerate() {
        let operand_position = matches!(
            prev,
            None | Some(Token::LeftParen) | Some(Token::Operator(_))
        );

        if operand_position && cur == Some(&Token::Operator(Op::Sub)) {
            debug!(index, "minus in operand position");
            return Err(ErrorKind::NegativeInputUnsupported);
        }
    }

    Ok(())
}
