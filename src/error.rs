use std::error;
use std::fmt;

/// Everything that can go wrong while evaluating one expression.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// A character outside the alphabet of the active mode.
    InvalidCharacter,
    /// Unbalanced parentheses, dangling operators, empty input, bad literals
    /// and division by zero.
    MalformedExpression,
    /// A `-` used as a sign instead of a binary operator.
    NegativeInputUnsupported,
    /// A literal or an intermediate result outside [-2e9, +2e9].
    ResultOutOfRange,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::InvalidCharacter => "Недопустимый символ",
            ErrorKind::MalformedExpression => "Некорректное выражение",
            ErrorKind::NegativeInputUnsupported => "Унарный минус не поддерживается",
            ErrorKind::ResultOutOfRange => "Результат вне диапазона [-2e9, +2e9]",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl error::Error for ErrorKind {}
