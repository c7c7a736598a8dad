use crate::error::ErrorKind;
use crate::parser::{Node, Op};
use std::fmt;
use tracing::debug;

/// Largest magnitude any literal or intermediate result may take.
pub const BOUND: i64 = 2_000_000_000;

/// Smallest divisor magnitude accepted in float mode.
const MIN_DIVISOR: f64 = 1e-10;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Integer,
    Float,
}

#[derive(Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn parse(literal: &str, mode: Mode) -> Result<Number, ErrorKind> {
        match mode {
            Mode::Integer => {
                if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ErrorKind::MalformedExpression);
                }

                // all digits, so the only way to fail is overflow; saturate and
                // leave the rejection to the range check during evaluation
                Ok(Number::Int(literal.parse().unwrap_or(i64::MAX)))
            }
            Mode::Float => literal
                .parse()
                .map(Number::Float)
                .map_err(|_| ErrorKind::MalformedExpression),
        }
    }

    fn check_range(self) -> Result<Number, ErrorKind> {
        let ok = match self {
            Number::Int(x) => -BOUND <= x && x <= BOUND,
            Number::Float(x) => x.is_finite() && x.abs() <= BOUND as f64,
        };

        if ok {
            Ok(self)
        } else {
            debug!(value = ?self, "out of range");
            Err(ErrorKind::ResultOutOfRange)
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(x) => write!(f, "Int({:?})", x),
            Number::Float(x) => write!(f, "Float({:?})", x),
        }
    }
}

fn evaluate_int(op: Op, x: i64, y: i64) -> Result<i64, ErrorKind> {
    let out = match op {
        Op::Add => x.checked_add(y),
        Op::Sub => x.checked_sub(y),
        Op::Mul => x.checked_mul(y),
        Op::Div => {
            if y == 0 {
                debug!(x, "integer division by zero");
                return Err(ErrorKind::MalformedExpression);
            }

            x.checked_div(y)
        }
    };

    out.ok_or(ErrorKind::ResultOutOfRange)
}

fn evaluate_float(op: Op, x: f64, y: f64) -> Result<f64, ErrorKind> {
    let out = match op {
        Op::Add => x + y,
        Op::Sub => x - y,
        Op::Mul => x * y,
        Op::Div => {
            if y.abs() < MIN_DIVISOR {
                debug!(x, y, "float division by (near) zero");
                return Err(ErrorKind::MalformedExpression);
            }

            x / y
        }
    };

    // adding positive zero turns -0.0 into 0.0
    Ok(out + 0.0)
}

fn evaluate_binop(op: Op, lhs: Number, rhs: Number) -> Result<Number, ErrorKind> {
    use Number::Float as F;
    use Number::Int as I;

    let out = match (lhs, rhs) {
        (I(x), I(y)) => I(evaluate_int(op, x, y)?),
        (F(x), F(y)) => F(evaluate_float(op, x, y)?),
        _ => {
            debug!(?lhs, ?rhs, "mixed operands");
            return Err(ErrorKind::MalformedExpression);
        }
    };

    out.check_range()
}

fn evaluate_node(node: &Node, mode: Mode) -> Result<Number, ErrorKind> {
    match node {
        Node::Literal(val) => match (mode, *val) {
            (Mode::Integer, Number::Int(_)) | (Mode::Float, Number::Float(_)) => {
                val.check_range()
            }
            (Mode::Float, Number::Int(x)) => Number::Float(x as f64).check_range(),
            (Mode::Integer, Number::Float(_)) => Err(ErrorKind::MalformedExpression),
        },
        Node::BinOp(op, lhs, rhs) => {
            let x = evaluate_node(lhs, mode)?;
            let y = evaluate_node(rhs, mode)?;
            evaluate_binop(*op, x, y)
        }
    }
}

/// Computes the value of `root`, checking the range of every literal and
/// every intermediate result.
pub fn evaluate(root: &Node, mode: Mode) -> Result<Number, ErrorKind> {
    let out = evaluate_node(root, mode);
    debug!(tree = %root, result = ?out, "evaluated");
    out
}
