use crate::error::ErrorKind;
use crate::eval::{Mode, Number};
pub use crate::lexer::Op;
use crate::lexer::{Lexer, Token};
use std::fmt;
use tracing::debug;

/// Deepest parenthesis nesting accepted; keeps recursion off the end of the
/// stack for arbitrarily long inputs.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Literal(Number),
    BinOp(Op, Box<Node>, Box<Node>),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Literal(Number::Int(x)) => write!(f, "{}", x),
            Node::Literal(Number::Float(x)) => write!(f, "{:?}", x),
            Node::BinOp(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.name(), rhs),
        }
    }
}

fn unexpected_token<T>(lexer: &Lexer) -> Result<T, ErrorKind> {
    debug!(token = %lexer.peek().name(), span = ?lexer.span(), "unexpected token");
    Err(ErrorKind::MalformedExpression)
}

fn unexpected_prev_token<T>(lexer: &mut Lexer) -> Result<T, ErrorKind> {
    lexer.prev();
    unexpected_token(lexer)
}

fn parse_primitive(lexer: &mut Lexer, mode: Mode, depth: usize) -> Result<Node, ErrorKind> {
    match lexer.next() {
        Token::Number(num) => match Number::parse(&num, mode) {
            Ok(x) => Ok(Node::Literal(x)),
            Err(e) => {
                lexer.prev();
                debug!(literal = %num, span = ?lexer.span(), "bad literal");
                Err(e)
            }
        },
        Token::LeftParen => {
            if depth >= MAX_DEPTH {
                debug!(span = ?lexer.span(), "parentheses nested too deeply");
                return Err(ErrorKind::MalformedExpression);
            }

            let expr = parse_expr(lexer, mode, depth + 1)?;

            match lexer.next() {
                Token::RightParen => Ok(expr),
                _ => unexpected_prev_token(lexer),
            }
        }
        _ => unexpected_prev_token(lexer),
    }
}

fn op_prec(op: Op) -> i32 {
    match op {
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div => 2,
    }
}

fn parse_binop(
    lexer: &mut Lexer,
    mode: Mode,
    prec: i32,
    depth: usize,
) -> Result<Node, ErrorKind> {
    let mut lhs = parse_primitive(lexer, mode, depth)?;

    loop {
        match lexer.peek() {
            Token::Operator(op) if prec <= op_prec(op) => {
                lexer.next();
                let rhs = parse_binop(lexer, mode, op_prec(op) + 1, depth)?;
                lhs = Node::BinOp(op, Box::new(lhs), Box::new(rhs));
            }
            _ => break Ok(lhs),
        }
    }
}

fn parse_expr(lexer: &mut Lexer, mode: Mode, depth: usize) -> Result<Node, ErrorKind> {
    parse_binop(lexer, mode, 0, depth)
}

/// Parses one complete expression; anything left over is an error.
pub fn parse(mut lexer: Lexer, mode: Mode) -> Result<Node, ErrorKind> {
    let root = parse_expr(&mut lexer, mode, 0)?;

    match lexer.peek() {
        Token::End => Ok(root),
        _ => unexpected_token(&lexer),
    }
}
