use crate::error::ErrorKind;
use crate::eval::Mode;
use itertools::Itertools;
use std::iter::{Fuse, Peekable};
use std::str::Chars;
use tracing::{debug, trace};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    LeftParen,
    RightParen,
    Number(String),
    Operator(Op),
    End,
}

impl Op {
    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
        }
    }
}

impl Token {
    pub fn name(&self) -> String {
        match self {
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Number(x) => x.as_str(),
            Token::Operator(x) => x.name(),
            Token::End => "<end>",
        }
        .into()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Span(pub usize, pub usize);

struct CharStream<'a> {
    index: usize,
    iterator: Peekable<Fuse<Chars<'a>>>,
}

impl<'a> CharStream<'a> {
    fn new(line: &'a str) -> CharStream<'a> {
        Self {
            index: 0,
            iterator: line.chars().fuse().peekable(),
        }
    }

    fn next(&mut self) -> Option<char> {
        let c = self.iterator.next();
        if c.is_some() {
            self.index += 1;
        }
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().cloned()
    }
}

pub struct Lexer {
    index: usize,
    tokens: Vec<Token>,
    spans: Vec<Span>,
}

impl Lexer {
    fn is_digit(c: char, mode: Mode) -> bool {
        c.is_ascii_digit() || (c == '.' && mode == Mode::Float)
    }

    fn parse_token(stream: &mut CharStream, mode: Mode) -> Result<Token, ErrorKind> {
        let c = match stream.peek() {
            Some(c) => c,
            None => return Ok(Token::End),
        };

        if Self::is_digit(c, mode) {
            let mut buffer = String::new();

            while let Some(c) = stream.peek() {
                if !Self::is_digit(c, mode) {
                    break;
                }

                buffer.push(c);
                stream.next();
            }

            return Ok(Token::Number(buffer));
        }

        let tok = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '+' => Token::Operator(Op::Add),
            '-' => Token::Operator(Op::Sub),
            '*' => Token::Operator(Op::Mul),
            '/' => Token::Operator(Op::Div),
            c => {
                debug!(?c, index = stream.index, "invalid character");
                return Err(ErrorKind::InvalidCharacter);
            }
        };

        stream.next();
        Ok(tok)
    }

    fn new(line: &str, mode: Mode) -> Result<Lexer, ErrorKind> {
        let mut stream = CharStream::new(line);
        let mut tokens = vec![];
        let mut spans = vec![];

        while let Some(c) = stream.peek() {
            if c.is_whitespace() {
                stream.next();
                continue;
            }

            let begin = stream.index;
            let token = Self::parse_token(&mut stream, mode)?;
            let end = stream.index;
            tokens.push(token);
            spans.push(Span(begin, end));
        }

        let index = stream.index;
        spans.push(Span(index, index + 1));

        trace!(tokens = %tokens.iter().map(Token::name).join(" "), "tokenized");

        Ok(Lexer {
            index: 0,
            tokens,
            spans,
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn peek(&self) -> Token {
        self.tokens.get(self.index).cloned().unwrap_or(Token::End)
    }

    pub fn next(&mut self) -> Token {
        let tok = self.peek();
        self.index += 1;
        tok
    }

    pub fn prev(&mut self) {
        assert!(self.index > 0);
        self.index -= 1;
    }

    pub fn span(&self) -> Span {
        self.spans[self.index.min(self.tokens.len())]
    }
}

pub fn tokenize(line: &str, mode: Mode) -> Result<Lexer, ErrorKind> {
    Lexer::new(line, mode)
}

#[cfg(test)]
mod test {
    use super::{tokenize, CharStream, Op, Span, Token};
    use crate::error::ErrorKind;
    use crate::eval::Mode;

    #[test]
    fn test_charstream() {
        let line = "ab";
        let mut stream = CharStream::new(line);

        assert_eq!(stream.peek(), Some('a'));
        assert_eq!(stream.next(), Some('a'));
        assert_eq!(stream.peek(), Some('b'));
        assert_eq!(stream.next(), Some('b'));
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.next(), None);
        assert_eq!(stream.index, 2);
    }

    fn test_match(string: &str, mode: Mode, tokens: impl IntoIterator<Item = Token>) {
        let mut lexer = tokenize(string, mode).unwrap();

        for tok in tokens {
            assert_eq!(lexer.next(), tok);
        }

        assert_eq!(lexer.next(), Token::End);
    }

    #[test]
    fn test_operators() {
        let string = "+ - * /";
        let tokens = vec![Op::Add, Op::Sub, Op::Mul, Op::Div]
            .into_iter()
            .map(Token::Operator);

        test_match(string, Mode::Integer, tokens);
    }

    #[test]
    fn test_tokens() {
        let string = "(12)\t( \n)";
        let tokens = vec![
            Token::LeftParen,
            Token::Number("12".into()),
            Token::RightParen,
            Token::LeftParen,
            Token::RightParen,
        ];

        test_match(string, Mode::Integer, tokens);
    }

    #[test]
    fn test_numbers() {
        let string = "1 .2 3. 4.5 1.2.3";
        let tokens = vec![
            Token::Number("1".into()),
            Token::Number(".2".into()),
            Token::Number("3.".into()),
            Token::Number("4.5".into()),
            Token::Number("1.2.3".into()),
        ];

        test_match(string, Mode::Float, tokens);
    }

    #[test]
    fn test_adjacent() {
        let string = "12+3*(4)";
        let tokens = vec![
            Token::Number("12".into()),
            Token::Operator(Op::Add),
            Token::Number("3".into()),
            Token::Operator(Op::Mul),
            Token::LeftParen,
            Token::Number("4".into()),
            Token::RightParen,
        ];

        test_match(string, Mode::Integer, tokens);
    }

    #[test]
    fn test_invalid_characters() {
        for line in &["2 + a", "1,5", "2^3", "1 % 2", "x", "٣", "2.5e10 + 1"] {
            assert_eq!(
                tokenize(line, Mode::Float).err(),
                Some(ErrorKind::InvalidCharacter),
                "{:?}",
                line
            );
        }
    }

    #[test]
    fn test_dot_needs_float_mode() {
        assert_eq!(
            tokenize("2.5 + 1", Mode::Integer).err(),
            Some(ErrorKind::InvalidCharacter)
        );
        assert!(tokenize("2.5 + 1", Mode::Float).is_ok());
    }

    #[test]
    fn test_empty() {
        test_match("", Mode::Integer, vec![]);
        test_match("  \t ", Mode::Float, vec![]);
    }

    #[test]
    fn test_spans() {
        let mut lexer = tokenize(" 12 + 3", Mode::Integer).unwrap();

        assert_eq!(lexer.span(), Span(1, 3));
        lexer.next();
        assert_eq!(lexer.span(), Span(4, 5));
        lexer.next();
        assert_eq!(lexer.span(), Span(6, 7));
        lexer.next();
        assert_eq!(lexer.span(), Span(7, 8));
        lexer.next();
        assert_eq!(lexer.span(), Span(7, 8));
    }

    #[test]
    fn test_prev_peek_next() {
        let string = "1 2 3";
        let mut lexer = tokenize(string, Mode::Integer).unwrap();

        let a = Token::Number("1".into());
        let b = Token::Number("2".into());
        let c = Token::Number("3".into());

        assert_eq!(lexer.peek(), a);
        assert_eq!(lexer.next(), a);
        assert_eq!(lexer.peek(), b);
        lexer.prev();
        assert_eq!(lexer.peek(), a);
        assert_eq!(lexer.next(), a);
        assert_eq!(lexer.next(), b);
        assert_eq!(lexer.next(), c);
        lexer.prev();
        assert_eq!(lexer.next(), c);
        assert_eq!(lexer.next(), Token::End);
    }
}
