use std::fmt;
use std::io;
use std::io::prelude::*;
use std::process::ExitCode;

use calc::{calculate, ErrorKind, Mode};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Lines must be shorter than this many bytes, line terminator excluded.
const MAX_INPUT: usize = 1024;

/// Reads one arithmetic expression from standard input and prints its value.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Use floating point numbers printed with four decimals instead of
    /// integers.
    #[arg(long)]
    float: bool,
}

#[derive(Debug)]
enum Failure {
    Input,
    TooLong,
    Eval(ErrorKind),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Failure::Input => f.write_str("Ошибка ввода или EOF"),
            Failure::TooLong => f.write_str("Входные данные превышают 1 КиБ"),
            Failure::Eval(kind) => write!(f, "{}", kind),
        }
    }
}

impl From<ErrorKind> for Failure {
    fn from(kind: ErrorKind) -> Self {
        Failure::Eval(kind)
    }
}

fn read_line(input: impl BufRead) -> Result<String, Failure> {
    let mut buffer = vec![];

    // one byte past the limit is enough to tell that the line is too long
    let n = input
        .take(MAX_INPUT as u64 + 1)
        .read_until(b'\n', &mut buffer)
        .map_err(|err| {
            debug!(%err, "failed to read stdin");
            Failure::Input
        })?;

    if n == 0 {
        return Err(Failure::Input);
    }

    if buffer.last() == Some(&b'\n') {
        buffer.pop();

        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }

    if buffer.len() >= MAX_INPUT {
        return Err(Failure::TooLong);
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn execute(input: impl BufRead, mode: Mode) -> Result<String, Failure> {
    let line = read_line(input)?;
    debug!(?line, ?mode, "read expression");
    Ok(calculate(&line, mode)?)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    let mode = if args.float { Mode::Float } else { Mode::Integer };

    match execute(io::stdin().lock(), mode) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
