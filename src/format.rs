use crate::eval::{Mode, Number};

fn fixed(x: f64) -> String {
    let out = format!("{:.4}", x);

    // a tiny negative value rounds to "-0.0000"
    if out.bytes().all(|b| b == b'-' || b == b'0' || b == b'.') {
        "0.0000".into()
    } else {
        out
    }
}

/// Renders a result the way the calculator prints it: plain digits in
/// integer mode, exactly four fractional digits in float mode. Ties are
/// rounded half-to-even on the exact binary value. A float is never
/// truncated to an integer, even when `mode` asks for one.
pub fn format(number: Number, mode: Mode) -> String {
    match (mode, number) {
        (Mode::Integer, Number::Int(x)) => format!("{}", x),
        (Mode::Float, Number::Int(x)) => fixed(x as f64),
        (_, Number::Float(x)) => fixed(x),
    }
}
