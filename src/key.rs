//! Printf-style key formatting.
//!
//! [`keyf`] builds structured keys from a format string and a list of
//! [`Arg`]s. It never fails: a verb that does not fit its argument, a
//! missing argument, or a leftover argument is rendered inline as a
//! diagnostic marker instead.
//!
//! | Problem           | Rendered as               |
//! |-------------------|---------------------------|
//! | wrong type        | `%!d(string=abc)`         |
//! | missing argument  | `%!s(MISSING)`            |
//! | extra arguments   | `%!(EXTRA int=1, bool=true)` |
//! | trailing `%`      | `%!(NOVERB)`              |
//! | unknown verb      | `%!z(int=1)`              |
//! | absurd width      | `%!(BADWIDTH)`            |
//!
//! # Verbs
//!
//! - `%v` any value in its natural form; floats use the shortest `%g`
//!   shape (`0.5`, `1.5e+06`, `1e-05`)
//! - `%s` strings, `%q` quoted strings and chars with `\n`, `\t`, `\x1b`
//!   style escapes
//! - `%d` integers, `%x` `%X` `%o` `%b` integers in other bases (`%x` also
//!   hex-encodes strings)
//! - `%f` `%e` floats, `%t` booleans, `%c` chars and code points
//! - `%%` a literal percent sign
//!
//! Flags `-`, `+`, `0` and space, a width and a `.precision` are accepted
//! between `%` and the verb. Non-finite floats render as `+Inf`, `-Inf` and
//! `NaN` under every float verb and are never zero padded.
//!
//! # Example
//!
//! ```rust
//! use klog::keyf;
//!
//! assert_eq!(keyf!("request:%s", "abc"), "request:abc");
//! assert_eq!(keyf!("shard-%03d", 7), "shard-007");
//! assert_eq!(keyf!("count:%d", "notanumber"), "count:%!d(string=notanumber)");
//! ```

use std::fmt::{self, Write as _};
use std::iter::Peekable;
use std::str::Chars;

/// A single positional argument to [`keyf`].
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A string.
    Str(String),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
    /// A character.
    Char(char),
}

impl Arg {
    /// Name used for this argument inside diagnostic markers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Int(_) => "int",
            Arg::Uint(_) => "uint",
            Arg::Float(_) => "float64",
            Arg::Bool(_) => "bool",
            Arg::Char(_) => "char",
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(n) => write!(f, "{}", n),
            Arg::Uint(n) => write!(f, "{}", n),
            Arg::Float(x) => f.write_str(&general(*x)),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Char(c) => write!(f, "{}", c),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident as $target:ty: $($src:ty),+) => {
        $(
            impl From<$src> for Arg {
                fn from(value: $src) -> Self {
                    Arg::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from!(Int as i64: i8, i16, i32, i64, isize);
impl_from!(Uint as u64: u8, u16, u32, u64, usize);
impl_from!(Float as f64: f32, f64);

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Arg::Char(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_owned())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

/// Build a key with [`keyf`](crate::keyf()) from any arguments convertible
/// into [`Arg`].
///
/// ```rust
/// use klog::keyf;
///
/// assert_eq!(keyf!("%s.%s", "db", "latency"), "db.latency");
/// assert_eq!(keyf!("plain"), "plain");
/// ```
#[macro_export]
macro_rules! keyf {
    ($format:expr $(,)?) => {
        $crate::keyf($format, &[])
    };
    ($format:expr, $($arg:expr),+ $(,)?) => {
        $crate::keyf($format, &[$($crate::Arg::from($arg)),+])
    };
}

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
}

/// Widths and precisions above this render `%!(BADWIDTH)`/`%!(BADPREC)`.
const MAX_WIDTH: usize = 1_000_000;

/// Format `format` with `args` substituted positionally.
///
/// Never panics; see the [module docs](self) for the marker forms used
/// when the format and the arguments disagree.
///
/// ```rust
/// use klog::{keyf, Arg};
///
/// let key = keyf("request:%s", &[Arg::from("abc")]);
/// assert_eq!(key, "request:abc");
/// ```
pub fn keyf(format: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(format.len() + 8 * args.len());
    let mut chars = format.chars().peekable();
    let mut next = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = parse_spec(&mut chars);
        if spec.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if spec.bad_precision {
            out.push_str("%!(BADPREC)");
        }
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next) {
            Some(arg) => {
                next += 1;
                write_arg(&mut out, verb, &spec, arg);
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={}", arg.type_name(), arg);
        }
        out.push(')');
    }

    out
}

fn parse_spec(chars: &mut Peekable<Chars<'_>>) -> Spec {
    let mut spec = Spec::default();

    while let Some(&flag) = chars.peek() {
        match flag {
            '-' => spec.minus = true,
            '+' => spec.plus = true,
            ' ' => spec.space = true,
            '0' => spec.zero = true,
            _ => break,
        }
        chars.next();
    }

    spec.width = parse_number(chars);
    if spec.width.is_some_and(|w| w > MAX_WIDTH) {
        spec.width = None;
        spec.bad_width = true;
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let precision = parse_number(chars).unwrap_or(0);
        if precision > MAX_WIDTH {
            spec.bad_precision = true;
        } else {
            spec.precision = Some(precision);
        }
    }

    spec
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
    }
    value
}

fn write_arg(out: &mut String, verb: char, spec: &Spec, arg: &Arg) {
    match render(verb, spec, arg) {
        Some((body, numeric)) => pad(out, &body, spec, numeric),
        None => {
            let _ = write!(out, "%!{}({}={})", verb, arg.type_name(), arg);
        }
    }
}

/// Render one argument, returning the body and whether it is numeric.
/// `None` means the verb does not apply to the argument.
fn render(verb: char, spec: &Spec, arg: &Arg) -> Option<(String, bool)> {
    let rendered = match (verb, arg) {
        ('v' | 'f' | 'e', Arg::Float(x)) if !x.is_finite() => (non_finite(*x), false),
        ('v', Arg::Int(_) | Arg::Uint(_) | Arg::Float(_)) => {
            (signed(arg.to_string(), spec), true)
        }
        ('v', _) => (arg.to_string(), false),

        ('s', Arg::Str(s)) => (truncate(s, spec.precision), false),
        ('q', Arg::Str(s)) => (quote(s.chars(), '"'), false),
        ('q', Arg::Char(c)) => (quote(std::iter::once(*c), '\''), false),

        ('d', Arg::Int(n)) => (signed(n.to_string(), spec), true),
        ('d', Arg::Uint(n)) => (signed(n.to_string(), spec), true),

        ('x' | 'X' | 'o' | 'b', Arg::Int(n)) => {
            let digits = radix(n.unsigned_abs(), verb);
            let body = if *n < 0 { format!("-{}", digits) } else { digits };
            (signed(body, spec), true)
        }
        ('x' | 'X' | 'o' | 'b', Arg::Uint(n)) => (signed(radix(*n, verb), spec), true),
        ('x', Arg::Str(s)) => (hex_bytes(s, false), false),
        ('X', Arg::Str(s)) => (hex_bytes(s, true), false),

        ('f', Arg::Float(x)) => {
            let body = format!("{:.*}", spec.precision.unwrap_or(6), x);
            (signed(body, spec), true)
        }
        ('e', Arg::Float(x)) => {
            let body = exponent(*x, spec.precision.unwrap_or(6));
            (signed(body, spec), true)
        }

        ('t', Arg::Bool(b)) => (b.to_string(), false),

        ('c', Arg::Char(c)) => (c.to_string(), false),
        ('c', Arg::Int(n)) => (code_point(u32::try_from(*n).ok())?, false),
        ('c', Arg::Uint(n)) => (code_point(u32::try_from(*n).ok())?, false),

        _ => return None,
    };
    Some(rendered)
}

fn hex_bytes(s: &str, upper: bool) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        let _ = if upper {
            write!(out, "{:02X}", b)
        } else {
            write!(out, "{:02x}", b)
        };
    }
    out
}

fn code_point(n: Option<u32>) -> Option<String> {
    n.and_then(char::from_u32).map(String::from)
}

fn radix(n: u64, verb: char) -> String {
    match verb {
        'x' => format!("{:x}", n),
        'X' => format!("{:X}", n),
        'o' => format!("{:o}", n),
        _ => format!("{:b}", n),
    }
}

fn non_finite(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_owned()
    } else if x > 0.0 {
        "+Inf".to_owned()
    } else {
        "-Inf".to_owned()
    }
}

// Shortest round-trip digits, switching to exponent form outside 1e-4..1e6.
fn general(x: f64) -> String {
    if !x.is_finite() {
        return non_finite(x);
    }
    let shortest = format!("{:e}", x);
    match shortest.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            if (-4..6).contains(&exp) {
                x.to_string()
            } else {
                with_exponent(mantissa, exp)
            }
        }
        None => shortest,
    }
}

// Rust prints `1.5e0`; keys use the conventional `1.500000e+00` shape.
fn exponent(x: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, x);
    match raw.split_once('e') {
        Some((mantissa, exp)) => with_exponent(mantissa, exp.parse().unwrap_or(0)),
        None => raw,
    }
}

fn with_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
}

fn quote(chars: impl Iterator<Item = char>, delim: char) -> String {
    let mut out = String::new();
    out.push(delim);
    for c in chars {
        match c {
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

fn signed(body: String, spec: &Spec) -> String {
    if body.starts_with('-') || body.starts_with('+') {
        body
    } else if spec.plus {
        format!("+{}", body)
    } else if spec.space {
        format!(" {}", body)
    } else {
        body
    }
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(max) => s.chars().take(max).collect(),
        None => s.to_owned(),
    }
}

fn pad(out: &mut String, body: &str, spec: &Spec, numeric: bool) {
    let len = body.chars().count();
    let fill = spec.width.map_or(0, |w| w.saturating_sub(len));

    if fill == 0 {
        out.push_str(body);
    } else if spec.minus {
        out.push_str(body);
        out.extend(std::iter::repeat_n(' ', fill));
    } else if spec.zero && numeric {
        let sign_len = body
            .chars()
            .next()
            .filter(|c| matches!(c, '-' | '+' | ' '))
            .map_or(0, char::len_utf8);
        let (sign, digits) = body.split_at(sign_len);
        out.push_str(sign);
        out.extend(std::iter::repeat_n('0', fill));
        out.push_str(digits);
    } else {
        out.extend(std::iter::repeat_n(' ', fill));
        out.push_str(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_string() {
        assert_eq!(keyf!("request:%s", "abc"), "request:abc");
    }

    #[test]
    fn no_verbs_passes_through() {
        assert_eq!(keyf!("plain.key"), "plain.key");
        assert_eq!(keyf("", &[]), "");
    }

    #[test]
    fn mismatched_verb_embeds_marker() {
        assert_eq!(
            keyf!("count:%d", "notanumber"),
            "count:%!d(string=notanumber)"
        );
        assert_eq!(keyf!("%s", 3), "%!s(int=3)");
        assert_eq!(keyf!("%t", 1.5), "%!t(float64=1.5)");
    }

    #[test]
    fn missing_argument_embeds_marker() {
        assert_eq!(keyf!("%s-%d", "a"), "a-%!d(MISSING)");
    }

    #[test]
    fn extra_arguments_are_listed() {
        assert_eq!(
            keyf!("x", 1, "two", true),
            "x%!(EXTRA int=1, string=two, bool=true)"
        );
    }

    #[test]
    fn trailing_percent_is_noverb() {
        assert_eq!(keyf!("50%"), "50%!(NOVERB)");
        assert_eq!(keyf!("%-5", 1), "%!(NOVERB)%!(EXTRA int=1)");
    }

    #[test]
    fn unknown_verb_embeds_marker() {
        assert_eq!(keyf!("%z", 1), "%!z(int=1)");
    }

    #[test]
    fn percent_literal_consumes_no_argument() {
        assert_eq!(keyf!("%d%%", 90), "90%");
    }

    #[test]
    fn value_verb_accepts_everything() {
        assert_eq!(
            keyf!("%v %v %v %v %v %v", "s", -1, 2u8, 0.5, false, 'c'),
            "s -1 2 0.5 false c"
        );
    }

    #[test]
    fn integer_bases() {
        assert_eq!(keyf!("%x %X %o %b", 255, 255, 8, 5), "ff FF 10 101");
        assert_eq!(keyf!("%x", -255), "-ff");
        assert_eq!(keyf!("%x", "hi"), "6869");
    }

    #[test]
    fn width_and_flags() {
        assert_eq!(keyf!("[%5d]", 42), "[   42]");
        assert_eq!(keyf!("[%-5d]", 42), "[42   ]");
        assert_eq!(keyf!("[%05d]", -42), "[-0042]");
        assert_eq!(keyf!("[%+d]", 42), "[+42]");
        assert_eq!(keyf!("[% d]", 42), "[ 42]");
        assert_eq!(keyf!("[%05s]", "ab"), "[   ab]");
    }

    #[test]
    fn precision() {
        assert_eq!(keyf!("%.2f", 3.14159), "3.14");
        assert_eq!(keyf!("%f", 1.0), "1.000000");
        assert_eq!(keyf!("%.3s", "abcdef"), "abc");
        assert_eq!(keyf!("%.f", 2.75f32), "3");
    }

    #[test]
    fn oversized_width_is_rejected_inline() {
        assert_eq!(keyf!("%99999999999d", 1), "%!(BADWIDTH)1");
        assert_eq!(keyf!("%.99999999999f", 1.0), "%!(BADPREC)1.000000");
    }

    #[test]
    fn exponent_form() {
        assert_eq!(keyf!("%e", 1500.0), "1.500000e+03");
        assert_eq!(keyf!("%.1e", 0.00025), "2.5e-04");
    }

    #[test]
    fn value_verb_uses_general_float_shape() {
        assert_eq!(keyf!("%v", 1e21), "1e+21");
        assert_eq!(keyf!("%v", 1_500_000.0), "1.5e+06");
        assert_eq!(keyf!("%v", 123_456.0), "123456");
        assert_eq!(keyf!("%v", 0.0001), "0.0001");
        assert_eq!(keyf!("%v", 0.00001), "1e-05");
        assert_eq!(keyf!("%v", 0.0), "0");
        assert_eq!(keyf!("%t", 1e21), "%!t(float64=1e+21)");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(keyf!("%f", f64::INFINITY), "+Inf");
        assert_eq!(keyf!("%e", f64::NEG_INFINITY), "-Inf");
        assert_eq!(keyf!("%v", f64::NAN), "NaN");
        assert_eq!(keyf!("%+f", f64::INFINITY), "+Inf");
        assert_eq!(keyf!("[%06f]", f64::NEG_INFINITY), "[  -Inf]");
    }

    #[test]
    fn quoted_escapes_control_characters() {
        assert_eq!(keyf!("%q", "\u{1b}"), "\"\\x1b\"");
        assert_eq!(keyf!("%q", "a\tb\n"), "\"a\\tb\\n\"");
        assert_eq!(keyf!("%q", "\u{85}"), "\"\\u0085\"");
        assert_eq!(keyf!("%q", "é"), "\"é\"");
        assert_eq!(keyf!("%q", '\''), "'\\''");
        assert_eq!(keyf!("%q", '"'), "'\"'");
    }

    #[test]
    fn quoted_and_chars() {
        assert_eq!(keyf!("%q", "a\"b"), "\"a\\\"b\"");
        assert_eq!(keyf!("%c%c", 'o', 107), "ok");
        assert_eq!(keyf!("%c", -1), "%!c(int=-1)");
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(keyf!("é:%s:ü", "ß"), "é:ß:ü");
    }

    #[test]
    fn owned_strings_convert() {
        let owned = String::from("owned");
        assert_eq!(keyf!("%s/%s", &owned, owned.clone()), "owned/owned");
    }
}
