use core::num::IntErrorKind;

use num_complex::{Complex, Complex64};

use crate::error::NumberCause;

/// Reports whether a token looks like a number.
///
/// This is only an admissibility filter: the first character must be a digit
/// or a sign and the rest digits, signs, `.`, `e` or `E`. Whether the text
/// actually fits is decided when it is decoded into a destination of a
/// particular width.
pub fn is_numeric(token: &str) -> bool {
    let mut bytes = token.bytes();
    match bytes.next() {
        Some(b'0'..=b'9' | b'+' | b'-') => {}
        _ => return false,
    }
    bytes.all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E'))
}

pub(crate) fn int_cause(kind: &IntErrorKind) -> NumberCause {
    match kind {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumberCause::OutOfRange,
        _ => NumberCause::Invalid,
    }
}

/// Parses a base-10 signed integer that must fit in `bits` bits.
pub(crate) fn parse_int(text: &str, bits: u32) -> Result<i64, NumberCause> {
    let parsed = match bits {
        8 => text.parse::<i8>().map(i64::from),
        16 => text.parse::<i16>().map(i64::from),
        32 => text.parse::<i32>().map(i64::from),
        _ => text.parse::<i64>(),
    };
    parsed.map_err(|e| int_cause(e.kind()))
}

/// Parses a base-10 unsigned integer that must fit in `bits` bits.
pub(crate) fn parse_uint(text: &str, bits: u32) -> Result<u64, NumberCause> {
    let parsed = match bits {
        8 => text.parse::<u8>().map(u64::from),
        16 => text.parse::<u16>().map(u64::from),
        32 => text.parse::<u32>().map(u64::from),
        _ => text.parse::<u64>(),
    };
    parsed.map_err(|e| int_cause(e.kind()))
}

fn names_infinity(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parses a float of the given width. A finite literal that only becomes
/// infinite because it does not fit is out of range.
pub(crate) fn parse_float(text: &str, bits: u32) -> Result<f64, NumberCause> {
    let parsed = if bits == 32 {
        text.parse::<f32>().map(f64::from)
    } else {
        text.parse::<f64>()
    };
    let value = parsed.map_err(|_| NumberCause::Invalid)?;
    if value.is_infinite() && !names_infinity(text) {
        return Err(NumberCause::OutOfRange);
    }
    Ok(value)
}

/// Parses `a`, `bi`, `a+bi` or `a-bi`, optionally wrapped in parentheses.
/// `bits` is the width of each component.
pub(crate) fn parse_complex(text: &str, bits: u32) -> Result<Complex64, NumberCause> {
    let inner = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);
    // num-complex also takes a `j` suffix for the imaginary unit; only `i` is valid here.
    if inner.contains(['j', 'J']) {
        return Err(NumberCause::Invalid);
    }
    let parsed = if bits == 32 {
        inner
            .parse::<Complex<f32>>()
            .map(|c| Complex64::new(f64::from(c.re), f64::from(c.im)))
            .map_err(|_| NumberCause::Invalid)
    } else {
        inner.parse::<Complex64>().map_err(|_| NumberCause::Invalid)
    };
    let value = parsed?;
    let overflowed = value.re.is_infinite() || value.im.is_infinite();
    if overflowed && !inner.to_ascii_lowercase().contains("inf") {
        return Err(NumberCause::OutOfRange);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_admissibility() {
        for tok in [
            "0", "42", "+10", "-10", "4.2", "1e9", "-1.5E-3", "-", "1-2", "--", "-+", "---",
        ] {
            assert!(is_numeric(tok), "{tok:?} should be numeric");
        }
        for tok in ["", "a", ".5", "e1", "1a", "1+2i", "-t", "0x10"] {
            assert!(!is_numeric(tok), "{tok:?} should not be numeric");
        }
    }

    #[test]
    fn int_width_is_enforced() {
        assert_eq!(parse_int("127", 8), Ok(127));
        assert_eq!(parse_int("128", 8), Err(NumberCause::OutOfRange));
        assert_eq!(parse_int("-129", 8), Err(NumberCause::OutOfRange));
        assert_eq!(parse_int("139831983198318", 64), Ok(139831983198318));
        assert_eq!(parse_int("+10", 64), Ok(10));
        assert_eq!(parse_int("foo", 64), Err(NumberCause::Invalid));
        assert_eq!(parse_int("4.2", 64), Err(NumberCause::Invalid));
    }

    #[test]
    fn uint_width_is_enforced() {
        assert_eq!(parse_uint("255", 8), Ok(255));
        assert_eq!(parse_uint("256", 8), Err(NumberCause::OutOfRange));
        assert_eq!(parse_uint("-1", 64), Err(NumberCause::Invalid));
    }

    #[test]
    fn float_overflow_is_out_of_range() {
        assert_eq!(parse_float("42", 64), Ok(42.0));
        assert_eq!(parse_float("1e39", 32), Err(NumberCause::OutOfRange));
        assert_eq!(parse_float("1e39", 64), Ok(1e39));
        assert_eq!(parse_float("1e400", 64), Err(NumberCause::OutOfRange));
        assert!(parse_float("inf", 64).unwrap().is_infinite());
        assert_eq!(parse_float("abc", 64), Err(NumberCause::Invalid));
    }

    #[test]
    fn complex_forms() {
        assert_eq!(parse_complex("1+2i", 64), Ok(Complex64::new(1.0, 2.0)));
        assert_eq!(parse_complex("(1-2i)", 64), Ok(Complex64::new(1.0, -2.0)));
        assert_eq!(parse_complex("3", 32), Ok(Complex64::new(3.0, 0.0)));
        assert_eq!(parse_complex("2i", 64), Ok(Complex64::new(0.0, 2.0)));
        assert_eq!(parse_complex("foo", 64), Err(NumberCause::Invalid));
        assert_eq!(parse_complex("1+2j", 64), Err(NumberCause::Invalid));
        assert_eq!(parse_complex("(3J)", 32), Err(NumberCause::Invalid));
    }
}
