//! Python-compatible float formatting for report lines: `%g` for statistics,
//! `repr` for raw values.
//!
//! Picks fixed or scientific notation depending on the decimal exponent and
//! drops trailing zeros, so `0.4000000000000001` prints as `0.4` and `1e-20`
//! stays `1e-20`.

/// Significant digits used when no precision is given.
pub const DEFAULT_PRECISION: usize = 6;

/// Format `value` with `precision` significant digits, `%g` style.
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    // Round to the requested number of significant digits first; rounding can
    // bump the exponent (9.9999996 -> 1.00000e1).
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= precision as i32 {
        let mantissa = trim_fraction(mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Shorthand for [`format_g`] with [`DEFAULT_PRECISION`].
#[inline]
pub fn g(value: f64) -> String {
    format_g(value, DEFAULT_PRECISION)
}

/// Shortest round-trip rendering, Python `repr` style.
///
/// Fixed notation for decimal exponents in `-4..16` (always with a fractional
/// part), scientific otherwise with a signed exponent of at least two digits:
/// `1e-05`, `1e+16`, `0.5`, `1.0`.
pub fn repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.5e-7`.
    let sci = format!("{:e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..16).contains(&exp) {
        let fixed = format!("{}", value);
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
