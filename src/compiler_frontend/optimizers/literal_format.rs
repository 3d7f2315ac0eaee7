use crate::settings::FOLDED_LITERAL_PRECISION;

/// The canonical lexeme of a folded literal: `%.20g`.
pub fn format_folded_literal(value: f64) -> String {
    format_significant(value, FOLDED_LITERAL_PRECISION)
}

/// Formats like C's `%.{precision}g`.
///
/// Fixed notation when the decimal exponent is in `[-4, precision)`, otherwise
/// `d.ddde+XX`. Trailing zeros and a trailing decimal point are dropped.
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() {
            String::from("-nan")
        } else {
            String::from("nan")
        };
    }

    if value.is_infinite() {
        return if value < 0.0 {
            String::from("-inf")
        } else {
            String::from("inf")
        };
    }

    let precision = precision.max(1);

    // Rounding to the requested digits first decides which notation C would pick
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        let fixed = format!("{:.*}", decimals, value);
        strip_trailing_zeros(&fixed).to_owned()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
