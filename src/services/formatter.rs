//! Display derivations for quotes: daily change, its color, and abbreviated
//! magnitudes.

use crate::constants::formatting::{
    BILLION, GRADIENT_FULL_SCALE_PERCENT, MILLION, NOT_AVAILABLE, TRILLION, WHITE,
};

/// Percent change from `previous` to `current`, unrounded.
///
/// `None` when either price is missing or `previous` is zero.
pub fn raw_change_percent(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) if p != 0.0 => {
            let pct = (c / p - 1.0) * 100.0;
            pct.is_finite().then_some(pct)
        }
        _ => None,
    }
}

/// Percent change from `previous` to `current`, rounded to 2 decimals.
pub fn daily_change_percent(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    raw_change_percent(current, previous).map(round2)
}

/// Background color for a daily change: white at 0, fading to pure green
/// at +5% and to pure red at -5%. `None` gives plain white.
pub fn gradient_color(percent: Option<f64>) -> String {
    let Some(percent) = percent else {
        return WHITE.to_string();
    };

    let ratio = (percent.abs() / GRADIENT_FULL_SCALE_PERCENT).min(1.0);
    // Truncate, not round: 2.5% gives 255 - 127 = 128
    let faded = 255 - (255.0 * ratio) as u8;

    if percent > 0.0 {
        format!("rgb({}, 255, {})", faded, faded)
    } else {
        format!("rgb(255, {}, {})", faded, faded)
    }
}

/// Abbreviate large magnitudes: `1.5000T`, `2.34B`, `5.60M`, else `12,345`.
pub fn format_magnitude(value: Option<f64>) -> String {
    let Some(n) = value else {
        return NOT_AVAILABLE.to_string();
    };

    if n >= TRILLION {
        format!("{:.4}T", n / TRILLION)
    } else if n >= BILLION {
        format!("{:.2}B", n / BILLION)
    } else if n >= MILLION {
        format!("{:.2}M", n / MILLION)
    } else {
        group_thousands(n.trunc() as i64)
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round the exact decimal value of `v` to 2 places, ties to even.
/// Scaling by 100 first would round the binary product instead.
fn round2(v: f64) -> f64 {
    format!("{:.2}", v).parse().unwrap_or(v)
}
