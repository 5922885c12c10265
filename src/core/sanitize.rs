// src/core/sanitize.rs

/// Format a number the way a browser prints it: integral values without a
/// fractional part, shortest round-trip digits otherwise, and exponent form
/// (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`.
pub fn fmt_number(v: f64) -> String {
    let abs = v.abs();
    if v == 0.0 {
        s!("0") // also -0
    } else if v.is_nan() {
        s!("NaN")
    } else if v.is_infinite() {
        s!(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if abs >= 1e21 || abs < 1e-6 {
        let e = format!("{v:e}");
        match e.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => e,
        }
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

/// Flatten a free-text cell for CSV export: commas become spaces.
pub fn csv_text(s: &str) -> String {
    s.replace(',', " ")
}

/// Escape every `"` that is not already escaped, so the text can sit inside a
/// JSON string literal. Already-escaped quotes (odd backslash run) are kept.
pub fn quote_bare(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut backslashes = 0usize;
    for ch in s.chars() {
        match ch {
            '\\' => { backslashes += 1; out.push(ch); }
            '"' => {
                if backslashes % 2 == 0 { out.push('\\'); }
                out.push(ch);
                backslashes = 0;
            }
            _ => { out.push(ch); backslashes = 0; }
        }
    }
    out
}
