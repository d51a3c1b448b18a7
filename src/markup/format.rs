//! Number formatting for summary statistics

/// Integer with comma thousands separators: `12345` -> `12,345`
pub fn thousands(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Dollar amount with separators and two decimals: `1234.5` -> `$1,234.50`
pub fn currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("${}{}.{}", sign, group_digits(int_part), frac_part)
}

/// Fraction as a percentage with two decimals: `0.0512` -> `5.12%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
