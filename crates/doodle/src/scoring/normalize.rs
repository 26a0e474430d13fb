/// Canonical form for comparing guesses with targets.
///
/// Trims, lowercases, collapses every run of characters outside `[a-z0-9]`
/// into a single space, then trims again.
pub fn normalize_word(s: &str) -> String {
    let lower = s.trim().to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_gap = false;

    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_gap = false;
        } else if !in_gap {
            out.push(' ');
            in_gap = true;
        }
    }

    out.trim().to_string()
}

/// Clamp a confidence into `[0, 1]`; non-finite values count as 0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
