/// Abbreviate a score for display. Thresholds are fixed powers of ten; the
/// numeric total is never derived from this string.
pub fn format_score(score: i64) -> String {
    const QUADRILLION: i64 = 1_000_000_000_000_000;
    const TRILLION: i64 = 1_000_000_000_000;
    const BILLION: i64 = 1_000_000_000;
    const MILLION: i64 = 1_000_000;
    const THOUSAND: i64 = 1_000;

    if score >= QUADRILLION {
        format!("{:.2}Q", score as f64 / QUADRILLION as f64)
    } else if score >= TRILLION {
        format!("{:.2}T", score as f64 / TRILLION as f64)
    } else if score >= BILLION {
        format!("{:.2}B", score as f64 / BILLION as f64)
    } else if score >= MILLION {
        format!("{:.2}M", score as f64 / MILLION as f64)
    } else if score >= THOUSAND {
        group_thousands(score)
    } else {
        score.to_string()
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (idx + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
