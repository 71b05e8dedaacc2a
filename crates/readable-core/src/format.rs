//! Small text formatting helpers shared by every front end.

/// Separator between the author list and the publication year.
pub const BYLINE_SEPARATOR: &str = " \u{2022} ";

/// Format a count with comma thousands separators (`50000` → `"50,000"`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `"A, B • 2017"`. Without authors only the year is shown.
pub fn byline(authors: &[String], year: i32) -> String {
    if authors.is_empty() {
        year.to_string()
    } else {
        format!("{}{}{}", authors.join(", "), BYLINE_SEPARATOR, year)
    }
}
