pub mod panels;
pub mod plot;
pub mod table;

/// Format a count with thousands separators: `12345` → `12,345`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Cut `text` to `max` characters, appending `...` when shortened.
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate_label("Lancet", 30), "Lancet");
        let long = "Journal of Infectious Diseases and Public Health";
        let cut = truncate_label(long, 30);
        assert_eq!(cut, "Journal of Infectious Diseases...");
        assert_eq!(truncate_label("ééééé", 3), "ééé...");
    }
}
