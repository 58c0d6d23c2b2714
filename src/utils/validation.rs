/// Roll numbers are trimmed and uppercased at every ingress; the normalized
/// form is the lookup key everywhere.
pub fn normalize_roll_no(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_roll_no("  cs101 "), "CS101");
        assert_eq!(normalize_roll_no("CS101"), "CS101");
        assert_eq!(normalize_roll_no(""), "");
    }
}
