//! Line-level helpers shared by the extractors.

/// Text after the first colon, trimmed. A line without a colon is returned
/// whole (trimmed), so a label typed without its colon still yields a value.
pub fn after_first_colon(line: &str) -> &str {
    match line.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => line.trim(),
    }
}

/// Check if a line is a list bullet (`*` or `-`).
pub fn is_bullet(line: &str) -> bool {
    line.starts_with('*') || line.starts_with('-')
}

/// Remove one bullet marker and the whitespace after it.
pub fn strip_bullet(line: &str) -> &str {
    line.strip_prefix('*')
        .or_else(|| line.strip_prefix('-'))
        .unwrap_or(line)
        .trim()
}

/// Check `line` starts with `prefix`, ignoring ASCII case.
pub fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.is_char_boundary(prefix.len())
        && line[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_after_first_colon() {
        assert_eq!(after_first_colon("Area: Jaksel"), "Jaksel");
        assert_eq!(after_first_colon("Pukul: 14:00"), "14:00");
        assert_eq!(after_first_colon("Area :   "), "");
        assert_eq!(after_first_colon("  tanpa titik dua "), "tanpa titik dua");
    }

    #[test]
    fn test_bullets() {
        assert!(is_bullet("* cek kabel"));
        assert!(is_bullet("-restart"));
        assert!(!is_bullet("Problem: x"));
        assert_eq!(strip_bullet("*   cek kabel"), "cek kabel");
        assert_eq!(strip_bullet("- - nested"), "- nested");
        assert_eq!(strip_bullet("plain"), "plain");
    }

    #[test]
    fn test_starts_with_ignore_case() {
        assert!(starts_with_ignore_case("LOKASI: Mall", "lokasi"));
        assert!(starts_with_ignore_case("Serial Number: 9", "SERIAL NUMBER"));
        assert!(!starts_with_ignore_case("Lok", "lokasi"));
        assert!(!starts_with_ignore_case("Ééé", "e"));
    }
}
