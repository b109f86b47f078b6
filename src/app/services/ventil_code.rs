//! Ventil number extraction from detected code text
//!
//! The code-detection collaborator hands over free-form text; the only
//! recognized shapes are the prefixed form `"VENTIL-<digits>"` and a bare
//! integer, both case-insensitive and whitespace-tolerant.

use std::sync::OnceLock;

use crate::constants::VENTIL_CODE_PREFIX;

/// Extract a ventil number from detected code text.
///
/// Returns `None` for anything that is not a prefixed code or a bare number.
pub fn extract_ventil_number(text: &str) -> Option<i32> {
    static CODE: OnceLock<regex::Regex> = OnceLock::new();
    let re = CODE.get_or_init(|| {
        regex::Regex::new(&format!(r"(?i)^\s*{VENTIL_CODE_PREFIX}-\s*(\d+)\s*$"))
            .expect("static pattern")
    });

    if let Some(captures) = re.captures(text) {
        return captures[1].parse::<i32>().ok();
    }

    text.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_code() {
        assert_eq!(extract_ventil_number("VENTIL-042"), Some(42));
        assert_eq!(extract_ventil_number("VENTIL-001"), Some(1));
        assert_eq!(extract_ventil_number("VENTIL-165"), Some(165));
    }

    #[test]
    fn test_prefixed_code_is_case_insensitive() {
        assert_eq!(extract_ventil_number("ventil-7"), Some(7));
        assert_eq!(extract_ventil_number("Ventil-7"), Some(7));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(extract_ventil_number("  VENTIL-12  "), Some(12));
        assert_eq!(extract_ventil_number(" 12 "), Some(12));
    }

    #[test]
    fn test_bare_integer() {
        assert_eq!(extract_ventil_number("42"), Some(42));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(extract_ventil_number("not-a-code"), None);
        assert_eq!(extract_ventil_number("VENTIL-"), None);
        assert_eq!(extract_ventil_number("VENTIL-abc"), None);
        assert_eq!(extract_ventil_number("BUCHT-12"), None);
        assert_eq!(extract_ventil_number(""), None);
        assert_eq!(extract_ventil_number("12.5"), None);
    }
}
