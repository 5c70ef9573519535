//! Fortune Response Parser
//!
//! Turns raw provider text into fortune entries:
//! 1. Strip markdown code-fence markers (```json and ```) and whitespace
//! 2. Deserialize a JSON array of `{fortune, periodValue, result}` objects
//! 3. Expand the " | " sub-point delimiter into newlines
//!
//! Parsing is all-or-nothing: any malformed element fails the whole response.

use tracing::debug;

use crate::types::{FortuneEntry, FortuneError};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Delimiter the provider uses to pack several points into one result
pub const RESULT_DELIMITER: &str = " | ";

/// Remove every code-fence marker and surrounding whitespace
///
/// Idempotent: stripping an already stripped text changes nothing.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace(JSON_FENCE, "").replace(FENCE, "").trim().to_string()
}

/// Replace every result delimiter with a newline
pub fn normalize_result(result: &str) -> String {
    result.replace(RESULT_DELIMITER, "\n")
}

/// Parse provider text into entries
pub fn parse_entries(raw: &str) -> Result<Vec<FortuneEntry>, FortuneError> {
    let cleaned = strip_code_fences(raw);

    let mut entries: Vec<FortuneEntry> =
        serde_json::from_str(&cleaned).map_err(|source| FortuneError::Parse { source })?;

    for entry in &mut entries {
        if entry.result.contains(RESULT_DELIMITER) {
            entry.result = normalize_result(&entry.result);
        }
    }

    debug!("Parsed {} fortune entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FortuneErrorKind, FortuneType, PeriodValue};
    use proptest::prelude::*;
    use std::error::Error as _;

    const VALID_JSON: &str = r#"[
        {"fortune": "love", "periodValue": "january", "result": "연애운 좋음"},
        {"fortune": "love", "periodValue": "february", "result": "연애운 신경"},
        {"fortune": "health", "periodValue": "march", "result": "건강운 변화"}
    ]"#;

    #[test]
    fn test_parse_fenced_response() {
        let raw = format!("```json\n{}\n```", VALID_JSON);
        let entries = parse_entries(&raw).unwrap();

        assert_eq!(
            entries,
            vec![
                FortuneEntry::new(FortuneType::Love, PeriodValue::January, "연애운 좋음"),
                FortuneEntry::new(FortuneType::Love, PeriodValue::February, "연애운 신경"),
                FortuneEntry::new(FortuneType::Health, PeriodValue::March, "건강운 변화"),
            ]
        );
    }

    #[test]
    fn test_parse_unfenced_response() {
        assert_eq!(parse_entries(VALID_JSON).unwrap().len(), 3);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_entries("```json\n[]\n```").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error_with_cause() {
        let err = parse_entries("```json\ninvalid json\n```").unwrap_err();
        assert_eq!(err.kind(), FortuneErrorKind::ParseError);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unknown_enum_key_fails_whole_response() {
        let raw = r#"[
            {"fortune": "love", "periodValue": "january", "result": "ok"},
            {"fortune": "romance", "periodValue": "january", "result": "bad"}
        ]"#;
        let err = parse_entries(raw).unwrap_err();
        assert_eq!(err.kind(), FortuneErrorKind::ParseError);
    }

    #[test]
    fn test_key_match_is_case_exact() {
        let raw = r#"[{"fortune": "Love", "periodValue": "january", "result": "x"}]"#;
        assert!(parse_entries(raw).is_err());
    }

    #[test]
    fn test_object_instead_of_array_fails() {
        let raw = r#"{"fortune": "love", "periodValue": "january", "result": "x"}"#;
        assert!(parse_entries(raw).is_err());
    }

    #[test]
    fn test_delimiter_expanded_to_newlines() {
        let raw = r#"[{"fortune": "money", "periodValue": "q1", "result": "a | b | c"}]"#;
        let entries = parse_entries(raw).unwrap();
        assert_eq!(entries[0].result, "a\nb\nc");
    }

    #[test]
    fn test_whitespace_result_passes_through() {
        let raw = r#"[{"fortune": "luck", "periodValue": "year", "result": "   "}]"#;
        assert_eq!(parse_entries(raw).unwrap()[0].result, "   ");
    }

    #[test]
    fn test_strip_code_fences_without_newlines() {
        assert_eq!(strip_code_fences("```json[]```"), "[]");
        assert_eq!(strip_code_fences("  ```\n[1]\n```  "), "[1]");
    }

    proptest! {
        #[test]
        fn prop_strip_is_idempotent(raw in "[`a-z\\[\\]{} \n|]{0,64}") {
            let once = strip_code_fences(&raw);
            prop_assert_eq!(strip_code_fences(&once), once.clone());
        }

        #[test]
        fn prop_normalize_leaves_no_delimiter(parts in proptest::collection::vec("[a-z가-힣 ]{0,8}", 1..6)) {
            let joined = parts.join(RESULT_DELIMITER);
            let normalized = normalize_result(&joined);
            prop_assert!(!normalized.contains(RESULT_DELIMITER));
        }

        #[test]
        fn prop_fenced_array_parses(count in 0usize..6) {
            let items: Vec<String> = (0..count)
                .map(|i| format!(r#"{{"fortune":"overall","periodValue":"q{}","result":"r{}"}}"#, i % 4 + 1, i))
                .collect();
            let raw = format!("```json\n[{}]\n```", items.join(","));
            prop_assert_eq!(parse_entries(&raw).unwrap().len(), count);
        }
    }
}
