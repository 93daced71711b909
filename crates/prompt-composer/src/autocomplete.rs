//! Autocomplete
//!
//! Prefix suggestions for card values, looked up by item label.

/// Maximum suggestions offered at once
pub const MAX_SUGGESTIONS: usize = 5;

/// Candidates whose lowercase form starts with the lowercase input.
///
/// Empty input offers nothing, and a candidate equal to the input is not
/// offered again.
pub fn suggest(candidates: &[String], input: &str) -> Vec<String> {
    let query = input.trim().to_lowercase();
    if query.is_empty() {
        return vec![];
    }

    candidates
        .iter()
        .filter(|candidate| {
            let lower = candidate.to_lowercase();
            lower.starts_with(&query) && lower != query
        })
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// First suggestion for the input, if any
pub fn complete(candidates: &[String], input: &str) -> Option<String> {
    suggest(candidates, input).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models() -> Vec<String> {
        ["A3", "A4", "A6", "Q5", "a8", "R8", "A1", "A7"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        assert_eq!(suggest(&models(), "q"), vec!["Q5"]);
        assert_eq!(complete(&models(), "r"), Some("R8".to_string()));
    }

    #[test]
    fn test_limit_and_order() {
        assert_eq!(suggest(&models(), "a"), vec!["A3", "A4", "A6", "a8", "A1"]);
    }

    #[test]
    fn test_empty_and_exact_input() {
        assert!(suggest(&models(), "").is_empty());
        assert!(suggest(&models(), "  ").is_empty());
        assert!(suggest(&models(), "a4").is_empty());
        assert!(complete(&models(), "z").is_none());
    }
}
