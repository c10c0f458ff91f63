//! Shared text normalization helpers for behavioural test suites.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Splits `name=value, other=value` step text into unquoted pairs.
///
/// Entries without `=` are skipped.
#[must_use]
pub fn parse_assignments(text: &str) -> Vec<(String, String)> {
    text.split(',')
        .filter_map(|entry| entry.split_once('='))
        .map(|(name, value)| (name.trim().to_owned(), unquote(value).to_owned()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_assignments, unquote};

    #[test]
    fn unquote_removes_single_outer_quotes() {
        assert_eq!(unquote("'value'"), "value");
        assert_eq!(unquote("\"value\""), "value");
        assert_eq!(unquote("  bare "), "bare");
    }

    #[test]
    fn parse_assignments_splits_pairs() {
        assert_eq!(
            parse_assignments("name=\"World\", n=2, junk"),
            vec![
                ("name".to_owned(), "World".to_owned()),
                ("n".to_owned(), "2".to_owned()),
            ]
        );
    }
}
