//! Attribute key normalization.
use crate::error::{AttributeError, AttributeResult};
use opentelemetry::Key;

/// Namespace every APM attribute key starts with.
pub const APM_PREFIX: &str = "apm.";

// key validation error strings
pub(crate) const KEY_EMPTY: &str = "attribute key must be non-empty";
pub(crate) const KEY_WHITESPACE: &str = "attribute key must not contain whitespace";
pub(crate) const KEY_INVALID_CHAR: &str =
    "characters in attribute key must be ASCII letters, digits or '.'";

/// Validate `key` and turn it into the attribute name written to the span.
///
/// Surrounding whitespace is trimmed, the key is lowercased and [`APM_PREFIX`]
/// is prepended unless it is already there. The result is stable: normalizing
/// an already normalized key returns it unchanged.
///
/// # Examples
///
/// ```
/// use opentelemetry_apm::normalize_key;
///
/// assert_eq!(normalize_key("User.ID").unwrap().as_str(), "apm.user.id");
/// assert_eq!(normalize_key("APM.tags").unwrap().as_str(), "apm.tags");
/// assert!(normalize_key("user id").is_err());
/// ```
pub fn normalize_key(key: &str) -> AttributeResult<Key> {
    let key = key.trim();
    validate_key(key)?;

    let key = key.to_ascii_lowercase();
    if key.starts_with(APM_PREFIX) {
        Ok(Key::from(key))
    } else {
        Ok(Key::from(format!("{APM_PREFIX}{key}")))
    }
}

fn validate_key(key: &str) -> AttributeResult<()> {
    let reason = if key.is_empty() {
        KEY_EMPTY
    } else if key.contains(char::is_whitespace) {
        KEY_WHITESPACE
    } else if key.contains(|c: char| !c.is_ascii_alphanumeric() && c != '.') {
        KEY_INVALID_CHAR
    } else {
        return Ok(());
    };

    Err(AttributeError::InvalidKey {
        key: key.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user.id", "apm.user.id")]
    #[case("User.ID", "apm.user.id")]
    #[case("apm.Tags", "apm.tags")]
    #[case("APM.tags", "apm.tags")]
    #[case("  padded  ", "apm.padded")]
    #[case("apm", "apm.apm")]
    #[case("request2.count", "apm.request2.count")]
    #[case("apm.apm.nested", "apm.apm.nested")]
    fn normalizes_valid_keys(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("", KEY_EMPTY)]
    #[case("   ", KEY_EMPTY)]
    #[case("\t\n", KEY_EMPTY)]
    #[case("key with space", KEY_WHITESPACE)]
    #[case("key\twith.tab", KEY_WHITESPACE)]
    #[case("user_id", KEY_INVALID_CHAR)]
    #[case("user-id", KEY_INVALID_CHAR)]
    #[case("user/id", KEY_INVALID_CHAR)]
    #[case("utf8char锈", KEY_INVALID_CHAR)]
    fn rejects_invalid_keys(#[case] input: &str, #[case] expected_reason: &str) {
        match normalize_key(input) {
            Err(AttributeError::InvalidKey { key, reason }) => {
                assert_eq!(key, input.trim());
                assert_eq!(reason, expected_reason);
            }
            other => panic!("expected InvalidKey for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for key in ["a", "A.b.C", "apm.x", "APM", "9.9", "...", "apm."] {
            let once = normalize_key(key).unwrap();
            let twice = normalize_key(once.as_str()).unwrap();
            assert_eq!(once, twice, "key {key:?}");
        }
    }

    #[test]
    fn prefix_is_not_doubled() {
        let key = normalize_key("apm.request.success").unwrap();
        assert_eq!(key.as_str().matches(APM_PREFIX).count(), 1);
    }
}
