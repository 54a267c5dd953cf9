//! Environment variable lookup with alias fallback.
//!
//! Keeps the fallback chain in one place so callers never repeat `or_else`.

use std::env;

/// Read `primary`, then each alias in order; fall back to `default`.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env_optional(primary, aliases).unwrap_or_else(default)
}

/// Read `primary`, then each alias in order. Empty values count as unset.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    std::iter::once(primary)
        .chain(aliases.iter().copied())
        .find_map(|key| {
            env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
}

/// Parse a boolean variable: 0/false/no/off are false, anything else is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    match env_optional(primary, aliases) {
        Some(s) => !matches!(
            s.to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names so they can run in parallel.

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        std::env::set_var("RECAST_TEST_BLANK", "   ");
        assert_eq!(env_optional("RECAST_TEST_BLANK", &[]), None);
        std::env::remove_var("RECAST_TEST_BLANK");
    }

    #[test]
    fn test_env_optional_falls_back_to_alias() {
        std::env::remove_var("RECAST_TEST_PRIMARY_MISSING");
        std::env::set_var("RECAST_TEST_ALIAS", "/opt/rustc");
        assert_eq!(
            env_optional("RECAST_TEST_PRIMARY_MISSING", &["RECAST_TEST_ALIAS"]).as_deref(),
            Some("/opt/rustc")
        );
        std::env::remove_var("RECAST_TEST_ALIAS");
    }

    #[test]
    fn test_env_bool_values() {
        std::env::set_var("RECAST_TEST_BOOL_OFF", "Off");
        std::env::set_var("RECAST_TEST_BOOL_ON", "1");
        assert!(!env_bool("RECAST_TEST_BOOL_OFF", &[], true));
        assert!(env_bool("RECAST_TEST_BOOL_ON", &[], false));
        assert!(env_bool("RECAST_TEST_BOOL_UNSET", &[], true));
        std::env::remove_var("RECAST_TEST_BOOL_OFF");
        std::env::remove_var("RECAST_TEST_BOOL_ON");
    }

    #[test]
    fn test_env_or_default() {
        assert_eq!(
            env_or("RECAST_TEST_OR_UNSET", &[], || "fallback".to_string()),
            "fallback"
        );
    }
}
