//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// - `${VAR}` expands to the value of VAR and fails if it is unset
/// - `${VAR:-default}` falls back to `default`
///
/// Values without a `${` reference are returned unchanged, bare `$VAR`
/// included. Once a value contains `${`, bare `$VAR` references in it are
/// expanded as well.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VDOCS_TEST_EXPAND_SIMPLE", "includes");
        }
        let result = expand_env("${VDOCS_TEST_EXPAND_SIMPLE}/shared", "templates.includes_dir");
        assert_eq!(result.unwrap(), "includes/shared");
        unsafe {
            std::env::remove_var("VDOCS_TEST_EXPAND_SIMPLE");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VDOCS_TEST_EXPAND_UNSET");
        }
        let result = expand_env(
            "${VDOCS_TEST_EXPAND_UNSET:-enterprise-server@3.0}",
            "versions.current",
        );
        assert_eq!(result.unwrap(), "enterprise-server@3.0");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("VDOCS_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${VDOCS_TEST_EXPAND_MISSING}", "versions.current").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in versions.current: ${VDOCS_TEST_EXPAND_MISSING} not set"
        );
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("includes", "f").unwrap(), "includes");
        assert_eq!(expand_env("$HOME/includes", "f").unwrap(), "$HOME/includes");
    }

    #[test]
    fn test_bare_dollar_expanded_alongside_braced() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("VDOCS_TEST_EXPAND_BRACED", "docs");
            std::env::set_var("VDOCS_TEST_EXPAND_BARE", "shared");
        }
        let result = expand_env(
            "${VDOCS_TEST_EXPAND_BRACED}/$VDOCS_TEST_EXPAND_BARE",
            "templates.includes_dir",
        );
        assert_eq!(result.unwrap(), "docs/shared");
        unsafe {
            std::env::remove_var("VDOCS_TEST_EXPAND_BRACED");
            std::env::remove_var("VDOCS_TEST_EXPAND_BARE");
        }
    }
}
