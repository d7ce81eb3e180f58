//! Version comparison predicates for conditional content.
//!
//! Documentation authors compare the current version against a literal with
//! `{% if currentVersion ver_gt "enterprise-server@2.13" %}`. Both sides are
//! `plan@release` strings where the plan is optional and the release is
//! compared numerically after loose coercion to `major.minor.patch`.
//!
//! Every malformed or incomparable input evaluates to `false`, so a mistake in
//! a condition hides the guarded content instead of failing the render.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

/// Plan assumed when a version string carries no `@` separator.
pub const DEFAULT_PLAN: &str = "enterprise-server";

/// Separator between plan and release.
const PLAN_SEPARATOR: char = '@';

/// First `major[.minor[.patch]]` run that is not part of a longer digit run.
static COERCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{1,16})(?:\.([0-9]{1,16}))?(?:\.([0-9]{1,16}))?(?:$|[^0-9])")
        .unwrap()
});

/// A version string split into its plan and release parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionExpression<'a> {
    /// Product line, e.g. `enterprise-server`.
    pub plan: &'a str,
    /// Release part, e.g. `2.13`.
    pub release: &'a str,
}

impl<'a> VersionExpression<'a> {
    /// Split on the last `@`. Without a separator the whole input is the
    /// release and the plan is [`DEFAULT_PLAN`].
    pub fn parse(input: &'a str) -> Self {
        match input.rsplit_once(PLAN_SEPARATOR) {
            Some((plan, release)) => Self { plan, release },
            None => Self {
                plan: DEFAULT_PLAN,
                release: input,
            },
        }
    }

    /// Numeric form of the release, if one can be coerced from it.
    pub fn coerced_release(&self) -> Option<Version> {
        coerce(self.release)
    }
}

/// Loosely coerce a string into a `major.minor.patch` version.
///
/// Non-numeric prefixes and suffixes are ignored and missing components
/// default to zero, so `2.13`, `2.13.0` and `v2.13-beta` are all `2.13.0`.
///
/// # Examples
///
/// ```
/// use vdocs_template::coerce;
///
/// assert_eq!(coerce("v2.13-beta"), Some(semver::Version::new(2, 13, 0)));
/// assert_eq!(coerce("dotcom"), None);
/// ```
pub fn coerce(input: &str) -> Option<Version> {
    let caps = COERCE_RE.captures(input)?;
    let component = |index: usize| -> Option<u64> {
        caps.get(index).map_or(Some(0), |m| m.as_str().parse().ok())
    };
    Some(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Whether `left` is a strictly later release than `right` on the same plan.
///
/// # Examples
///
/// ```
/// use vdocs_template::is_greater;
///
/// assert!(is_greater("enterprise-server@2.14", "enterprise-server@2.13"));
/// assert!(!is_greater("free-pro-team", "free-pro-team@2.14"));
/// ```
pub fn is_greater(left: &str, right: &str) -> bool {
    compare(left, right) == Some(Ordering::Greater)
}

/// Whether `left` is a strictly earlier release than `right` on the same plan.
pub fn is_less(left: &str, right: &str) -> bool {
    compare(left, right) == Some(Ordering::Less)
}

/// Order two version strings, or `None` when they are not comparable.
fn compare(left: &str, right: &str) -> Option<Ordering> {
    if !includes_digit(left) || !includes_digit(right) {
        return None;
    }

    let left = VersionExpression::parse(left);
    let right = VersionExpression::parse(right);
    if left.plan != right.plan {
        return None;
    }

    Some(left.coerced_release()?.cmp(&right.coerced_release()?))
}

fn includes_digit(input: &str) -> bool {
    input.bytes().any(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_plan() {
        let expr = VersionExpression::parse("enterprise-server@2.13");
        assert_eq!(expr.plan, "enterprise-server");
        assert_eq!(expr.release, "2.13");
    }

    #[test]
    fn test_parse_without_plan_uses_default() {
        let expr = VersionExpression::parse("2.13");
        assert_eq!(expr.plan, DEFAULT_PLAN);
        assert_eq!(expr.release, "2.13");
    }

    #[test]
    fn test_parse_splits_on_last_separator() {
        let expr = VersionExpression::parse("github-ae@next@1.2");
        assert_eq!(expr.plan, "github-ae@next");
        assert_eq!(expr.release, "1.2");
    }

    #[test]
    fn test_coerce_variants_agree() {
        let expected = Some(Version::new(2, 13, 0));
        assert_eq!(coerce("2.13"), expected);
        assert_eq!(coerce("2.13.0"), expected);
        assert_eq!(coerce("v2.13-beta"), expected);
    }

    #[test]
    fn test_coerce_single_component() {
        assert_eq!(coerce("3"), Some(Version::new(3, 0, 0)));
        assert_eq!(coerce("release 11"), Some(Version::new(11, 0, 0)));
    }

    #[test]
    fn test_coerce_without_digits() {
        assert_eq!(coerce("latest"), None);
        assert_eq!(coerce(""), None);
    }

    #[test]
    fn test_coerce_rejects_overlong_run() {
        assert_eq!(coerce("12345678901234567"), None);
    }

    #[test]
    fn test_greater_same_plan() {
        assert!(is_greater("enterprise-server@2.14", "enterprise-server@2.13"));
        assert!(!is_less("enterprise-server@2.14", "enterprise-server@2.13"));
    }

    #[test]
    fn test_less_same_plan() {
        assert!(is_less("enterprise-server@2.12", "enterprise-server@2.13"));
        assert!(!is_greater("enterprise-server@2.12", "enterprise-server@2.13"));
    }

    #[test]
    fn test_numeric_not_lexical_ordering() {
        assert!(is_greater("2.13", "2.2"));
        assert!(is_less("2.2", "2.13"));
        assert!(is_greater("10.0", "9.9"));
    }

    #[test]
    fn test_equal_releases_are_neither() {
        for (left, right) in [
            ("2.13", "2.13"),
            ("enterprise-server@2.13", "enterprise-server@2.13.0"),
            ("2.13", "enterprise-server@2.13"),
        ] {
            assert!(!is_greater(left, right), "{left} > {right}");
            assert!(!is_less(left, right), "{left} < {right}");
        }
    }

    #[test]
    fn test_default_plan_matches_explicit_plan() {
        assert!(is_greater("enterprise-server@2.14", "2.13"));
        assert!(is_less("2.12", "enterprise-server@2.13"));
    }

    #[test]
    fn test_different_plans_are_incomparable() {
        assert!(!is_greater("github-ae@2.14", "enterprise-server@2.13"));
        assert!(!is_less("github-ae@2.12", "enterprise-server@2.13"));
        assert!(!is_greater("github-ae@2.14", "2.13"));
    }

    #[test]
    fn test_missing_digits_are_incomparable() {
        assert!(!is_greater("free-pro-team", "free-pro-team@2.14"));
        assert!(!is_less("free-pro-team", "free-pro-team@2.14"));
        assert!(!is_greater("2.14", "latest"));
        assert!(!is_less("2.12", "dotcom"));
    }

    #[test]
    fn test_empty_inputs_are_incomparable() {
        assert!(!is_greater("", "2.13"));
        assert!(!is_less("", "2.13"));
        assert!(!is_greater("2.14", ""));
        assert!(!is_less("", ""));
    }

    #[test]
    fn test_digit_only_in_plan_is_incomparable() {
        // The plan has a digit but the release coerces to nothing.
        assert!(!is_greater("plan2@next", "plan2@1.0"));
        assert!(!is_less("plan2@next", "plan2@1.0"));
    }
}
