//! Infix operator syntax inside conditional tags.
//!
//! Authors write `{% if currentVersion ver_gt "2.13" %}`. The engine exposes
//! operators as tests, so conditions are rewritten to
//! `{% if currentVersion is ver_gt("2.13") %}` before evaluation. Only the
//! bodies of `if` and `elif` tags outside raw regions are touched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::raw;

/// `if`/`elif` tag: opening, condition body, closing.
static CONDITION_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\{%-?\s*(?:if|elif)\s)(.*?)(-?%\})").unwrap());

/// Operand: a quoted string or a bare token such as `page.version`.
const OPERAND: &str = r#""[^"]*"|'[^']*'|[^\s()"',]+"#;

/// Rewrites `<left> <op> <right>` into `<left> is <op>(<right>)`.
#[derive(Clone, Debug)]
pub(crate) struct InfixRewriter {
    pattern: Option<Regex>,
}

impl InfixRewriter {
    /// Build a rewriter for the given operator names.
    pub(crate) fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let alternatives: Vec<String> = names.into_iter().map(regex::escape).collect();
        if alternatives.is_empty() {
            return Self { pattern: None };
        }
        let source = format!(
            r"({OPERAND})\s+({ops})\s+({OPERAND})",
            ops = alternatives.join("|")
        );
        // Operands and escaped names always form a valid pattern.
        Self {
            pattern: Regex::new(&source).ok(),
        }
    }

    /// Rewrite every infix use inside conditional tags of `source`.
    pub(crate) fn rewrite<'s>(&self, source: &'s str) -> Cow<'s, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(source);
        };
        if !pattern.is_match(source) {
            return Cow::Borrowed(source);
        }
        let raw_regions = raw::regions(source);
        CONDITION_TAG_RE.replace_all(source, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            if raw_regions.iter().any(|region| region.contains(&start)) {
                return caps[0].to_owned();
            }
            let condition = pattern.replace_all(&caps[2], "${1} is ${2}(${3})");
            format!("{}{condition}{}", &caps[1], &caps[3])
        })
    }
}
