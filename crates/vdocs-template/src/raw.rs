//! Protection of `{% raw %}` regions across template-unaware stages.
//!
//! The markdown stage runs between two template passes and knows nothing about
//! template delimiters. [`protect`] breaks every delimiter inside a raw region
//! by inserting [`SENTINEL`] after its first character, so the first template
//! pass leaves the region alone. [`restore`] removes the sentinel again once the
//! markdown stage is done.
//!
//! Only terminated regions are protected. A `{% raw %}` without a matching
//! `{% endraw %}` is left as ordinary text.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Literal inserted into delimiters inside raw regions.
pub const SENTINEL: &str = "---";

/// Opening raw tag, matched literally.
pub const RAW_START: &str = "{% raw %}";

/// Closing raw tag, matched literally.
pub const RAW_END: &str = "{% endraw %}";

/// Leftmost shortest raw region; regions never nest.
static RAW_REGION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "(?s){}.*?{}",
        regex::escape(RAW_START),
        regex::escape(RAW_END)
    ))
    .unwrap()
});

/// Template delimiters: `{%`, `{{`, `{#` and their closing forms.
static DELIMITER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[%{#]|[%}#]\}").unwrap());

/// Delimiters carrying the sentinel after their first character.
static OBFUSCATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\{{{s}[%{{#]|[%}}#]{s}\}}",
        s = regex::escape(SENTINEL)
    ))
    .unwrap()
});

/// Obfuscate template delimiters inside every raw region, tags included.
///
/// Text outside raw regions is returned unchanged.
///
/// # Examples
///
/// ```
/// use vdocs_template::raw;
///
/// assert_eq!(
///     raw::protect("{% raw %}{{ x }}{% endraw %}"),
///     "{---% raw %---}{---{ x }---}{---% endraw %---}"
/// );
/// ```
pub fn protect(text: &str) -> Cow<'_, str> {
    if !text.contains(RAW_START) {
        return Cow::Borrowed(text);
    }
    RAW_REGION_RE.replace_all(text, |caps: &Captures<'_>| obfuscate_region(&caps[0]))
}

/// Remove the sentinel from every obfuscated delimiter in `text`.
///
/// Obfuscated delimiters are `{---%`, `{---{`, `{---#` and their closing
/// forms `%---}`, `}---}`, `#---}`.
///
/// Not limited to raw regions: after [`protect`] the only obfuscated
/// delimiters are the ones it produced.
pub fn restore(text: &str) -> Cow<'_, str> {
    if !text.contains(SENTINEL) {
        return Cow::Borrowed(text);
    }
    OBFUSCATED_RE.replace_all(text, |caps: &Captures<'_>| caps[0].replacen(SENTINEL, "", 1))
}

/// Byte ranges of every terminated raw region, tags included.
pub(crate) fn regions(text: &str) -> Vec<Range<usize>> {
    if !text.contains(RAW_START) {
        return Vec::new();
    }
    RAW_REGION_RE.find_iter(text).map(|m| m.range()).collect()
}

fn obfuscate_region(region: &str) -> String {
    DELIMITER_RE
        .replace_all(region, |caps: &Captures<'_>| {
            let delimiter = &caps[0];
            let (first, rest) = delimiter.split_at(1);
            format!("{first}{SENTINEL}{rest}")
        })
        .into_owned()
}
