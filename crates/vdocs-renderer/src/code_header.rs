//! Language header with a copy button for fenced code blocks.
//!
//! Decoration is opt-in per block: the fence language must end with
//! [`COPY_SUFFIX`], as in ```` ```ruby{:copy} ````. The suffix is stripped,
//! the remaining tag is mapped to a display name, and a `<header>` carrying the
//! name and a clipboard button is inserted right before the block. The block
//! itself is rendered unchanged.

use std::collections::HashMap;
use std::fmt::Write;

use crate::code_block::{CodeBlockProcessor, ProcessResult};
use crate::state::{escape_attr, escape_text};

/// Fence language suffix that opts a block into the header.
pub const COPY_SUFFIX: &str = "{:copy}";

/// Label used when the block declares no language besides the suffix.
pub const FALLBACK_LABEL: &str = "Code";

/// Classes of the header element, shared with the site stylesheet.
pub const HEADER_CLASSES: &str =
    "d-flex flex-items-center flex-justify-between p-2 text-small rounded-top-1 border";

/// Classes of the copy button; `js-btn-copy` is the clipboard script hook.
pub const BUTTON_CLASSES: &str = "js-btn-copy btn btn-sm tooltipped tooltipped-nw";

const BUTTON_LABEL: &str = "Copy code to clipboard";

/// Octicon "clippy".
const CLIPPY_ICON: &str = concat!(
    r#"<svg class="octicon octicon-clippy" viewBox="0 0 14 16" version="1.1" width="14" height="16" aria-hidden="true">"#,
    r#"<path fill-rule="evenodd" d="M2 13h4v1H2v-1zm5-6H2v1h5V7zm2 3V8l-3 3 3 3v-2h5v-2H9zM4.5 9H2v1h2.5V9zM2 12h2.5v-1H2v1zm9 1h1v2c-.02.28-.11.52-.3.7-.19.18-.42.28-.7.3H1c-.55 0-1-.45-1-1V4c0-.55.45-1 1-1h3c0-1.11.89-2 2-2 1.11 0 2 .89 2 2h3c.55 0 1 .45 1 1v5h-1V6H1v9h10v-2zM2 5h8c0-.55-.45-1-1-1H8c-.55 0-1-.45-1-1s-.45-1-1-1-1 .45-1 1-.45 1-1 1H3c-.55 0-1 .45-1 1z"></path>"#,
    "</svg>"
);

/// A fenced code block as seen by the decorator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeBlockNode<'a> {
    /// Effective language, with [`COPY_SUFFIX`] already stripped.
    pub language: Option<&'a str>,
    /// Whether the fence asked for a copy button.
    pub has_copy: bool,
    /// Literal text of the block.
    pub literal: &'a str,
}

impl<'a> CodeBlockNode<'a> {
    /// Build a node from the declared fence language and the block text.
    pub fn from_fence(language: Option<&'a str>, literal: &'a str) -> Self {
        match language.and_then(|lang| lang.strip_suffix(COPY_SUFFIX)) {
            Some(stripped) => Self {
                language: Some(stripped),
                has_copy: true,
                literal,
            },
            None => Self {
                language,
                has_copy: false,
                literal,
            },
        }
    }

    /// Language to render the block with; an empty tag counts as none.
    pub fn effective_language(&self) -> Option<&'a str> {
        self.language.filter(|lang| !lang.is_empty())
    }
}

/// Header inserted before a decorated code block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeHeader<'a> {
    /// Human-readable language name.
    pub label: &'a str,
    /// Text handed to the clipboard button.
    pub copy_text: &'a str,
}

impl CodeHeader<'_> {
    /// Append the header HTML to `out`.
    pub fn render(&self, out: &mut String) {
        write!(
            out,
            r#"<header class="{HEADER_CLASSES}"><span>{}</span><button class="{BUTTON_CLASSES}" data-clipboard-text="{}" aria-label="{BUTTON_LABEL}">{CLIPPY_ICON}</button></header>"#,
            escape_text(self.label),
            escape_attr(self.copy_text),
        )
        .unwrap();
    }

    /// Header HTML as a new string.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(1024 + self.copy_text.len());
        self.render(&mut out);
        out
    }
}

/// Decide whether `node` gets a header, and build it.
///
/// Returns `None` unless the fence language carried [`COPY_SUFFIX`].
pub fn decorate<'a>(node: &CodeBlockNode<'a>) -> Option<CodeHeader<'a>> {
    if !node.has_copy {
        return None;
    }
    Some(CodeHeader {
        label: label(node.effective_language()),
        copy_text: node.literal,
    })
}

/// Display label for a language tag.
///
/// Known aliases map to their display name, unknown tags are shown as written,
/// and a missing tag falls back to [`FALLBACK_LABEL`].
pub fn label(language: Option<&str>) -> &str {
    match language {
        Some(lang) => display_name(lang).unwrap_or(lang),
        None => FALLBACK_LABEL,
    }
}

/// Display name for a lowercase language alias.
pub fn display_name(alias: &str) -> Option<&'static str> {
    let name = match alias {
        "asp" | "aspx" | "aspx-vb" => "ASP",
        "as3" => "ActionScript",
        "apache" => "ApacheConf",
        "nasm" => "Assembly",
        "bat" => "Batchfile",
        "c#" | "csharp" => "C#",
        "c" => "C",
        "c++" | "cpp" => "C++",
        "chpl" => "Chapel",
        "coffee" | "coffee-script" => "CoffeeScript",
        "cfm" => "ColdFusion",
        "common-lisp" | "lisp" => "Common Lisp",
        "dpatch" => "Darcs Patch",
        "dart" => "Dart",
        "elisp" | "emacs" | "emacs-lisp" => "Emacs Lisp",
        "pot" => "Gettext Catalog",
        "html" | "xhtml" => "HTML",
        "html+erb" | "erb" => "HTML+ERB",
        "irc" => "IRC log",
        "json" => "JSON",
        "jsp" => "Java Server Pages",
        "java" => "Java",
        "javascript" | "js" => "JavaScript",
        "lhs" | "literate-haskell" => "Literate Haskell",
        "objc" => "Objective-C",
        "openedge" | "progress" | "abl" => "OpenEdge ABL",
        "pir" => "Parrot Internal Representation",
        "posh" => "PowerShell",
        "puppet" => "Puppet",
        "pure-data" => "Pure Data",
        "raw" => "Raw token data",
        "rb" | "ruby" => "Ruby",
        "r" => "R",
        "scheme" => "Scheme",
        "bash" | "sh" | "shell" | "zsh" | "shellsession" => "Shell",
        "supercollider" => "SuperCollider",
        "tex" => "TeX",
        "ts" => "TypeScript",
        "vim" | "viml" => "Vim script",
        "rst" => "reStructuredText",
        "xbm" => "X BitMap",
        "xpm" => "X PixMap",
        "yaml" | "yml" => "YAML",
        "jsx" => "JSX",
        _ => return None,
    };
    Some(name)
}

/// [`CodeBlockProcessor`] inserting [`CodeHeader`]s for `{:copy}` blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct CodeHeaderProcessor;

impl CodeBlockProcessor for CodeHeaderProcessor {
    fn process(
        &mut self,
        language: &str,
        _attrs: &HashMap<String, String>,
        source: &str,
        _index: usize,
    ) -> ProcessResult {
        let node = CodeBlockNode::from_fence(Some(language), source);
        match decorate(&node) {
            Some(header) => ProcessResult::Decorate {
                header: header.to_html(),
                language: node.effective_language().map(str::to_owned),
            },
            None => ProcessResult::PassThrough,
        }
    }
}
