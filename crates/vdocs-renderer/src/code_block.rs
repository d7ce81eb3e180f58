//! Code block processor trait for extensible code block handling.
//!
//! Processors are registered with the renderer and checked in order when a
//! fenced code block with a language is encountered. The first processor
//! returning a non-`PassThrough` result wins.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use vdocs_renderer::{CodeBlockProcessor, ProcessResult};
//!
//! struct CaptionProcessor;
//!
//! impl CodeBlockProcessor for CaptionProcessor {
//!     fn process(
//!         &mut self,
//!         language: &str,
//!         attrs: &HashMap<String, String>,
//!         _source: &str,
//!         _index: usize,
//!     ) -> ProcessResult {
//!         match attrs.get("caption") {
//!             Some(caption) => ProcessResult::Decorate {
//!                 header: format!("<figcaption>{caption}</figcaption>"),
//!                 language: Some(language.to_owned()),
//!             },
//!             None => ProcessResult::PassThrough,
//!         }
//!     }
//! }
//! ```

use std::collections::HashMap;

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Render the block normally, preceded by `header` as a sibling.
    ///
    /// `language` replaces the fence language for the rendered block, so a
    /// processor can strip markers it consumed from the info string.
    Decorate {
        /// HTML inserted immediately before the code block.
        header: String,
        /// Effective language of the block.
        language: Option<String>,
    },

    /// Replace the code block with inline HTML.
    Inline(String),

    /// Render as a regular code block.
    PassThrough,
}

/// Trait for processing fenced code blocks.
pub trait CodeBlockProcessor {
    /// Process a code block and return the result.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier from fence info string
    /// * `attrs` - Attributes parsed from fence (key=value pairs)
    /// * `source` - Literal content of the code block
    /// * `index` - Zero-based index of the block in the document
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> ProcessResult;
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let attrs = parts
        .filter_map(|part| part.split_once('='))
        .map(|(key, value)| {
            let value = value.trim_matches('"').trim_matches('\'');
            (key.to_owned(), value.to_owned())
        })
        .collect();

    (language, attrs)
}
