//! Named comparison operators available inside conditional tags.
//!
//! The operator table is an ordinary value handed to
//! [`TemplateEngine::new`](crate::TemplateEngine::new). Each engine gets its own
//! copy, so tests and concurrent renderers never share registration state.

use std::collections::BTreeMap;

use crate::version::{is_greater, is_less};

/// A binary condition operator over the string forms of its operands.
pub type Comparison = fn(&str, &str) -> bool;

/// Name of the version "greater than" operator.
pub const VER_GT: &str = "ver_gt";

/// Name of the version "less than" operator.
pub const VER_LT: &str = "ver_lt";

/// Mapping from operator name to comparison function.
#[derive(Clone, Debug, Default)]
pub struct ConditionOperators {
    operators: BTreeMap<&'static str, Comparison>,
}

impl ConditionOperators {
    /// Create an empty operator table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with `ver_gt` and `ver_lt`.
    #[must_use]
    pub fn versions() -> Self {
        Self::new().with(VER_GT, is_greater).with(VER_LT, is_less)
    }

    /// Add or replace an operator.
    ///
    /// Names must be identifiers (`[A-Za-z_][A-Za-z0-9_]*`); other names are
    /// ignored because the template grammar cannot refer to them.
    #[must_use]
    pub fn with(mut self, name: &'static str, comparison: Comparison) -> Self {
        if is_identifier(name) {
            self.operators.insert(name, comparison);
        } else {
            tracing::warn!(name, "Ignoring condition operator with invalid name");
        }
        self
    }

    /// Look up an operator by name.
    pub fn get(&self, name: &str) -> Option<Comparison> {
        self.operators.get(name).copied()
    }

    /// Evaluate `left <name> right`. Unknown operators evaluate to `false`.
    pub fn evaluate(&self, name: &str, left: &str, right: &str) -> bool {
        self.get(name).is_some_and(|op| op(left, right))
    }

    /// Iterate over `(name, comparison)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Comparison)> + '_ {
        self.operators.iter().map(|(name, op)| (*name, *op))
    }

    /// Operator names in name order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operators.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
