//! `vdocs compare` command implementation.

use clap::Args;
use vdocs_template::ConditionOperators;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the compare command.
#[derive(Args)]
pub(crate) struct CompareArgs {
    /// Left operand, e.g. `enterprise-server@2.14`.
    left: String,

    /// Operator name (`ver_gt` or `ver_lt`).
    operator: String,

    /// Right operand, e.g. `enterprise-server@2.13`.
    right: String,
}

impl CompareArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let operators = ConditionOperators::versions();
        let result = compare(&operators, &self.left, &self.operator, &self.right)?;
        output.result(if result { "true" } else { "false" });
        Ok(())
    }
}

/// Evaluate `left <operator> right` against `operators`.
fn compare(
    operators: &ConditionOperators,
    left: &str,
    operator: &str,
    right: &str,
) -> Result<bool, CliError> {
    let comparison = operators.get(operator).ok_or_else(|| {
        let known: Vec<_> = operators.names().collect();
        CliError::Validation(format!(
            "Unknown operator '{operator}', expected one of: {}",
            known.join(", ")
        ))
    })?;
    tracing::debug!(left, operator, right, "Comparing versions");
    Ok(comparison(left, right))
}
