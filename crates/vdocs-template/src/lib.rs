//! Template layer for versioned documentation.
//!
//! Wraps [`minijinja`] with the pieces documentation sources need on top of a
//! plain template engine:
//!
//! - [`version`]: `ver_gt` / `ver_lt` predicates over `plan@release` strings
//! - [`raw`]: reversible protection of `{% raw %}` regions
//! - [`ConditionOperators`]: explicit operator table passed to the engine
//! - [`TemplateEngine`]: engine with operators registered and an optional
//!   include directory
//!
//! # Example
//!
//! ```
//! use minijinja::context;
//! use vdocs_template::{ConditionOperators, TemplateEngine};
//!
//! let engine = TemplateEngine::new(ConditionOperators::versions());
//! let ctx = context! { currentVersion => "2.14" };
//! let out = engine
//!     .render("page.md", r#"{% if currentVersion ver_gt "2.13" %}new{% endif %}"#, &ctx)
//!     .unwrap();
//! assert_eq!(out, "new");
//! ```

mod engine;
mod error;
mod infix;
mod operators;
pub mod raw;
pub mod version;

pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use operators::{Comparison, ConditionOperators, VER_GT, VER_LT};
pub use version::{DEFAULT_PLAN, VersionExpression, coerce, is_greater, is_less};
