//! CLI command implementations.

pub(crate) mod compare;
pub(crate) mod render;

pub(crate) use compare::CompareArgs;
pub(crate) use render::RenderArgs;
