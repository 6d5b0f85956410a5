//! CLI command implementations.

pub(crate) mod passes;
pub(crate) mod render;

pub(crate) use passes::PassesArgs;
pub(crate) use render::RenderArgs;
