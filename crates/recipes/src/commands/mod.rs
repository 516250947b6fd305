//! CLI command implementations.

pub(crate) mod serve;
pub(crate) mod toc;

pub(crate) use serve::ServeArgs;
pub(crate) use toc::TocArgs;
