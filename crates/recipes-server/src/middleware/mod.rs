//! Response middleware.

pub(crate) mod caching;
pub(crate) mod security;
