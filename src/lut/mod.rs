//! 16x16x16 LUT strips: generation, caching, sources and blending.

pub(crate) mod blend;
pub(crate) mod cache;
pub(crate) mod fingerprint;
pub(crate) mod source;
pub(crate) mod table;
