//! Video backends, the clock driver and the timeline link.

pub(crate) mod backend;
pub(crate) mod driver;
pub(crate) mod events;
pub(crate) mod link;
pub(crate) mod memory;
pub(crate) mod request;
pub(crate) mod texture_store;
pub(crate) mod track;
pub(crate) mod url;
