pub(crate) mod page;
pub(crate) mod registry;
pub(crate) mod runtime;
pub(crate) mod spec;
