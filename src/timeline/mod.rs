pub(crate) mod latch;
pub(crate) mod measure;
pub(crate) mod phase;
pub(crate) mod section;
pub(crate) mod signal;
pub(crate) mod slide;
pub(crate) mod style;
