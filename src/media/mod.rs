pub(crate) mod element;
pub(crate) mod haptics;
pub(crate) mod sync;
