pub(crate) mod ease;
pub(crate) mod map;
pub(crate) mod mask;
pub(crate) mod rng;
