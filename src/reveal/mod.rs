pub(crate) mod choreography;
pub(crate) mod lifecycle;
pub(crate) mod reconcile;
pub(crate) mod slots;
pub(crate) mod text;
