pub(crate) mod cover;
pub(crate) mod edge;
pub(crate) mod glow;
pub(crate) mod renderer;
