pub(crate) mod knobs;
