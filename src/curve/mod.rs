pub(crate) mod bezier;
pub(crate) mod preview;
pub(crate) mod space;
