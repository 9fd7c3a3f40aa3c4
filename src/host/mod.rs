pub(crate) mod accessor;
pub(crate) mod apply;
pub(crate) mod memory;
