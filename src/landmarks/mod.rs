pub(crate) mod model;
pub(crate) mod regions;
pub(crate) mod smooth;
