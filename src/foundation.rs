pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod json_num;
pub(crate) mod math;
