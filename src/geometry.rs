pub(crate) mod letterbox;
pub(crate) mod quad;
