pub(crate) mod billboard;
pub(crate) mod catalog;
pub(crate) mod compose;
pub(crate) mod store;
