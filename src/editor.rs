pub(crate) mod overlay;
pub(crate) mod redraw;
pub(crate) mod state;
