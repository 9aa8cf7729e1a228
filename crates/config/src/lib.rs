pub mod artifacts;
pub mod consts;
pub mod templates;
