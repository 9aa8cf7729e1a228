pub mod precompile;
pub mod preinstall;
pub mod setup;
pub mod version;
