pub mod actions;
pub mod log;
pub mod status;
