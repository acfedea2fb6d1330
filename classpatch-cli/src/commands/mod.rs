pub mod common;
pub mod constants;
pub mod info;
pub mod patch;
