mod builder;

pub use builder::*;
