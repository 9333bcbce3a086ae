pub mod args;
pub mod logger;
