pub mod config;
pub mod effects;
pub mod logging;
pub mod render;
pub mod runtime;
