//! 基础设施层

pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod executor;
pub mod id;
pub mod logger;
