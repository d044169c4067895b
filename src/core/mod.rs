//! 核心模块
//!
//! 包含解析器与日志的配置。

pub mod config;

pub use config::{CoreConfig, CoreConfigBuilder, LogConfig, ParserConfig};
