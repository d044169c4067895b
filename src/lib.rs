//! # Everest Core - 模组元数据与生命周期契约
//!
//! 宿主在发现一个模组后，用本库完成以下工作：
//!
//! - **元数据解析**: 从 everest.yaml 解码模组名称、版本、代码位置和依赖列表
//! - **规范化**: 写入发现位置、把 DLL 路径转换为模组目录下的绝对路径
//! - **依赖修复**: 旧别名 `API` 改名为 `Everest`，缺失平台依赖时自动补入
//! - **模组契约**: 宿主驱动的 `load` / `unload` / 设置菜单钩子
//!
//! 发现模组、决定加载顺序以及执行模组代码都不在本库范围内。
//!
//! ## 快速开始
//!
//! ```rust
//! use everest_core::{MetadataParser, ModuleVersion};
//!
//! let yaml = "Name: Foo\nVersion: 1.2.3\nDLL: Code/Foo.dll\n";
//! let metadata = MetadataParser::new()
//!     .parse("", "/mods/Foo", yaml.as_bytes())
//!     .expect("valid metadata");
//!
//! assert_eq!(metadata.to_string(), "Foo 1.2.3");
//! assert_eq!(metadata.dependencies[0].name, "Everest");
//! assert_eq!(metadata.dependencies[0].version, ModuleVersion::new(1, 0, 0));
//! ```
//!
//! ## 模块结构
//!
//! - `module` - 模组契约、元数据、版本号与解析器
//! - `core` - 配置
//! - `utils` - 错误类型和日志系统

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod core;
pub mod module;
pub mod utils;

// 重导出常用类型，方便使用
pub use module::{
    AudioSnapshot, Dependency, EverestModule, MenuItem, MetadataParser, MetadataSlot,
    ModuleIcon, ModuleMenu, ModuleMetadata, ModuleVersion, resolve_dll_path,
};

pub use utils::{error_code, CoreError, Result};
pub use utils::logger::{fields, LogGuard, Logger, LoggerConfig, LoggerConfigBuilder, RotationStrategy};

pub use core::config::{CoreConfig, CoreConfigBuilder, LogConfig, ParserConfig};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 宿主平台的规范名称
pub const PLATFORM_NAME: &str = "Everest";

/// 宿主平台的旧别名
pub const LEGACY_PLATFORM_ALIAS: &str = "API";

/// 解析器日志使用的固定目标
pub const LOG_TARGET: &str = "loader";
