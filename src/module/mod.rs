//! 模组管理模块
//!
//! 包含模组元数据与契约的核心组件：
//! - 模组契约（生命周期接口）
//! - 元数据与版本号定义
//! - 元数据解析与规范化

pub mod contract;
pub mod metadata;
pub mod parser;
pub mod version;

// 重导出常用类型
pub use contract::{AudioSnapshot, EverestModule, MenuItem, MetadataSlot, ModuleMenu};
pub use metadata::{Dependency, ModuleIcon, ModuleMetadata, DEFAULT_ICON_FILE};
pub use parser::{resolve_dll_path, MetadataParser};
pub use version::ModuleVersion;
