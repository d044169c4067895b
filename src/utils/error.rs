//! Everest 核心错误类型定义
//!
//! 本模块定义了元数据解析、配置加载和日志初始化中使用的所有错误类型。

use thiserror::Error;

/// Everest 核心错误类型
#[derive(Error, Debug)]
pub enum CoreError {
    // ==================== 元数据错误 ====================

    /// 元数据解析失败
    ///
    /// 解析器对外只返回这一种失败，调用方应跳过该模组。
    #[error("元数据解析失败: '{source_desc}' - {reason}")]
    ParseFailure {
        /// 元数据来源（压缩包路径或目录路径）
        source_desc: String,
        /// 底层错误描述
        reason: String,
    },

    /// 版本号格式无效
    #[error("无效的版本号格式: '{0}'")]
    InvalidVersion(String),

    // ==================== 配置错误 ====================

    /// 配置加载失败
    #[error("配置加载失败: {0}")]
    ConfigLoadFailed(String),

    /// 配置值无效
    #[error("配置值无效: '{key}' - {reason}")]
    InvalidConfigValue {
        /// 配置项路径
        key: String,
        /// 无效原因
        reason: String,
    },

    // ==================== IO 和序列化错误 ====================

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML 序列化/反序列化错误
    #[error("YAML 错误: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ==================== 通用错误 ====================

    /// 初始化失败
    #[error("初始化失败: {0}")]
    InitFailed(String),
}

/// 核心操作结果类型别名
pub type Result<T> = std::result::Result<T, CoreError>;

/// 错误码常量
#[allow(missing_docs)]
pub mod error_code {
    // 元数据错误 (META-xxx)
    pub const META_PARSE_FAILED: &str = "META-001";
    pub const META_INVALID_VERSION: &str = "META-002";

    // 配置错误 (CONFIG-xxx)
    pub const CONFIG_LOAD_FAILED: &str = "CONFIG-001";
    pub const CONFIG_INVALID_VALUE: &str = "CONFIG-002";

    // IO 与序列化错误 (IO-xxx)
    pub const IO_ERROR: &str = "IO-001";
    pub const SERIALIZATION_ERROR: &str = "IO-002";

    // 核心错误 (CORE-xxx)
    pub const CORE_INIT_FAILED: &str = "CORE-001";
}

impl CoreError {
    /// 构造解析失败错误
    pub fn parse_failure(source_desc: impl Into<String>, reason: impl ToString) -> Self {
        CoreError::ParseFailure {
            source_desc: source_desc.into(),
            reason: reason.to_string(),
        }
    }

    /// 获取错误码
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::ParseFailure { .. } => error_code::META_PARSE_FAILED,
            CoreError::InvalidVersion(_) => error_code::META_INVALID_VERSION,
            CoreError::ConfigLoadFailed(_) => error_code::CONFIG_LOAD_FAILED,
            CoreError::InvalidConfigValue { .. } => error_code::CONFIG_INVALID_VALUE,
            CoreError::Io(_) => error_code::IO_ERROR,
            CoreError::Json(_) | CoreError::Yaml(_) => error_code::SERIALIZATION_ERROR,
            CoreError::InitFailed(_) => error_code::CORE_INIT_FAILED,
        }
    }

    /// 是否为解析失败（即“无记录”哨兵）
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, CoreError::ParseFailure { .. })
    }
}
