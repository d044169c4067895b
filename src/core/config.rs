//! 核心配置
//!
//! 定义解析器和日志的配置结构及加载逻辑。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::module::version::ModuleVersion;
use crate::utils::{CoreError, Result};
use crate::{LEGACY_PLATFORM_ALIAS, PLATFORM_NAME};

/// 解析器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// 宿主平台的规范名称
    #[serde(default = "default_platform_name")]
    pub platform_name: String,

    /// 平台的旧别名，解析时会被改写为规范名称
    #[serde(default = "default_legacy_alias")]
    pub legacy_alias: String,

    /// 自动补全依赖时使用的最低平台版本
    #[serde(default = "default_min_platform_version")]
    pub min_platform_version: ModuleVersion,

    /// 模组目录中元数据文件的候选文件名（按顺序查找）
    #[serde(default = "default_metadata_files")]
    pub metadata_files: Vec<String>,
}

fn default_platform_name() -> String {
    PLATFORM_NAME.to_string()
}

fn default_legacy_alias() -> String {
    LEGACY_PLATFORM_ALIAS.to_string()
}

fn default_min_platform_version() -> ModuleVersion {
    ModuleVersion::new(1, 0, 0)
}

fn default_metadata_files() -> Vec<String> {
    vec!["everest.yaml".to_string(), "everest.yml".to_string()]
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            platform_name: default_platform_name(),
            legacy_alias: default_legacy_alias(),
            min_platform_version: default_min_platform_version(),
            metadata_files: default_metadata_files(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出到文件
    #[serde(default)]
    pub file_output: bool,

    /// 日志文件目录
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// 是否输出 JSON 格式
    #[serde(default)]
    pub json_format: bool,

    /// 日志轮转策略
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: false,
            log_dir: None,
            json_format: false,
            rotation: default_rotation(),
        }
    }
}

/// 核心配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    /// 配置文件路径
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// 解析器配置
    #[serde(default)]
    pub parser: ParserConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LogConfig,
}

impl CoreConfig {
    /// 创建配置构建器
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::new()
    }

    /// 从文件加载配置
    ///
    /// 扩展名为 `.json` 时按 JSON 解析，否则按 YAML 解析。
    pub async fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            CoreError::ConfigLoadFailed(format!("无法读取 '{}': {}", path.display(), e))
        })?;
        Self::from_content(path, &content)
    }

    /// 从文件同步加载配置
    pub fn from_file_sync(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            CoreError::ConfigLoadFailed(format!("无法读取 '{}': {}", path.display(), e))
        })?;
        Self::from_content(path, &content)
    }

    fn from_content(path: PathBuf, content: &str) -> Result<Self> {
        let mut config: CoreConfig = if path.extension().map(|e| e == "json").unwrap_or(false) {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };

        config.validate()?;
        config.config_path = Some(path);
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if self.parser.platform_name.trim().is_empty() {
            return Err(CoreError::InvalidConfigValue {
                key: "parser.platform_name".to_string(),
                reason: "平台名称不能为空".to_string(),
            });
        }
        if self.parser.metadata_files.iter().all(|f| f.trim().is_empty()) {
            return Err(CoreError::InvalidConfigValue {
                key: "parser.metadata_files".to_string(),
                reason: "至少需要一个元数据文件名".to_string(),
            });
        }
        Ok(())
    }

    /// 合并另一个配置（用于覆盖）
    pub fn merge(&mut self, other: CoreConfig) {
        // 只覆盖非默认值的配置
        if other.parser.platform_name != default_platform_name() {
            self.parser.platform_name = other.parser.platform_name;
        }
        if other.parser.legacy_alias != default_legacy_alias() {
            self.parser.legacy_alias = other.parser.legacy_alias;
        }
        if other.parser.min_platform_version != default_min_platform_version() {
            self.parser.min_platform_version = other.parser.min_platform_version;
        }
        if other.parser.metadata_files != default_metadata_files() {
            self.parser.metadata_files = other.parser.metadata_files;
        }
        if other.logging.level != default_log_level() {
            self.logging.level = other.logging.level;
        }
        if other.logging.file_output {
            self.logging.file_output = true;
            self.logging.log_dir = other.logging.log_dir;
        }
        if other.logging.json_format {
            self.logging.json_format = true;
        }
    }
}

/// 配置构建器
#[derive(Debug, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            config: CoreConfig::default(),
        }
    }

    /// 设置平台名称
    pub fn platform_name(mut self, name: impl Into<String>) -> Self {
        self.config.parser.platform_name = name.into();
        self
    }

    /// 设置平台旧别名
    pub fn legacy_alias(mut self, alias: impl Into<String>) -> Self {
        self.config.parser.legacy_alias = alias.into();
        self
    }

    /// 设置自动补全的最低平台版本
    pub fn min_platform_version(mut self, version: ModuleVersion) -> Self {
        self.config.parser.min_platform_version = version;
        self
    }

    /// 设置日志级别
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// 启用文件日志
    pub fn file_logging(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.config.logging.file_output = true;
        self.config.logging.log_dir = Some(log_dir.into());
        self
    }

    /// 启用 JSON 格式日志
    pub fn json_logging(mut self) -> Self {
        self.config.logging.json_format = true;
        self
    }

    /// 构建配置
    pub fn build(self) -> CoreConfig {
        self.config
    }
}
