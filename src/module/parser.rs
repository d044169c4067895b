//! 模组元数据解析器
//!
//! 负责从 everest.yaml 解析模组元数据，并完成以下规范化步骤：
//!
//! 1. 解码文档（失败时记录一条错误日志并返回 `ParseFailure`）
//! 2. 写入发现位置（`path_archive` / `path_directory`）
//! 3. 规范化 DLL 路径（仅目录模组）
//! 4. 修复平台依赖（旧别名改名，缺失时在首位补入）
//!
//! 解析器本身不持有可变状态，可以在多个线程中同时使用。

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, MAIN_SEPARATOR};
use tracing::{debug, error, warn};

use crate::core::config::ParserConfig;
use crate::module::metadata::{Dependency, ModuleMetadata};
use crate::utils::{CoreError, Result};
use crate::LOG_TARGET;

/// 文档顶层既可以是单个条目，也可以是条目序列
///
/// 条目直接从 YAML 事件流解码，版本号等标量保持原文。
enum MetadataDocument {
    Many(Vec<ModuleMetadata>),
    One(ModuleMetadata),
}

impl<'de> Deserialize<'de> for MetadataDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = MetadataDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("模组条目或模组条目序列")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = seq.next_element()? {
                    entries.push(entry);
                }
                Ok(MetadataDocument::Many(entries))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Self::Value, A::Error> {
                ModuleMetadata::deserialize(MapAccessDeserializer::new(map)).map(MetadataDocument::One)
            }
        }

        deserializer.deserialize_any(DocumentVisitor)
    }
}

impl MetadataDocument {
    fn into_entries(self) -> Vec<ModuleMetadata> {
        match self {
            MetadataDocument::Many(entries) => entries,
            MetadataDocument::One(entry) => vec![entry],
        }
    }
}

/// 模组元数据解析器
#[derive(Debug, Clone, Default)]
pub struct MetadataParser {
    config: ParserConfig,
}

impl MetadataParser {
    /// 使用默认配置创建解析器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定配置创建解析器
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// 当前配置
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// 解析单个模组的元数据
    ///
    /// # Arguments
    ///
    /// * `archive_path` - 压缩包绝对路径（目录模组传空串）
    /// * `directory_path` - 目录绝对路径（压缩包模组传空串）
    /// * `reader` - 元数据文档的字节流
    ///
    /// # Errors
    ///
    /// 文档无法解码、为空或包含多于一个条目时返回 `ParseFailure`，
    /// 此时已经记录了一条错误日志，调用方应跳过该模组。
    pub fn parse<R: Read>(
        &self,
        archive_path: &str,
        directory_path: &str,
        reader: R,
    ) -> Result<ModuleMetadata> {
        let source = source_desc(archive_path, directory_path);
        let mut entries = self
            .decode(reader)
            .and_then(|entries| match entries.len() {
                1 => Ok(entries),
                n => Err(format!("文档应只包含一个模组条目，实际为 {}", n)),
            })
            .map_err(|reason| fail(&source, reason))?;

        let mut metadata = entries.remove(0);
        self.normalize(&mut metadata, archive_path, directory_path);
        Ok(metadata)
    }

    /// 解析可能包含多个条目的元数据文档
    ///
    /// 每个条目都按相同的位置信息规范化。任一条目无效时整个文档视为失败。
    pub fn parse_all<R: Read>(
        &self,
        archive_path: &str,
        directory_path: &str,
        reader: R,
    ) -> Result<Vec<ModuleMetadata>> {
        let source = source_desc(archive_path, directory_path);
        let mut entries = self
            .decode(reader)
            .map_err(|reason| fail(&source, reason))?;

        for metadata in &mut entries {
            self.normalize(metadata, archive_path, directory_path);
        }
        Ok(entries)
    }

    /// 从解压后的模组目录同步解析元数据
    ///
    /// 按配置中的文件名顺序查找元数据文件。
    pub fn parse_directory(&self, dir: &Path) -> Result<Vec<ModuleMetadata>> {
        let directory_path = dir.to_string_lossy();
        for name in &self.config.metadata_files {
            match std::fs::File::open(dir.join(name)) {
                Ok(file) => return self.parse_all("", &directory_path, file),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(fail(&directory_path, e)),
            }
        }
        Err(fail(&directory_path, self.missing_file_reason()))
    }

    /// 从解压后的模组目录异步解析元数据
    pub async fn parse_directory_async(&self, dir: &Path) -> Result<Vec<ModuleMetadata>> {
        let directory_path = dir.to_string_lossy();
        for name in &self.config.metadata_files {
            match tokio::fs::read(dir.join(name)).await {
                Ok(content) => return self.parse_all("", &directory_path, content.as_slice()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(fail(&directory_path, e)),
            }
        }
        Err(fail(&directory_path, self.missing_file_reason()))
    }

    /// 对已解码的记录执行位置写入、DLL 规范化和依赖修复
    pub fn normalize(&self, metadata: &mut ModuleMetadata, archive_path: &str, directory_path: &str) {
        metadata.path_archive = archive_path.to_string();
        metadata.path_directory = directory_path.to_string();

        if !directory_path.is_empty() && !metadata.dll.is_empty() {
            metadata.dll = resolve_dll_path(directory_path, &metadata.dll);
        }

        self.repair_dependencies(metadata);

        debug!(
            target: LOG_TARGET,
            module = %metadata,
            path_archive = %metadata.path_archive,
            path_directory = %metadata.path_directory,
            "模组元数据解析完成"
        );
    }

    /// 旧别名改名为平台名；没有平台依赖时在首位补入
    ///
    /// 改名同时作用于 `Dependencies` 和 `OptionalDependencies`（后者是对必需依赖规则的扩展），
    /// 补入只检查和修改 `Dependencies`。
    fn repair_dependencies(&self, metadata: &mut ModuleMetadata) {
        let platform = &self.config.platform_name;
        let alias = &self.config.legacy_alias;

        if !alias.is_empty() {
            for dep in metadata
                .dependencies
                .iter_mut()
                .chain(metadata.optional_dependencies.iter_mut())
                .filter(|dep| dep.name == *alias)
            {
                dep.name = platform.clone();
            }
        }

        if !metadata.depends_on(platform) {
            warn!(
                target: LOG_TARGET,
                module = %metadata,
                "模组未声明对 {} 的依赖，已自动补入 {} {}",
                platform,
                platform,
                self.config.min_platform_version
            );
            metadata.dependencies.insert(
                0,
                Dependency::new(platform.clone(), self.config.min_platform_version),
            );
        }
    }

    /// 读取并解码文档，返回失败原因而不记录日志
    fn decode<R: Read>(&self, mut reader: R) -> std::result::Result<Vec<ModuleMetadata>, String> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| format!("读取元数据失败: {}", e))?;

        if content.trim().is_empty() {
            return Err("元数据文档为空".to_string());
        }

        let entries = serde_yaml::from_str::<MetadataDocument>(&content)
            .map_err(|e| format!("元数据格式无效: {}", e))?
            .into_entries();

        if entries.is_empty() {
            return Err("元数据文档不包含任何模组条目".to_string());
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(format!("第 {} 个条目缺少模组名称", index + 1));
            }
            if let Some(dep) = entry
                .dependencies
                .iter()
                .chain(&entry.optional_dependencies)
                .find(|dep| dep.name.trim().is_empty())
            {
                return Err(format!("模组 '{}' 的依赖名称不能为空 ({})", entry.name, dep.version));
            }
        }

        Ok(entries)
    }

    fn missing_file_reason(&self) -> String {
        format!("未找到元数据文件 ({})", self.config.metadata_files.join(", "))
    }
}

/// 用于日志和错误的来源描述
fn source_desc(archive_path: &str, directory_path: &str) -> String {
    if !archive_path.is_empty() {
        archive_path.to_string()
    } else if !directory_path.is_empty() {
        directory_path.to_string()
    } else {
        "<unknown>".to_string()
    }
}

/// 记录一条解析失败日志并构造错误
fn fail(source: &str, reason: impl ToString) -> CoreError {
    let err = CoreError::parse_failure(source, reason);
    error!(target: LOG_TARGET, source = %source, error = %err, "无法解析模组元数据");
    err
}

/// 将 DLL 路径中的两种分隔符统一为本机分隔符，并拼接到模组目录下
///
/// 开头的分隔符会被去掉，结果始终位于模组目录内。
pub fn resolve_dll_path(directory_path: &str, dll: &str) -> String {
    let native: String = dll
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    let relative = native.trim_start_matches(MAIN_SEPARATOR);
    Path::new(directory_path)
        .join(relative)
        .to_string_lossy()
        .into_owned()
}
