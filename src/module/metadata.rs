//! 模组元数据定义
//!
//! 定义模组描述文件 (everest.yaml) 中的所有数据结构。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::version::ModuleVersion;

/// 未声明图标时使用的约定文件名
pub const DEFAULT_ICON_FILE: &str = "icon.png";

/// 模组图标
///
/// 对宿主而言是一个不透明的图像句柄，这里只保存它的来源。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ModuleIcon {
    /// 未声明，使用约定文件
    #[default]
    Default,
    /// 模组内的图像文件（相对路径）
    File(String),
}

impl ModuleIcon {
    /// 图标文件的相对路径
    pub fn file_name(&self) -> &str {
        match self {
            ModuleIcon::Default => DEFAULT_ICON_FILE,
            ModuleIcon::File(path) => path,
        }
    }
}

impl From<Option<String>> for ModuleIcon {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => ModuleIcon::File(path),
            _ => ModuleIcon::Default,
        }
    }
}

impl From<ModuleIcon> for Option<String> {
    fn from(value: ModuleIcon) -> Self {
        match value {
            ModuleIcon::Default => None,
            ModuleIcon::File(path) => Some(path),
        }
    }
}

/// 依赖声明
///
/// 只记录名称和最低版本，不持有被依赖模组的实际记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dependency {
    /// 依赖模组名称
    pub name: String,

    /// 最低版本
    #[serde(default)]
    pub version: ModuleVersion,
}

impl Dependency {
    /// 创建依赖声明
    pub fn new(name: impl Into<String>, version: ModuleVersion) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// 已安装版本是否满足最低版本要求
    ///
    /// 只做序数比较，不支持版本范围。
    pub fn is_satisfied_by(&self, installed: &ModuleVersion) -> bool {
        *installed >= self.version
    }

    /// 给定模组是否满足该依赖（名称相同且版本不低于要求）
    pub fn matches(&self, metadata: &ModuleMetadata) -> bool {
        self.name == metadata.name && self.is_satisfied_by(&metadata.version)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// 模组元数据
///
/// 对应 everest.yaml 中的一个条目。`path_archive` 和 `path_directory`
/// 由解析器根据发现位置填写，文档中的同名字段会被忽略。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleMetadata {
    /// 压缩包绝对路径（从目录加载时为空）
    #[serde(skip_deserializing)]
    pub path_archive: String,

    /// 目录绝对路径（从压缩包加载时为空）
    #[serde(skip_deserializing)]
    pub path_directory: String,

    /// 模组唯一名称
    #[serde(default)]
    pub name: String,

    /// 图标
    #[serde(default)]
    pub icon: ModuleIcon,

    /// 版本号，缺省为 1.0.0
    #[serde(default)]
    pub version: ModuleVersion,

    /// 代码单元路径
    #[serde(default, rename = "DLL")]
    pub dll: String,

    /// 是否预链接
    #[serde(default)]
    pub prelinked: bool,

    /// 依赖声明
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// 可选依赖声明
    #[serde(default)]
    pub optional_dependencies: Vec<Dependency>,
}

impl ModuleMetadata {
    /// 创建新的模组元数据
    pub fn new(name: impl Into<String>, version: ModuleVersion) -> Self {
        Self {
            name: name.into(),
            version,
            ..Default::default()
        }
    }

    /// 是否从解压目录加载
    pub fn is_directory(&self) -> bool {
        !self.path_directory.is_empty()
    }

    /// 是否从压缩包加载
    pub fn is_archive(&self) -> bool {
        !self.path_archive.is_empty()
    }

    /// 图标文件路径
    ///
    /// 目录模组返回目录下的绝对路径；压缩包模组返回包内相对路径。
    pub fn icon_path(&self) -> PathBuf {
        let file = self.icon.file_name();
        if self.is_directory() {
            Path::new(&self.path_directory).join(file)
        } else {
            PathBuf::from(file)
        }
    }

    /// 是否声明了对指定模组的依赖
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.iter().any(|dep| dep.name == name)
    }
}

impl fmt::Display for ModuleMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string() {
        let metadata = ModuleMetadata::new("Foo", ModuleVersion::new(1, 2, 3));
        assert_eq!(metadata.to_string(), "Foo 1.2.3");
    }

    #[test]
    fn test_default_version_and_icon() {
        let metadata = ModuleMetadata::default();
        assert_eq!(metadata.version, ModuleVersion::new(1, 0, 0));
        assert_eq!(metadata.icon, ModuleIcon::Default);
        assert!(!metadata.prelinked);
    }

    #[test]
    fn test_dependency_satisfaction() {
        let dep = Dependency::new("Helper", ModuleVersion::new(1, 2, 0));

        assert!(dep.is_satisfied_by(&ModuleVersion::new(1, 2, 0)));
        assert!(dep.is_satisfied_by(&ModuleVersion::new(2, 0, 0)));
        assert!(!dep.is_satisfied_by(&ModuleVersion::new(1, 1, 9)));

        let helper = ModuleMetadata::new("Helper", ModuleVersion::new(1, 3, 0));
        assert!(dep.matches(&helper));

        let other = ModuleMetadata::new("Other", ModuleVersion::new(9, 0, 0));
        assert!(!dep.matches(&other));
    }

    #[test]
    fn test_icon_path() {
        let mut metadata = ModuleMetadata::new("Foo", ModuleVersion::default());
        assert_eq!(metadata.icon_path(), PathBuf::from(DEFAULT_ICON_FILE));

        metadata.path_directory = "/mods/Foo".to_string();
        metadata.icon = ModuleIcon::File("Graphics/logo.png".to_string());
        assert_eq!(
            metadata.icon_path(),
            Path::new("/mods/Foo").join("Graphics/logo.png")
        );
    }

    #[test]
    fn test_document_location_fields_are_ignored() {
        let yaml = r#"
Name: Foo
PathArchive: /evil.zip
PathDirectory: /evil
"#;
        let metadata: ModuleMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.name, "Foo");
        assert!(metadata.path_archive.is_empty());
        assert!(metadata.path_directory.is_empty());
    }

    #[test]
    fn test_decode_recognized_keys() {
        let yaml = r#"
Name: Foo
Version: 1.2.3
DLL: Code/Foo.dll
Prelinked: true
Icon: foo.png
Unknown: ignored
Dependencies:
  - Name: Everest
    Version: 1.1000.0
  - Name: Bar
"#;
        let metadata: ModuleMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.version, ModuleVersion::new(1, 2, 3));
        assert_eq!(metadata.dll, "Code/Foo.dll");
        assert!(metadata.prelinked);
        assert_eq!(metadata.icon, ModuleIcon::File("foo.png".to_string()));
        assert_eq!(metadata.dependencies.len(), 2);
        assert_eq!(metadata.dependencies[0].version, ModuleVersion::new(1, 1000, 0));
        assert_eq!(metadata.dependencies[1].version, ModuleVersion::default());
        assert!(metadata.depends_on("Bar"));
    }

    #[test]
    fn test_serialize_json() {
        let mut metadata = ModuleMetadata::new("Foo", ModuleVersion::new(1, 2, 3));
        metadata.dependencies.push(Dependency::new("Everest", ModuleVersion::default()));

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["Name"], "Foo");
        assert_eq!(value["Version"], "1.2.3");
        assert_eq!(value["Icon"], serde_json::Value::Null);
        assert_eq!(value["Dependencies"][0]["Version"], "1.0.0");
    }
}
