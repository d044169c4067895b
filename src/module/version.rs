//! 模组版本号
//!
//! 三段式版本 `major.minor.build`，按字典序比较。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::utils::{CoreError, Result};

/// 模组版本号 `(major, minor, build)`
///
/// 比较规则为 major → minor → build 逐段比较整数，三段全部相等才视为相等。
/// 缺省版本为 `1.0.0`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleVersion {
    /// 主版本号
    pub major: u32,
    /// 次版本号
    pub minor: u32,
    /// 构建号
    pub build: u32,
}

impl ModuleVersion {
    /// 创建版本号
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self { major, minor, build }
    }

    /// 解析版本字符串
    ///
    /// 接受 `M.m` 或 `M.m.b`，各段为非负整数，首尾空白会被忽略。
    /// 第一个 `-` 之后的预发布标记会被丢弃（`1.2.3-dev` 视为 `1.2.3`）。
    ///
    /// # Errors
    ///
    /// 其他任何格式都返回 `InvalidVersion`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let core = trimmed.split('-').next().unwrap_or_default();

        let parts: Vec<&str> = core.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(CoreError::InvalidVersion(input.to_string()));
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(CoreError::InvalidVersion(input.to_string()));
            }
            *slot = part
                .parse()
                .map_err(|_| CoreError::InvalidVersion(input.to_string()))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl Default for ModuleVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

impl FromStr for ModuleVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ModuleVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 版本字段按原始文本解码
///
/// 未加引号的 `Version: 1.10` 会以标量原文 `"1.10"` 交给 [`ModuleVersion::parse`]，
/// 不经过浮点数。
impl<'de> Deserialize<'de> for ModuleVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ModuleVersion::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_components() {
        let version = ModuleVersion::parse("1.2.3").unwrap();
        assert_eq!(version, ModuleVersion::new(1, 2, 3));
    }

    #[test]
    fn test_parse_two_components_defaults_build() {
        let version = ModuleVersion::parse("1.4").unwrap();
        assert_eq!(version, ModuleVersion::new(1, 4, 0));
    }

    #[test]
    fn test_parse_strips_prerelease_and_whitespace() {
        assert_eq!(
            ModuleVersion::parse(" 1.2.3-dev ").unwrap(),
            ModuleVersion::new(1, 2, 3)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "1", "1.2.3.4", "a.b", "1..2", "1.x", "-1.0", "1.+2"] {
            let result = ModuleVersion::parse(input);
            assert!(
                matches!(result, Err(CoreError::InvalidVersion(_))),
                "应该拒绝: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_total_order() {
        let a = ModuleVersion::new(1, 0, 0);
        let b = ModuleVersion::new(1, 1, 0);
        let c = ModuleVersion::new(1, 1, 1);
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
        assert!(!(ModuleVersion::new(2, 0, 0) < ModuleVersion::new(1, 9, 9)));
        assert_eq!(ModuleVersion::new(1, 2, 3), ModuleVersion::new(1, 2, 3));
        assert_ne!(ModuleVersion::new(1, 2, 3), ModuleVersion::new(1, 2, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(ModuleVersion::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(ModuleVersion::default().to_string(), "1.0.0");
    }

    #[test]
    fn test_deserialize_numeric_yaml() {
        let version: ModuleVersion = serde_yaml::from_str("1.2").unwrap();
        assert_eq!(version, ModuleVersion::new(1, 2, 0));

        let version: ModuleVersion = serde_yaml::from_str("2.0").unwrap();
        assert_eq!(version, ModuleVersion::new(2, 0, 0));

        // 小数形式与原文不同的次版本号
        let version: ModuleVersion = serde_yaml::from_str("1.10").unwrap();
        assert_eq!(version, ModuleVersion::new(1, 10, 0));

        let version: ModuleVersion = serde_yaml::from_str("1.20").unwrap();
        assert_eq!(version, ModuleVersion::new(1, 20, 0));

        let version: ModuleVersion = serde_yaml::from_str("1.100").unwrap();
        assert_eq!(version, ModuleVersion::new(1, 100, 0));

        let version: ModuleVersion = serde_yaml::from_str("\"1.2.5\"").unwrap();
        assert_eq!(version, ModuleVersion::new(1, 2, 5));

        assert!(serde_yaml::from_str::<ModuleVersion>("\"banana\"").is_err());
    }
}
