//! 模组契约
//!
//! 每个模组实现都必须满足的能力集合：身份（元数据）、生命周期入口/出口，
//! 以及可选的设置菜单扩展钩子。契约本身不跟踪生命周期状态，
//! 何时调用由宿主决定。

use super::metadata::ModuleMetadata;

/// 设置菜单中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// 分组标题
    Header(String),
    /// 普通按钮
    Button(String),
    /// 开关
    Toggle {
        /// 显示文本
        label: String,
        /// 当前值
        value: bool,
    },
    /// 附在上一项下方的说明文字
    SubText(String),
}

/// 宿主提供的设置菜单
///
/// 具体渲染由宿主负责，模组只能在 `create_menu_section` 调用期间向其中添加条目。
pub trait ModuleMenu {
    /// 添加一项
    fn add(&mut self, item: MenuItem);
}

impl ModuleMenu for Vec<MenuItem> {
    fn add(&mut self, item: MenuItem) {
        self.push(item);
    }
}

/// 宿主音频状态快照句柄
///
/// 由宿主在打开暂停菜单时创建，模组只读取不持有。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioSnapshot(pub u64);

/// 模组契约
///
/// 宿主在所有模组注册完成后调用 `load`，移除模组时调用 `unload`。
/// 实现不能假设自己与其他模组 `load` 的先后顺序。
pub trait EverestModule: Send {
    /// 当前元数据
    fn metadata(&self) -> &ModuleMetadata;

    /// 替换元数据
    ///
    /// 不做任何校验；不会改变模组被发现和加载的方式。
    fn set_metadata(&mut self, metadata: ModuleMetadata);

    /// 执行全部初始化
    fn load(&mut self);

    /// 释放 `load` 中获取的资源并撤销对宿主状态的修改
    ///
    /// 即使 `load` 只完成了一部分也必须可以安全调用。
    fn unload(&mut self);

    /// 向宿主设置菜单添加本模组的条目，默认不添加任何内容
    fn create_menu_section(
        &mut self,
        _menu: &mut dyn ModuleMenu,
        _in_game: bool,
        _snapshot: Option<&AudioSnapshot>,
    ) {
    }
}

/// 元数据存放位
///
/// 模组实现可以直接嵌入该类型，并把 `metadata` / `set_metadata` 委托给它。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSlot {
    metadata: ModuleMetadata,
}

impl MetadataSlot {
    /// 创建存放位
    pub fn new(metadata: ModuleMetadata) -> Self {
        Self { metadata }
    }

    /// 当前元数据
    pub fn get(&self) -> &ModuleMetadata {
        &self.metadata
    }

    /// 替换并返回旧的元数据
    pub fn replace(&mut self, metadata: ModuleMetadata) -> ModuleMetadata {
        std::mem::replace(&mut self.metadata, metadata)
    }
}
