//! 渲染面模块：内容过滤接入接口、前进/后退历史模型与阅读模式

pub mod history;
pub mod reader;

pub use history::NavigationHistory;
pub use reader::{ReaderMode, ReaderPlan};

use std::sync::Arc;

use crate::compiler::CompiledRuleSet;

/// 渲染面内容过滤接入接口
/// 宿主渲染组件实现此接口，把已编译规则集挂接到活动过滤集
pub trait ContentFilterSurface: Send + Sync {
    /// 将已编译规则集加入活动过滤集（挂接共享引用，不复制）
    fn add_content_ruleset(&mut self, ruleset: Arc<CompiledRuleSet>);

    /// 当前活动过滤集中的规则集数量
    fn active_ruleset_count(&self) -> usize;
}
