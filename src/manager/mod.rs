//! 管理器模块：规则集生命周期编排（查询 -> 编译 -> 挂接）

pub mod global;
pub mod manager;

pub use global::{
    ensure_default_rules_applied, ensure_rules_applied, init_adblock, init_adblock_with_config,
};
pub use manager::{ApplyOutcome, RuleSetManager};
