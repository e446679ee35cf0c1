//! 规则模块：数据模型、规则源加载、持久化缓存

pub mod cache;
pub mod loader;
pub mod model;

pub use cache::{RuleSetCacheManager, STORED_FORMAT_VERSION, StoredRuleSet};
pub use loader::RuleSourceLoader;
pub use model::{
    ActionType, ContentRule, LoadType, ResourceType, RuleAction, RuleList, RuleTrigger,
};
