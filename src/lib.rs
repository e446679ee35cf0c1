//! rsadblock - 浏览器内容拦截规则编译与缓存引擎

// 导出全局错误类型
pub use self::error::{AdbResult, RsadblockError};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder, DEFAULT_RULESET_IDENTIFIER, GlobalConfig};

// 导出规则模块核心接口
pub use self::rule::{
    ActionType, ContentRule, LoadType, ResourceType, RuleAction, RuleList,
    RuleSetCacheManager, RuleSourceLoader, RuleTrigger, StoredRuleSet,
};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledPattern, CompiledRule, CompiledRuleSet, DomainCondition, DomainPattern,
    ResourceRequest, RuleCompiler,
};

// 导出存储模块核心接口
pub use self::store::{Lookup, RuleSetStore};

// 导出管理器模块核心接口（含兼容宿主直接调用的简化接口）
pub use self::manager::{
    ApplyOutcome,
    RuleSetManager,
    ensure_default_rules_applied,
    ensure_rules_applied,
    init_adblock,
    init_adblock_with_config,
};

// 导出渲染面模块核心接口
pub use self::surface::{ContentFilterSurface, NavigationHistory, ReaderMode, ReaderPlan};

// 导出工具模块核心接口
pub use self::utils::UrlFixer;

// 声明所有子模块
pub mod compiler;
pub mod config;
pub mod error;
pub mod manager;
pub mod rule;
pub mod store;
pub mod surface;
pub mod utils;
