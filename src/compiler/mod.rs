//! 编译模块：规则集编译与匹配执行

pub mod compiler;
pub mod pattern;

pub use compiler::RuleCompiler;
pub use pattern::{
    CompiledPattern, CompiledRule, CompiledRuleSet, DomainCondition, DomainPattern,
    ResourceRequest,
};
