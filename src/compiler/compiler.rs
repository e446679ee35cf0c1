//! 规则编译器核心
//! 仅负责将声明式规则列表编译为可执行的规则集

use std::time::Instant;

use regex::RegexBuilder;
use tracing::debug;

use super::pattern::{
    CompiledPattern, CompiledRule, CompiledRuleSet, DomainCondition, DomainPattern,
};
use crate::error::{AdbResult, RsadblockError};
use crate::rule::model::{ActionType, ContentRule, RuleList};

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则列表为规则集
    /// 整表编译：任何一条规则非法即整体失败，不产出部分结果
    pub fn compile(identifier: &str, rule_list: &RuleList) -> AdbResult<CompiledRuleSet> {
        let start = Instant::now();

        // 1. 整表校验
        rule_list.validate()?;

        // 2. 逐条编译（保持源顺序）
        let mut compiled_rules = Vec::with_capacity(rule_list.len());
        let mut compile_stats = CompileStats::default();
        for (index, rule) in rule_list.rules.iter().enumerate() {
            let compiled = Self::compile_rule(rule).map_err(|e| {
                RsadblockError::RuleCompileError(format!("第{}条规则编译失败：{}", index, e))
            })?;
            Self::update_stats(&mut compile_stats, compiled.action_type);
            compiled_rules.push(compiled);
        }

        // 3. 输出编译统计
        let total_time = start.elapsed();
        debug!("✅ 规则集 [{}] 编译完成，总耗时{:?}", identifier, total_time);
        debug!(
            "📊 编译统计：阻断规则{}条、Cookie阻断{}条、元素隐藏{}条、白名单{}条",
            compile_stats.block_count,
            compile_stats.block_cookies_count,
            compile_stats.hide_count,
            compile_stats.ignore_count
        );

        Ok(CompiledRuleSet {
            identifier: identifier.to_string(),
            rules: compiled_rules,
        })
    }

    /// 编译单条规则
    fn compile_rule(rule: &ContentRule) -> AdbResult<CompiledRule> {
        let trigger = &rule.trigger;

        // url-filter 默认大小写不敏感（WebKit语义）
        let regex = RegexBuilder::new(&trigger.url_filter)
            .case_insensitive(!trigger.url_filter_is_case_sensitive)
            .build()?;

        let domain_condition = match (&trigger.if_domain, &trigger.unless_domain) {
            (Some(domains), None) => DomainCondition::IfDomain(Self::compile_domains(domains)),
            (None, Some(domains)) => DomainCondition::UnlessDomain(Self::compile_domains(domains)),
            (None, None) => DomainCondition::None,
            // validate() 已拒绝双写，此处兜底
            (Some(_), Some(_)) => {
                return Err(RsadblockError::RuleValidationError(
                    "if-domain 与 unless-domain 互斥".to_string(),
                ));
            }
        };

        Ok(CompiledRule {
            pattern: CompiledPattern { regex },
            resource_types: trigger.resource_type.clone(),
            load_types: trigger.load_type.clone(),
            domain_condition,
            action_type: rule.action.action_type,
            selector: rule.action.selector.clone(),
        })
    }

    /// 规范化域名列表（小写、去点尾、`*` 前缀转子域名通配）
    fn compile_domains(domains: &[String]) -> Vec<DomainPattern> {
        domains
            .iter()
            .map(|raw| {
                let trimmed = raw.trim().trim_end_matches('.').to_ascii_lowercase();
                let (host, include_subdomains) = match trimmed.strip_prefix('*') {
                    Some(rest) => (rest.trim_start_matches('.').to_string(), true),
                    None => (trimmed, false),
                };
                DomainPattern {
                    host,
                    include_subdomains,
                }
            })
            .collect()
    }

    /// 更新编译统计
    fn update_stats(stats: &mut CompileStats, action_type: ActionType) {
        match action_type {
            ActionType::Block => stats.block_count += 1,
            ActionType::BlockCookies => stats.block_cookies_count += 1,
            ActionType::CssDisplayNone => stats.hide_count += 1,
            ActionType::IgnorePreviousRules => stats.ignore_count += 1,
        }
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    block_count: usize,
    block_cookies_count: usize,
    hide_count: usize,
    ignore_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_preserves_rule_order() {
        let list = RuleList::from_json(
            r#"[
                {"trigger": {"url-filter": "ads"}, "action": {"type": "block"}},
                {"trigger": {"url-filter": ".*"}, "action": {"type": "ignore-previous-rules"}}
            ]"#,
        )
        .unwrap();

        let ruleset = RuleCompiler::compile("ordered", &list).unwrap();
        assert_eq!(ruleset.len(), 2);
        assert_eq!(ruleset.rules[0].action_type, ActionType::Block);
        assert_eq!(ruleset.rules[1].action_type, ActionType::IgnorePreviousRules);
    }

    #[test]
    fn test_invalid_regex_fails_whole_compilation() {
        let list = RuleList::from_json(
            r#"[
                {"trigger": {"url-filter": "good"}, "action": {"type": "block"}},
                {"trigger": {"url-filter": "bad[unclosed"}, "action": {"type": "block"}}
            ]"#,
        )
        .unwrap();

        let err = RuleCompiler::compile("broken", &list).unwrap_err();
        assert!(matches!(err, RsadblockError::RuleCompileError(_)));
    }

    #[test]
    fn test_empty_list_fails_validation() {
        let list = RuleList::from_json("[]").unwrap();
        assert!(RuleCompiler::compile("empty", &list).is_err());
    }

    #[test]
    fn test_domain_normalization() {
        let patterns = RuleCompiler::compile_domains(&[
            "*Example.COM".to_string(),
            "news.example.com.".to_string(),
        ]);

        assert_eq!(
            patterns[0],
            DomainPattern {
                host: "example.com".to_string(),
                include_subdomains: true
            }
        );
        assert_eq!(
            patterns[1],
            DomainPattern {
                host: "news.example.com".to_string(),
                include_subdomains: false
            }
        );
    }
}
