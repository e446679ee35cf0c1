//! 编译后规则模式定义与匹配执行
//! CompiledRuleSet 创建后不可变，通过 Arc 共享给渲染面

use regex::Regex;

use crate::rule::model::{ActionType, LoadType, ResourceType};

/// 编译后的URL匹配模式
#[derive(Debug)]
pub struct CompiledPattern {
    pub regex: Regex,
}

impl CompiledPattern {
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

/// 域名匹配模式（`*example.com` 表示含子域名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPattern {
    pub host: String,
    pub include_subdomains: bool,
}

impl DomainPattern {
    pub fn matches(&self, host: &str) -> bool {
        let normalized = host.trim().trim_end_matches('.').to_ascii_lowercase();
        if normalized == self.host {
            return true;
        }
        self.include_subdomains && normalized.ends_with(&format!(".{}", self.host))
    }
}

/// 规则域名条件（if-domain 与 unless-domain 互斥，编译期已保证）
#[derive(Debug, Clone, Default)]
pub enum DomainCondition {
    #[default]
    None,
    /// 仅在命中列表时生效
    IfDomain(Vec<DomainPattern>),
    /// 命中列表时不生效
    UnlessDomain(Vec<DomainPattern>),
}

impl DomainCondition {
    /// 当前文档域名下该规则是否生效
    pub fn applies_to(&self, document_host: &str) -> bool {
        match self {
            DomainCondition::None => true,
            DomainCondition::IfDomain(patterns) => {
                patterns.iter().any(|p| p.matches(document_host))
            }
            DomainCondition::UnlessDomain(patterns) => {
                !patterns.iter().any(|p| p.matches(document_host))
            }
        }
    }
}

/// 编译后的单条规则
#[derive(Debug)]
pub struct CompiledRule {
    pub pattern: CompiledPattern,
    pub resource_types: Option<Vec<ResourceType>>,
    pub load_types: Option<Vec<LoadType>>,
    pub domain_condition: DomainCondition,
    pub action_type: ActionType,
    pub selector: Option<String>,
}

/// 资源加载请求（匹配入参）
#[derive(Debug, Clone, Copy)]
pub struct ResourceRequest<'a> {
    /// 被加载资源的完整URL
    pub url: &'a str,
    pub resource_type: ResourceType,
    /// 顶层文档域名（域名条件据此判定）
    pub document_host: &'a str,
    pub is_third_party: bool,
}

/// 编译后的完整规则集（按标识符缓存的最终产物）
#[derive(Debug)]
pub struct CompiledRuleSet {
    pub identifier: String,
    /// 保持规则源顺序，ignore-previous-rules 语义依赖顺序
    pub rules: Vec<CompiledRule>,
}

impl CompiledRuleSet {
    /// 规则总数
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 判定资源加载是否应被阻断
    pub fn should_block(&self, request: &ResourceRequest<'_>) -> bool {
        let mut blocked = false;

        for rule in &self.rules {
            if !Self::rule_triggers(rule, request) {
                continue;
            }

            match rule.action_type {
                ActionType::Block => blocked = true,
                // 白名单语义：清空此前全部命中
                ActionType::IgnorePreviousRules => blocked = false,
                ActionType::BlockCookies | ActionType::CssDisplayNone => {}
            }
        }

        blocked
    }

    /// 判定资源加载是否应剥离Cookie
    pub fn should_block_cookies(&self, request: &ResourceRequest<'_>) -> bool {
        let mut block_cookies = false;

        for rule in &self.rules {
            if !Self::rule_triggers(rule, request) {
                continue;
            }

            match rule.action_type {
                ActionType::BlockCookies => block_cookies = true,
                ActionType::IgnorePreviousRules => block_cookies = false,
                ActionType::Block | ActionType::CssDisplayNone => {}
            }
        }

        block_cookies
    }

    /// 收集对指定文档生效的元素隐藏选择器
    pub fn hidden_css_selectors(&self, document_url: &str, document_host: &str) -> Vec<String> {
        let mut selectors: Vec<String> = Vec::new();

        for rule in &self.rules {
            if !rule.domain_condition.applies_to(document_host) {
                continue;
            }
            if !rule.pattern.matches(document_url) {
                continue;
            }

            match rule.action_type {
                ActionType::CssDisplayNone => {
                    if let Some(selector) = &rule.selector {
                        selectors.push(selector.clone());
                    }
                }
                ActionType::IgnorePreviousRules => selectors.clear(),
                ActionType::Block | ActionType::BlockCookies => {}
            }
        }

        selectors
    }

    fn rule_triggers(rule: &CompiledRule, request: &ResourceRequest<'_>) -> bool {
        // 1. 资源类型限定
        if let Some(types) = &rule.resource_types {
            if !types.contains(&request.resource_type) {
                return false;
            }
        }

        // 2. 加载方上下文限定
        if let Some(load_types) = &rule.load_types {
            let load_type = if request.is_third_party {
                LoadType::ThirdParty
            } else {
                LoadType::FirstParty
            };
            if !load_types.contains(&load_type) {
                return false;
            }
        }

        // 3. 文档域名条件
        if !rule.domain_condition.applies_to(request.document_host) {
            return false;
        }

        // 4. URL正则匹配
        rule.pattern.matches(request.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compiler::RuleCompiler;
    use crate::rule::model::RuleList;

    fn compile(json: &str) -> CompiledRuleSet {
        let list = RuleList::from_json(json).unwrap();
        RuleCompiler::compile("test", &list).unwrap()
    }

    fn image_request<'a>(url: &'a str, document_host: &'a str) -> ResourceRequest<'a> {
        ResourceRequest {
            url,
            resource_type: ResourceType::Image,
            document_host,
            is_third_party: true,
        }
    }

    #[test]
    fn test_block_rule_matches_url() {
        let ruleset = compile(
            r#"[{"trigger": {"url-filter": "ads\\.tracker\\.io"}, "action": {"type": "block"}}]"#,
        );

        assert!(ruleset.should_block(&image_request(
            "https://ads.tracker.io/banner.png",
            "news.example.com"
        )));
        assert!(!ruleset.should_block(&image_request(
            "https://cdn.example.com/logo.png",
            "news.example.com"
        )));
    }

    #[test]
    fn test_resource_type_and_load_type_limit_trigger() {
        let ruleset = compile(
            r#"[{
                "trigger": {
                    "url-filter": "tracker",
                    "resource-type": ["script"],
                    "load-type": ["third-party"]
                },
                "action": {"type": "block"}
            }]"#,
        );

        let mut request = ResourceRequest {
            url: "https://tracker.io/t.js",
            resource_type: ResourceType::Script,
            document_host: "example.com",
            is_third_party: true,
        };
        assert!(ruleset.should_block(&request));

        // 资源类型不符
        request.resource_type = ResourceType::Image;
        assert!(!ruleset.should_block(&request));

        // 第一方加载不符
        request.resource_type = ResourceType::Script;
        request.is_third_party = false;
        assert!(!ruleset.should_block(&request));
    }

    #[test]
    fn test_domain_conditions() {
        let ruleset = compile(
            r#"[
                {
                    "trigger": {"url-filter": "banner", "if-domain": ["*news.example.com"]},
                    "action": {"type": "block"}
                },
                {
                    "trigger": {"url-filter": "widget", "unless-domain": ["trusted.com"]},
                    "action": {"type": "block"}
                }
            ]"#,
        );

        // if-domain：仅命中域名（含子域名）生效
        assert!(ruleset.should_block(&image_request("https://x.io/banner.png", "news.example.com")));
        assert!(ruleset.should_block(&image_request(
            "https://x.io/banner.png",
            "m.news.example.com"
        )));
        assert!(!ruleset.should_block(&image_request("https://x.io/banner.png", "other.com")));

        // unless-domain：命中域名时不生效
        assert!(ruleset.should_block(&image_request("https://x.io/widget.png", "anywhere.com")));
        assert!(!ruleset.should_block(&image_request("https://x.io/widget.png", "trusted.com")));
    }

    #[test]
    fn test_ignore_previous_rules_whitelists() {
        let ruleset = compile(
            r#"[
                {"trigger": {"url-filter": "ads"}, "action": {"type": "block"}},
                {
                    "trigger": {"url-filter": ".*", "if-domain": ["allowlisted.com"]},
                    "action": {"type": "ignore-previous-rules"}
                }
            ]"#,
        );

        assert!(ruleset.should_block(&image_request("https://ads.io/a.png", "example.com")));
        assert!(!ruleset.should_block(&image_request("https://ads.io/a.png", "allowlisted.com")));
    }

    #[test]
    fn test_hidden_selectors_for_document() {
        let ruleset = compile(
            r##"[
                {
                    "trigger": {"url-filter": ".*", "if-domain": ["news.example.com"]},
                    "action": {"type": "css-display-none", "selector": ".ad-banner"}
                },
                {
                    "trigger": {"url-filter": ".*"},
                    "action": {"type": "css-display-none", "selector": "#popup"}
                }
            ]"##,
        );

        let selectors =
            ruleset.hidden_css_selectors("https://news.example.com/index.html", "news.example.com");
        assert_eq!(selectors, vec![".ad-banner".to_string(), "#popup".to_string()]);

        let selectors = ruleset.hidden_css_selectors("https://other.com/", "other.com");
        assert_eq!(selectors, vec!["#popup".to_string()]);
    }

    #[test]
    fn test_block_cookies_action() {
        let ruleset = compile(
            r#"[{
                "trigger": {"url-filter": "tracker", "load-type": ["third-party"]},
                "action": {"type": "block-cookies"}
            }]"#,
        );

        let request = image_request("https://tracker.io/pixel.gif", "example.com");
        assert!(ruleset.should_block_cookies(&request));
        // block-cookies 不触发资源阻断
        assert!(!ruleset.should_block(&request));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let ruleset =
            compile(r#"[{"trigger": {"url-filter": "AdServer"}, "action": {"type": "block"}}]"#);
        assert!(ruleset.should_block(&image_request("https://adserver.io/x", "example.com")));

        let sensitive = compile(
            r#"[{
                "trigger": {"url-filter": "AdServer", "url-filter-is-case-sensitive": true},
                "action": {"type": "block"}
            }]"#,
        );
        assert!(!sensitive.should_block(&image_request("https://adserver.io/x", "example.com")));
    }
}
