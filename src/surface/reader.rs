//! 阅读模式
//! 产出页面去杂波的移除选择器列表与可读性样式载荷，由宿主渲染面注入执行

use crate::compiler::CompiledRuleSet;

/// 结构性杂波元素（正文外仍可能残留杂波的结构标签）
pub const STRUCTURAL_CLUTTER_SELECTORS: &[&str] = &["header", "footer", "nav", "aside", "form"];

/// 残留样式/脚本元素（清除后获得干净版面）
pub const RESOURCE_CLUTTER_SELECTORS: &[&str] = &["style", "script", "link"];

/// 可读性样式表（正文居中限宽、放大行距字号）
pub const READABLE_CSS: &str = r#"
    body {
        font-family: -apple-system, sans-serif;
        line-height: 1.6;
        font-size: 18px;
        max-width: 800px;
        margin: 0 auto;
        padding: 2rem;
        background-color: #ffffff;
        color: #212121;
    }
    a {
        color: #007aff;
    }
    h1, h2, h3, h4, h5, h6 {
        line-height: 1.2;
    }
"#;

/// 阅读模式执行计划（渲染面按序移除元素，再注入样式）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderPlan {
    /// 待移除元素的选择器（保持移除顺序：先结构杂波，后残留样式/脚本）
    pub removal_selectors: Vec<String>,
    /// 注入的可读性样式
    pub css: String,
}

/// 阅读模式
pub struct ReaderMode;

impl ReaderMode {
    /// 固定的去杂波选择器列表
    pub fn removal_selectors() -> Vec<String> {
        STRUCTURAL_CLUTTER_SELECTORS
            .iter()
            .chain(RESOURCE_CLUTTER_SELECTORS.iter())
            .map(|s| s.to_string())
            .collect()
    }

    /// 仅含固定去杂波内容的执行计划
    pub fn plan() -> ReaderPlan {
        ReaderPlan {
            removal_selectors: Self::removal_selectors(),
            css: READABLE_CSS.to_string(),
        }
    }

    /// 结合规则集元素隐藏选择器的执行计划
    /// 规则集对当前文档生效的 css-display-none 选择器一并纳入移除列表
    pub fn plan_for(
        ruleset: &CompiledRuleSet,
        document_url: &str,
        document_host: &str,
    ) -> ReaderPlan {
        let mut removal_selectors = Self::removal_selectors();
        removal_selectors.extend(ruleset.hidden_css_selectors(document_url, document_host));

        ReaderPlan {
            removal_selectors,
            css: READABLE_CSS.to_string(),
        }
    }
}
