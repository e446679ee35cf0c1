//! 规则数据模型定义
//! 仅存储声明式内容拦截规则数据，无任何业务逻辑，支持序列化/反序列化

use serde::{Deserialize, Serialize};

use crate::error::{AdbResult, RsadblockError};

/// 单条内容拦截规则（trigger/action 对，兼容 WebKit content-blocker JSON 格式）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRule {
    pub trigger: RuleTrigger,
    pub action: RuleAction,
}

/// 规则触发条件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTrigger {
    /// URL匹配正则（必填）
    #[serde(rename = "url-filter")]
    pub url_filter: String,
    /// 是否大小写敏感（默认不敏感）
    #[serde(rename = "url-filter-is-case-sensitive", default)]
    pub url_filter_is_case_sensitive: bool,
    /// 资源类型限定（为空表示全部类型）
    #[serde(rename = "resource-type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<Vec<ResourceType>>,
    /// 加载方上下文限定（first-party / third-party）
    #[serde(rename = "load-type", default, skip_serializing_if = "Option::is_none")]
    pub load_type: Option<Vec<LoadType>>,
    /// 仅在这些域名下生效
    #[serde(rename = "if-domain", default, skip_serializing_if = "Option::is_none")]
    pub if_domain: Option<Vec<String>>,
    /// 在这些域名下不生效
    #[serde(rename = "unless-domain", default, skip_serializing_if = "Option::is_none")]
    pub unless_domain: Option<Vec<String>>,
}

/// 规则动作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// CSS选择器（仅 css-display-none 动作使用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

/// 动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    /// 阻断资源加载
    Block,
    /// 阻断Cookie携带
    BlockCookies,
    /// 隐藏页面元素
    CssDisplayNone,
    /// 忽略此前所有规则（白名单语义）
    IgnorePreviousRules,
}

/// 资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    Document,
    Image,
    StyleSheet,
    Script,
    Font,
    Raw,
    SvgDocument,
    Media,
    Popup,
}

/// 加载方上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadType {
    FirstParty,
    ThirdParty,
}

/// 完整规则列表（规则源JSON的顶层结构：规则对象数组）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleList {
    pub rules: Vec<ContentRule>,
}

impl RuleList {
    /// 从JSON文本解析规则列表
    pub fn from_json(json: &str) -> AdbResult<Self> {
        let list: RuleList = serde_json::from_str(json)?;
        Ok(list)
    }

    /// 规则总数
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 规则模式校验（整表校验，任何一条非法即失败）
    pub fn validate(&self) -> AdbResult<()> {
        if self.rules.is_empty() {
            return Err(RsadblockError::RuleValidationError(
                "规则列表为空".to_string(),
            ));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            // url-filter 必填且非空
            if rule.trigger.url_filter.trim().is_empty() {
                return Err(RsadblockError::RuleValidationError(format!(
                    "第{}条规则 url-filter 为空",
                    index
                )));
            }

            // if-domain 与 unless-domain 互斥
            if rule.trigger.if_domain.is_some() && rule.trigger.unless_domain.is_some() {
                return Err(RsadblockError::RuleValidationError(format!(
                    "第{}条规则同时设置了 if-domain 与 unless-domain",
                    index
                )));
            }

            // css-display-none 必须携带选择器
            if rule.action.action_type == ActionType::CssDisplayNone
                && rule
                    .action
                    .selector
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or("")
                    .is_empty()
            {
                return Err(RsadblockError::RuleValidationError(format!(
                    "第{}条规则动作为 css-display-none 但缺少 selector",
                    index
                )));
            }
        }

        Ok(())
    }
}
