//! Content-blocking ruleset apply demonstration for rsadblock
//! rsadblock 内容拦截规则编译挂接演示程序
//! 功能说明：
//! 1. 演示规则源编译、进程级缓存与持久化的完整流程
//! 2. 展示 compile-once：第二次请求直接命中存储
//! 3. 展示已编译规则集对资源请求的匹配判定
//!
//! 运行命令：
//! cargo run --example apply_demo

use std::sync::Arc;

use anyhow::Result;
use rsadblock::{
    ApplyOutcome, CompiledRuleSet, ConfigManager, ContentFilterSurface, ResourceRequest,
    ResourceType, RuleSetManager, UrlFixer,
};

/// 演示用渲染面：只记录挂接的规则集
#[derive(Default)]
struct DemoSurface {
    rulesets: Vec<Arc<CompiledRuleSet>>,
}

impl ContentFilterSurface for DemoSurface {
    fn add_content_ruleset(&mut self, ruleset: Arc<CompiledRuleSet>) {
        self.rulesets.push(ruleset);
    }

    fn active_ruleset_count(&self) -> usize {
        self.rulesets.len()
    }
}

const DEMO_RULES: &str = r#"[
    {
        "trigger": {
            "url-filter": "ads\\.tracker\\.io",
            "resource-type": ["image", "script"],
            "load-type": ["third-party"]
        },
        "action": { "type": "block" }
    },
    {
        "trigger": { "url-filter": ".*", "if-domain": ["*news.example.com"] },
        "action": { "type": "css-display-none", "selector": ".ad-banner" }
    }
]"#;

#[tokio::main]
async fn main() -> Result<()> {
    // ========== 1. 日志系统初始化 ==========
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    // ========== 2. 准备规则源与配置 ==========
    let work_dir = std::env::temp_dir().join("rsadblock_demo");
    tokio::fs::create_dir_all(&work_dir).await?;
    let source_path = work_dir.join("adblock-rules.json");
    tokio::fs::write(&source_path, DEMO_RULES).await?;

    let config = ConfigManager::custom()
        .store_dir(work_dir.join("store"))
        .rule_source_path(source_path)
        .build();
    let manager = RuleSetManager::with_config(config);
    // 上一次运行可能留有持久化条目，清空后从冷存储开始
    manager.store().clear().await?;

    // ========== 3. 首次挂接（未命中 -> 编译入库） ==========
    let mut surface = DemoSurface::default();
    let outcome = manager
        .ensure_rules_applied("adBlockRules", &mut surface)
        .await?;
    println!("首次挂接结果：{:?}", outcome);
    assert_eq!(outcome, ApplyOutcome::CompiledAndApplied);

    // ========== 4. 再次挂接（存储命中，不再编译） ==========
    let mut surface2 = DemoSurface::default();
    let outcome = manager
        .ensure_rules_applied("adBlockRules", &mut surface2)
        .await?;
    println!("再次挂接结果：{:?}", outcome);
    println!("规则源编译执行次数：{}", manager.store().compile_count());

    // ========== 5. 匹配判定演示 ==========
    let ruleset = &surface.rulesets[0];
    for (url, resource_type) in [
        ("https://ads.tracker.io/banner.png", ResourceType::Image),
        ("https://cdn.example.com/app.js", ResourceType::Script),
    ] {
        let request = ResourceRequest {
            url,
            resource_type,
            document_host: "news.example.com",
            is_third_party: true,
        };
        println!("{} -> 阻断：{}", url, ruleset.should_block(&request));
    }
    println!(
        "news.example.com 隐藏选择器：{:?}",
        ruleset.hidden_css_selectors("https://news.example.com/", "news.example.com")
    );

    // 地址栏输入修正演示
    println!("地址栏修正：{}", UrlFixer::fix("example.com"));

    Ok(())
}
