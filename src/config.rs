//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认规则集标识符（与内置规则源对应）
pub const DEFAULT_RULESET_IDENTIFIER: &str = "adBlockRules";

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // 编译规则集持久化目录
    pub store_dir: PathBuf,
    // 内置声明式规则源路径（JSON）
    pub rule_source_path: PathBuf,
    // 默认规则集标识符
    pub ruleset_identifier: String,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("adblock_store"),
            rule_source_path: PathBuf::from("adblock-rules.json"),
            ruleset_identifier: DEFAULT_RULESET_IDENTIFIER.to_string(),
            verbose: false,
        }
    }
}

impl GlobalConfig {
    /// 指定标识符对应的持久化文件路径
    pub fn stored_ruleset_path(&self, identifier: &str) -> PathBuf {
        self.store_dir.join(format!("{}.mp", identifier))
    }
}

/// 配置管理器（单例）
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn store_dir(mut self, dir: PathBuf) -> Self {
        self.config.store_dir = dir;
        self
    }

    pub fn rule_source_path(mut self, path: PathBuf) -> Self {
        self.config.rule_source_path = path;
        self
    }

    pub fn ruleset_identifier(mut self, identifier: String) -> Self {
        self.config.ruleset_identifier = identifier;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
