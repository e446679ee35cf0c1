//! 规则集持久化缓存管理
//! 仅处理已编译规则集的本地序列化（MessagePack）和反序列化

use rmp_serde::{Serializer, from_slice};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::RuleList;
use crate::config::GlobalConfig;
use crate::error::{AdbResult, RsadblockError};

/// 持久化格式版本（结构不兼容时递增）
pub const STORED_FORMAT_VERSION: u32 = 1;

/// 已编译规则集的持久化形态
/// 保存编译期校验/规范化后的规则数据，跨启动复用时无需重新走规则源管线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRuleSet {
    pub format_version: u32,
    pub identifier: String,
    pub rules: RuleList,
}

impl StoredRuleSet {
    pub fn new(identifier: String, rules: RuleList) -> Self {
        Self {
            format_version: STORED_FORMAT_VERSION,
            identifier,
            rules,
        }
    }
}

/// 规则集持久化缓存管理器
pub struct RuleSetCacheManager;

impl RuleSetCacheManager {
    /// 从本地缓存加载指定标识符的规则集
    pub async fn load_from_cache(
        config: &GlobalConfig,
        identifier: &str,
    ) -> AdbResult<StoredRuleSet> {
        let cache_path = config.stored_ruleset_path(identifier);
        let cache_data = tokio::fs::read(&cache_path).await?;

        // MessagePack反序列化
        let stored: StoredRuleSet = from_slice(&cache_data)
            .map_err(|e| RsadblockError::MsgPackError(format!("反序列化失败：{}", e)))?;

        if stored.format_version != STORED_FORMAT_VERSION {
            return Err(RsadblockError::RuleStoreError(format!(
                "持久化格式版本不匹配：期望 {}，实际 {}",
                STORED_FORMAT_VERSION, stored.format_version
            )));
        }

        if stored.identifier != identifier {
            return Err(RsadblockError::RuleStoreError(format!(
                "持久化条目标识符不匹配：期望 {}，实际 {}",
                identifier, stored.identifier
            )));
        }

        debug!(
            "缓存文件反序列化成功，标识符：{}，规则数：{}",
            identifier,
            stored.rules.len()
        );

        Ok(stored)
    }

    /// 将规则集缓存到本地（按标识符分文件存放）
    pub async fn save_to_cache(config: &GlobalConfig, stored: &StoredRuleSet) -> AdbResult<()> {
        let cache_path = config.stored_ruleset_path(&stored.identifier);
        let mut cache_data = Vec::new();

        // MessagePack序列化
        stored
            .serialize(&mut Serializer::new(&mut cache_data))
            .map_err(|e| RsadblockError::MsgPackError(format!("序列化失败：{}", e)))?;

        debug!(
            "规则集序列化成功，标识符：{}，序列化后数据大小：{} 字节",
            stored.identifier,
            cache_data.len()
        );

        // 写入文件（目录不存在时先创建）
        tokio::fs::create_dir_all(&config.store_dir).await?;
        tokio::fs::write(&cache_path, cache_data).await?;
        Ok(())
    }

    /// 清除指定标识符的本地缓存
    pub async fn clear_cache(config: &GlobalConfig, identifier: &str) -> AdbResult<()> {
        let cache_path = config.stored_ruleset_path(identifier);
        if cache_path.exists() {
            tokio::fs::remove_file(&cache_path).await?;
        }
        Ok(())
    }
}
