//! 规则集管理器核心：保证指定标识符的规则集可用并挂接到渲染面
//! 过滤是尽力而为的：任何核心失败只记日志并跳过过滤，绝不阻塞页面加载

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{AdbResult, RsadblockError};
use crate::store::{Lookup, RuleSetStore};
use crate::surface::ContentFilterSurface;

/// ensure_rules_applied 的成功终态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// 存储命中，直接挂接
    AppliedFromStore,
    /// 未命中，编译入库后挂接
    CompiledAndApplied,
}

/// 规则集管理器
#[derive(Debug)]
pub struct RuleSetManager {
    store: Arc<RuleSetStore>,
}

impl RuleSetManager {
    /// 创建管理器（默认配置）
    pub fn new() -> Self {
        Self::with_config(ConfigManager::get_default())
    }

    /// 带自定义配置创建管理器
    pub fn with_config(config: GlobalConfig) -> Self {
        Self {
            store: Arc::new(RuleSetStore::new(config)),
        }
    }

    /// 进程级规则集存储（显式失效/清空入口）
    pub fn store(&self) -> &Arc<RuleSetStore> {
        &self.store
    }

    /// 保证标识符对应的规则集已编译并挂接到渲染面（两阶段：查询 -> 编译）
    /// 每次调用至多挂接一次；所有失败分支记日志后返回错误，调用方可丢弃
    pub async fn ensure_rules_applied(
        &self,
        identifier: &str,
        surface: &mut dyn ContentFilterSurface,
    ) -> AdbResult<ApplyOutcome> {
        if identifier.trim().is_empty() {
            return Err(RsadblockError::InvalidInput(
                "规则集标识符不能为空".to_string(),
            ));
        }

        // 阶段1：查询进程级存储
        match self.store.lookup(identifier).await {
            Ok(Lookup::Hit(ruleset)) => {
                surface.add_content_ruleset(ruleset);
                debug!("规则集 [{}] 存储命中并已挂接", identifier);
                return Ok(ApplyOutcome::AppliedFromStore);
            }
            Ok(Lookup::Miss) => {
                debug!("规则集 [{}] 存储未命中，进入编译路径", identifier);
            }
            // 查询失败：跳过过滤，不走编译回退
            Err(e) => {
                warn!("规则集 [{}] 存储查询失败，本次加载不过滤：{}", identifier, e);
                return Err(e);
            }
        }

        // 阶段2：编译路径（单航班），成功后入库并挂接
        match self.store.get_or_compile(identifier).await {
            Ok(ruleset) => {
                surface.add_content_ruleset(ruleset);
                debug!("规则集 [{}] 编译完成并已挂接", identifier);
                Ok(ApplyOutcome::CompiledAndApplied)
            }
            Err(e) => {
                warn!("规则集 [{}] 编译失败，本次加载不过滤：{}", identifier, e);
                Err(e)
            }
        }
    }

    /// 以配置中的默认标识符执行 ensure_rules_applied
    pub async fn ensure_default_rules_applied(
        &self,
        surface: &mut dyn ContentFilterSurface,
    ) -> AdbResult<ApplyOutcome> {
        let identifier = self.store.config().ruleset_identifier.clone();
        self.ensure_rules_applied(&identifier, surface).await
    }
}

impl Default for RuleSetManager {
    fn default() -> Self {
        Self::new()
    }
}
