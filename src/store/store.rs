//! 进程级规则集存储
//! 标识符 -> 已编译规则集的进程级关联存储：内存层 + 本地持久化层
//! 同一标识符的并发编译请求合并为单航班（single-flight），所有请求方共享同一次编译结果

use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::compiler::{CompiledRuleSet, RuleCompiler};
use crate::config::GlobalConfig;
use crate::error::{AdbResult, RsadblockError};
use crate::rule::{RuleSetCacheManager, RuleSourceLoader, StoredRuleSet};

/// 存储查询结果（未命中不是错误）
#[derive(Debug, Clone)]
pub enum Lookup {
    /// 命中：返回共享的已编译规则集
    Hit(Arc<CompiledRuleSet>),
    /// 未命中：需要走编译路径
    Miss,
}

/// 每个标识符的单航班槽位
type RuleSetSlot = Arc<OnceCell<Arc<CompiledRuleSet>>>;

/// 进程级规则集存储
#[derive(Debug)]
pub struct RuleSetStore {
    config: GlobalConfig,
    // 槽位表锁仅保护表本身的读写，绝不跨await持有
    entries: Mutex<HashMap<String, RuleSetSlot>>,
    // 规则源编译执行次数（compile-once不变量的可观测口径）
    compile_count: AtomicUsize,
}

impl RuleSetStore {
    pub fn new(config: GlobalConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
            compile_count: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// 规则源编译已执行的次数
    pub fn compile_count(&self) -> usize {
        self.compile_count.load(Ordering::SeqCst)
    }

    /// 查询存储（内存层 -> 持久化层），不触发规则源编译
    pub async fn lookup(&self, identifier: &str) -> AdbResult<Lookup> {
        let slot = self.slot(identifier);

        // 1. 内存层
        if let Some(ruleset) = slot.get() {
            debug!("规则集 [{}] 内存层命中", identifier);
            return Ok(Lookup::Hit(ruleset.clone()));
        }

        // 2. 持久化层（文件缺失视为未命中，损坏视为查询失败）
        match RuleSetCacheManager::load_from_cache(&self.config, identifier).await {
            Ok(stored) => {
                let ruleset = Arc::new(RuleCompiler::compile(identifier, &stored.rules)?);
                debug!(
                    "规则集 [{}] 持久化层命中，规则数：{}",
                    identifier,
                    ruleset.len()
                );
                // 槽位回填失败（并发初始化中）不影响本次命中结果
                let _ = slot.set(ruleset.clone());
                Ok(Lookup::Hit(ruleset))
            }
            Err(RsadblockError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("规则集 [{}] 未命中", identifier);
                Ok(Lookup::Miss)
            }
            Err(e) => Err(RsadblockError::RuleStoreError(format!(
                "规则集 [{}] 持久化条目不可用：{}",
                identifier, e
            ))),
        }
    }

    /// 获取或编译规则集（单航班：并发请求共享一次编译）
    /// 编译失败不写入任何层，下次请求重新尝试
    pub async fn get_or_compile(&self, identifier: &str) -> AdbResult<Arc<CompiledRuleSet>> {
        let slot = self.slot(identifier);

        let ruleset = slot
            .get_or_try_init(|| self.load_or_compile(identifier))
            .await?;

        Ok(ruleset.clone())
    }

    /// 失效指定标识符（显式外部失效是触发重编译的唯一途径）
    pub async fn invalidate(&self, identifier: &str) -> AdbResult<()> {
        self.entries
            .lock()
            .map_err(|e| RsadblockError::RuleStoreError(format!("槽位表锁获取失败：{}", e)))?
            .remove(identifier);

        RuleSetCacheManager::clear_cache(&self.config, identifier).await?;
        debug!("规则集 [{}] 已失效", identifier);
        Ok(())
    }

    /// 清空整个存储（内存层 + 持久化层）
    pub async fn clear(&self) -> AdbResult<()> {
        let identifiers: Vec<String> = {
            let mut entries = self
                .entries
                .lock()
                .map_err(|e| RsadblockError::RuleStoreError(format!("槽位表锁获取失败：{}", e)))?;
            let identifiers = entries.keys().cloned().collect();
            entries.clear();
            identifiers
        };

        for identifier in &identifiers {
            RuleSetCacheManager::clear_cache(&self.config, identifier).await?;
        }

        // 持久化目录里可能还有本进程未加载过的条目
        if tokio::fs::try_exists(&self.config.store_dir)
            .await
            .unwrap_or(false)
        {
            let mut dir = tokio::fs::read_dir(&self.config.store_dir).await?;
            while let Some(entry) = dir.next_entry().await? {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "mp") {
                    tokio::fs::remove_file(&path).await?;
                }
            }
        }

        debug!("规则集存储已清空");
        Ok(())
    }

    /// 取出（或创建）标识符对应的槽位
    fn slot(&self, identifier: &str) -> RuleSetSlot {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries
            .entry(identifier.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// 单航班初始化体：持久化层优先，否则走规则源管线并回写持久化层
    async fn load_or_compile(&self, identifier: &str) -> AdbResult<Arc<CompiledRuleSet>> {
        // 1. 持久化层
        match RuleSetCacheManager::load_from_cache(&self.config, identifier).await {
            Ok(stored) => {
                let ruleset = RuleCompiler::compile(identifier, &stored.rules)?;
                debug!("从持久化层恢复规则集 [{}] 成功", identifier);
                return Ok(Arc::new(ruleset));
            }
            Err(RsadblockError::IoError(e)) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!("规则集 [{}] 持久化条目不可用，回退到规则源编译：{}", identifier, e);
            }
        }

        // 2. 规则源管线：加载 -> 编译
        let rule_list = RuleSourceLoader::load(&self.config).await?;
        self.compile_count.fetch_add(1, Ordering::SeqCst);
        let ruleset = RuleCompiler::compile(identifier, &rule_list)?;

        // 3. 回写持久化层（失败仅告警，不影响本次结果）
        let stored = StoredRuleSet::new(identifier.to_string(), rule_list);
        if let Err(e) = RuleSetCacheManager::save_to_cache(&self.config, &stored).await {
            warn!("规则集 [{}] 持久化失败：{}", identifier, e);
        } else {
            debug!("规则集 [{}] 已持久化", identifier);
        }

        Ok(Arc::new(ruleset))
    }
}
