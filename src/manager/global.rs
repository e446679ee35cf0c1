//! 全局规则集管理器单例管理
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::manager::{ApplyOutcome, RuleSetManager};
use crate::config::{ConfigManager, GlobalConfig};
use crate::error::{AdbResult, RsadblockError};
use crate::surface::ContentFilterSurface;

/// 全局管理器实例
static GLOBAL_MANAGER: Lazy<Arc<OnceCell<RuleSetManager>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 初始化全局管理器（默认配置）
pub async fn init_adblock() -> AdbResult<()> {
    init_adblock_with_config(ConfigManager::get_default()).await
}

/// 带自定义配置初始化全局管理器
pub async fn init_adblock_with_config(config: GlobalConfig) -> AdbResult<()> {
    if GLOBAL_MANAGER.get().is_some() {
        return Ok(());
    }

    let manager = RuleSetManager::with_config(config);
    GLOBAL_MANAGER.set(manager).map_err(|_| {
        RsadblockError::ManagerNotInitialized
    })?;

    Ok(())
}

/// 获取全局管理器
pub(crate) fn get_global_manager() -> AdbResult<&'static RuleSetManager> {
    GLOBAL_MANAGER.get()
        .ok_or(RsadblockError::ManagerNotInitialized)
}

/// 以全局管理器执行 ensure_rules_applied
pub async fn ensure_rules_applied(
    identifier: &str,
    surface: &mut dyn ContentFilterSurface,
) -> AdbResult<ApplyOutcome> {
    get_global_manager()?
        .ensure_rules_applied(identifier, surface)
        .await
}

/// 以全局管理器和配置中的默认标识符执行 ensure_rules_applied
pub async fn ensure_default_rules_applied(
    surface: &mut dyn ContentFilterSurface,
) -> AdbResult<ApplyOutcome> {
    get_global_manager()?
        .ensure_default_rules_applied(surface)
        .await
}
