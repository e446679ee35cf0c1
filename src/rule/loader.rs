//! 规则源加载管理器
//! 负责定位并读取内置声明式规则源文件（JSON）

use std::path::Path;

use tracing::debug;

use super::model::RuleList;
use crate::config::GlobalConfig;
use crate::error::{AdbResult, RsadblockError};

/// 规则源加载管理器
pub struct RuleSourceLoader;

impl RuleSourceLoader {
    /// 加载并校验规则源（定位 -> 读取 -> 解析 -> 校验）
    pub async fn load(config: &GlobalConfig) -> AdbResult<RuleList> {
        let source_path = &config.rule_source_path;

        // 1. 定位规则源文件（缺失不视为IO错误，单独归类）
        if !Self::exists(source_path).await {
            return Err(RsadblockError::RuleSourceMissing(
                source_path.display().to_string(),
            ));
        }

        // 2. 读取为UTF-8文本（文件存在但不可读归类为加载失败）
        let source_text = tokio::fs::read_to_string(source_path).await.map_err(|e| {
            RsadblockError::RuleLoadError(format!(
                "读取规则源 {} 失败：{}",
                source_path.display(),
                e
            ))
        })?;
        debug!(
            "规则源读取成功，路径：{}，大小：{} 字节",
            source_path.display(),
            source_text.len()
        );

        // 3. 解析 + 整表校验
        let rule_list = RuleList::from_json(&source_text)?;
        rule_list.validate()?;
        debug!("规则源解析成功，规则总数：{}", rule_list.len());

        Ok(rule_list)
    }

    async fn exists(path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use std::io::Write;

    fn config_with_source(path: std::path::PathBuf) -> GlobalConfig {
        ConfigManager::custom().rule_source_path(path).build()
    }

    #[tokio::test]
    async fn test_load_valid_source_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"trigger": {{"url-filter": "tracker\\.io"}}, "action": {{"type": "block"}}}}]"#
        )
        .unwrap();

        let config = config_with_source(file.path().to_path_buf());
        let list = RuleSourceLoader::load(&config).await.unwrap();
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_source_is_dedicated_error() {
        let config = config_with_source("no/such/adblock-rules.json".into());
        let err = RuleSourceLoader::load(&config).await.unwrap_err();
        assert!(matches!(err, RsadblockError::RuleSourceMissing(_)));
    }

    #[tokio::test]
    async fn test_unreadable_source_is_load_error() {
        // 文件存在但不是合法UTF-8文本
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x80, 0x80]).unwrap();

        let config = config_with_source(file.path().to_path_buf());
        let err = RuleSourceLoader::load(&config).await.unwrap_err();
        assert!(matches!(err, RsadblockError::RuleLoadError(_)));
    }

    #[tokio::test]
    async fn test_malformed_source_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not a rule list").unwrap();

        let config = config_with_source(file.path().to_path_buf());
        let err = RuleSourceLoader::load(&config).await.unwrap_err();
        assert!(matches!(err, RsadblockError::JsonError(_)));
    }
}
