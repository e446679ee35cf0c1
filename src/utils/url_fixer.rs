//! 地址栏输入修正
//! 无协议前缀的输入默认补全为HTTPS

use url::Url;

use crate::error::{AdbResult, RsadblockError};

/// 地址栏输入修正器
pub struct UrlFixer;

impl UrlFixer {
    /// 补全协议前缀（已带 http:// 或 https:// 时原样返回，幂等）
    pub fn fix(raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return trimmed.to_string();
        }
        format!("https://{}", trimmed)
    }

    /// 修正并解析为可加载URL，解析失败归类为无效输入
    pub fn to_load_url(raw: &str) -> AdbResult<Url> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RsadblockError::InvalidInput(
                "地址栏输入为空".to_string(),
            ));
        }

        let fixed = Self::fix(trimmed);
        let url = Url::parse(&fixed)?;

        // Url::parse 对 "https://" 这类无宿主输入也会报错，但空路径宿主要单独拦
        if url.host_str().map(str::trim).unwrap_or("").is_empty() {
            return Err(RsadblockError::InvalidInput(format!(
                "无法解析为可加载URL：{}",
                raw
            )));
        }

        Ok(url)
    }
}
