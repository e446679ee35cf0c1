//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum RsadblockError {
    // 规则源相关错误
    #[error("规则源文件不存在：{0}")]
    RuleSourceMissing(String),
    #[error("规则源加载失败：{0}")]
    RuleLoadError(String),
    #[error("规则校验失败：{0}")]
    RuleValidationError(String),

    // 编译相关错误
    #[error("规则正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),
    #[error("规则集编译失败：{0}")]
    RuleCompileError(String),

    // 存储相关错误
    #[error("规则集存储查询失败：{0}")]
    RuleStoreError(String),
    #[error("MessagePack序列化/反序列化失败：{0}")]
    MsgPackError(String),

    // 管理器相关错误
    #[error("规则集管理器未初始化")]
    ManagerNotInitialized,

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("URL解析失败：{0}")]
    UrlError(#[from] UrlParseError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type AdbResult<T> = Result<T, RsadblockError>;
