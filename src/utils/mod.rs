//! 工具模块

pub mod url_fixer;

pub use url_fixer::UrlFixer;
