//! 存储模块：进程级规则集存储（内存层 + 持久化层，单航班编译）

pub mod store;

pub use store::{Lookup, RuleSetStore};
