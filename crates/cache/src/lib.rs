//! # `souba-cache` - 内存序列缓存
//!
//! ## 架构职责
//! - 实现 `souba-core` 定义的 `SeriesCache` 端口。
//! - 以 `(symbol, interval, limit)` 三元组为键缓存整条历史序列。
//! - 默认不设容量上限，可选开启 LRU 逐出。

pub mod mem;
