//! # `souba-feed` - 合成行情适配器
//!
//! ## 架构职责
//! - 实现 `souba-core` 定义的 `HistoryProvider` 与 `TickFeed` 端口。
//! - 历史序列与实时 Tick 全部由随机源合成，不发起任何网络 I/O。
//! - 随机性经 `RandomSource` 端口注入，测试可换成固定种子实现复现序列。

pub mod rng;
pub mod synth;
pub mod ticker;
