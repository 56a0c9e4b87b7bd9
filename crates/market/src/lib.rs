//! # `souba-market` - 市场数据服务
//!
//! ## 架构职责
//! - 实现 `souba-core` 定义的 `MarketData` 端口，是 UI 会话的唯一入口。
//! - 按 `(symbol, interval, limit)` 三元组做历史序列的缓存编排。
//! - 维护按标的分组的订阅注册表，把共享推送源的 Tick 扇出给对应回调。
//! - 推送源随订阅惰性启动，注册表清空或显式断开时停止。

pub mod service;
