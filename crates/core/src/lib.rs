//! # `souba-core` - 领域核心
//!
//! 本 crate 是 Souba 行情引擎的六边形架构核心层，只包含实体 (Entity)、
//! 端口 (Port Trait) 与领域错误，不依赖任何具体基础设施。
//!
//! ## 架构职责
//! - 定义 K 线、Tick、指标集等行情领域模型
//! - 声明历史数据源、行情推送、序列缓存等端口契约
//! - 提供时钟与随机源的可注入抽象，供测试劫持
//! - 承载全局配置结构与内置证券标的表

pub mod cache {
    pub mod error;
    pub mod port;
}

pub mod common;

pub mod config;

pub mod market {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod ta {
    pub mod entity;
    pub mod error;
}
