use serde::{Deserialize, Serialize};

/// 全局应用配置
///
/// 所有字段均带默认值，配置文件与环境变量可以只覆盖其中一部分。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub market: MarketConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    // Tick 生成节拍（毫秒）
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    // 历史序列缓存的条目上限；None 表示会话内不淘汰
    pub history_cache_entries: Option<usize>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            history_cache_entries: None,
        }
    }
}
