use crate::common::Interval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根 OHLCV K 线实体，记录一个周期内的行情波动。
///
/// # Invariants
/// - `low <= min(open, close)` 且 `max(open, close) <= high`。
/// - 四个价格均大于 0（合成侧钳位在 0.01）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    // K 线开始时间
    pub time: DateTime<Utc>,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量
    pub volume: u64,
}

/// # Summary
/// 实时行情 Tick 实体，表示某一瞬间的价格跳动。
/// 只存在于分发回调的调用期间，不会写入历史序列。
///
/// # Invariants
/// - `price` 大于 0；价格字段保留两位小数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    // 证券代码
    pub symbol: String,
    // 最新价
    pub price: f64,
    // 相对基准价的涨跌额
    pub change: f64,
    // 涨跌幅（百分比）
    pub change_percent: f64,
    // 瞬时成交量
    pub volume: u64,
    // 发生时间
    pub time: DateTime<Utc>,
    // 瞬时最高价（行情源未必提供）
    pub high: Option<f64>,
    // 瞬时最低价（行情源未必提供）
    pub low: Option<f64>,
    // 瞬时开盘价（行情源未必提供）
    pub open: Option<f64>,
}

/// # Summary
/// 历史序列缓存键，三元组完全一致才命中同一条目。
///
/// # Invariants
/// - 键一旦构造不可变；相同三元组必须产生相同的哈希与展示串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    // 证券代码
    pub symbol: String,
    // K 线周期
    pub interval: Interval,
    // 请求的 Bar 数量
    pub limit: usize,
}

impl SeriesKey {
    pub fn new(symbol: &str, interval: Interval, limit: usize) -> Self {
        Self {
            symbol: symbol.to_string(),
            interval,
            limit,
        }
    }
}

impl std::fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.symbol, self.interval, self.limit)
    }
}

/// # Summary
/// 市场总览中的单行快照，由最近两根日线推导涨跌。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    // 证券代码
    pub symbol: String,
    // 展示名称
    pub name: String,
    // 最新收盘价
    pub price: f64,
    // 相对前一收盘的涨跌额
    pub change: f64,
    // 涨跌幅（百分比）
    pub change_percent: f64,
    // 最新成交量
    pub volume: u64,
}

/// # Summary
/// 资讯与日历事件的影响等级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// # Summary
/// 一条市场资讯。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    // 资讯编号
    pub id: u32,
    // 标题
    pub title: String,
    // 摘要
    pub summary: String,
    // 来源媒体
    pub source: String,
    // 发布时间
    pub published_at: DateTime<Utc>,
    // 关联标的列表
    pub related_symbols: Vec<String>,
    // 影响等级
    pub impact: Impact,
}

/// # Summary
/// 一条财经日历事件。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    // 事件编号
    pub id: u32,
    // 事件名称
    pub title: String,
    // 经济体/国家
    pub country: String,
    // 公布时间
    pub time: DateTime<Utc>,
    // 影响等级
    pub impact: Impact,
    // 预期值
    pub forecast: String,
    // 前值
    pub previous: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_series_key_display() {
        let key = SeriesKey::new("AAPL", Interval::Day1, 100);
        assert_eq!(key.to_string(), "AAPL:1d:100");
    }

    #[test]
    fn test_series_key_identity() {
        let a = SeriesKey::new("AAPL", Interval::Day1, 100);
        let b = SeriesKey::new("AAPL", Interval::Day1, 100);
        let c = SeriesKey::new("AAPL", Interval::Day1, 50);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_bar_serde_roundtrip() {
        let bar = Bar {
            time: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            open: 100.5,
            high: 103.0,
            low: 99.25,
            close: 102.0,
            volume: 1_234_567,
        };
        let json = serde_json::to_string(&bar).unwrap();
        let back: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bar);
    }
}
