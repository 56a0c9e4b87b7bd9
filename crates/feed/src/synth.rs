use std::sync::Arc;

use async_trait::async_trait;
use souba_core::common::Interval;
use souba_core::common::rand::RandomSource;
use souba_core::common::symbols;
use souba_core::common::time::TimeProvider;
use souba_core::market::entity::Bar;
use souba_core::market::error::MarketError;
use souba_core::market::port::HistoryProvider;

/// # Summary
/// 合成历史行情提供者：按符号基准价生成正弦叠加噪声的 OHLCV 序列。
///
/// # Invariants
/// - 每根 Bar 满足 `low <= min(open, close)` 且 `max(open, close) <= high`。
/// - 价格钳位在 0.01 以上并保留两位小数。
/// - 时间戳按周期单位等距递增，最后一根落在当前时刻的前一个单位。
pub struct SyntheticHistory {
    // 注入的随机源
    rand: Arc<dyn RandomSource>,
    // 注入的时钟
    clock: Arc<dyn TimeProvider>,
}

impl SyntheticHistory {
    /// # Summary
    /// 创建合成历史提供者。
    ///
    /// # Arguments
    /// * `rand`: 随机源端口。
    /// * `clock`: 时钟端口。
    ///
    /// # Returns
    /// 返回初始化后的 SyntheticHistory。
    pub fn new(rand: Arc<dyn RandomSource>, clock: Arc<dyn TimeProvider>) -> Self {
        Self { rand, clock }
    }
}

/// 价格统一保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 钳位加舍入，两步都单调所以不破坏 Bar 的价格次序
fn clamp_price(value: f64) -> f64 {
    round2(value.max(0.01))
}

#[async_trait]
impl HistoryProvider for SyntheticHistory {
    /// # Summary
    /// 合成一条指定长度的 OHLCV 序列。
    ///
    /// # Logic
    /// 1. 取符号基准价，未知符号退化为默认基准价。
    /// 2. 以 `sin(i * 0.1) * 10` 叠加 ±2.5 噪声画出价格路径。
    /// 3. 开收盘为路径加独立 ±2 噪声；最高最低在开收盘外侧再加 0 到 6 的外延。
    /// 4. 时间戳从当前时刻向过去回推，第 `i` 根落在 `now - unit * (limit - i)`。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `interval`: K 线周期。
    /// * `limit`: 序列长度。
    ///
    /// # Returns
    /// 恰好 `limit` 根 Bar；合成路径不会失败。
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Bar>, MarketError> {
        let base = symbols::base_price(symbol);
        let now = self.clock.now();
        let unit = interval.unit();

        let mut bars = Vec::with_capacity(limit);
        for i in 0..limit {
            let idx = f64::from(u32::try_from(i).unwrap_or(u32::MAX));
            let path = base + (idx * 0.1).sin() * 10.0 + self.rand.uniform(-2.5, 2.5);

            let open = path + self.rand.uniform(-2.0, 2.0);
            let close = path + self.rand.uniform(-2.0, 2.0);
            let high = open.max(close) + self.rand.uniform(0.0, 6.0);
            let low = open.min(close) - self.rand.uniform(0.0, 6.0);

            let steps_back = i32::try_from(limit - i).unwrap_or(i32::MAX);
            bars.push(Bar {
                time: now - unit * steps_back,
                open: clamp_price(open),
                high: clamp_price(high),
                low: clamp_price(low),
                close: clamp_price(close),
                volume: self.rand.uniform_u64(100_000, 10_100_000),
            });
        }
        Ok(bars)
    }
}
