use souba_core::market::entity::Bar;
use souba_core::ta::entity::IndicatorSet;
use souba_core::ta::error::TaError;
use tracing::warn;

use crate::indicators;

// 短期均线周期
pub const SMA_SHORT: usize = 10;
// 中期均线周期
pub const SMA_MEDIUM: usize = 20;
// 长期均线周期
pub const SMA_LONG: usize = 50;
// RSI 平滑周期
pub const RSI_PERIOD: usize = 14;
// MACD 快线周期
pub const MACD_FAST: usize = 12;
// MACD 慢线周期
pub const MACD_SLOW: usize = 26;
// MACD 信号线周期
pub const MACD_SIGNAL: usize = 9;
// 布林带窗口长度
pub const BOLLINGER_PERIOD: usize = 20;
// 布林带标准差倍数
pub const BOLLINGER_STD_DEV: f64 = 2.0;
// 随机指标窗口长度
pub const STOCHASTIC_PERIOD: usize = 14;
// 随机指标 %D 平滑周期
pub const STOCHASTIC_SIGNAL: usize = 3;
// ATR 平滑周期
pub const ATR_PERIOD: usize = 14;
// 威廉指标窗口长度
pub const WILLIAMS_PERIOD: usize = 14;

/// # Summary
/// 对一段 K 线跑全套标准参数的指标组合。
///
/// # Logic
/// 1. 把 Bar 序列拆成收盘、最高、最低三条价格序列。
/// 2. 逐个指标计算；单个指标失败只记日志并置 None，不影响其余指标。
/// 3. 数据不足的指标返回空序列而不是 None，两种情况语义不同。
///
/// # Arguments
/// * `bars`: 按时间升序排列的 K 线序列。
///
/// # Returns
/// 全套指标结果集。
pub fn calculate_technical_indicators(bars: &[Bar]) -> IndicatorSet {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    IndicatorSet {
        sma10: log_failure("SMA(10)", indicators::sma(&closes, SMA_SHORT)),
        sma20: log_failure("SMA(20)", indicators::sma(&closes, SMA_MEDIUM)),
        sma50: log_failure("SMA(50)", indicators::sma(&closes, SMA_LONG)),
        ema10: log_failure("EMA(10)", indicators::ema(&closes, SMA_SHORT)),
        ema20: log_failure("EMA(20)", indicators::ema(&closes, SMA_MEDIUM)),
        rsi: log_failure("RSI(14)", indicators::rsi(&closes, RSI_PERIOD)),
        macd: log_failure(
            "MACD(12,26,9)",
            indicators::macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
        ),
        bollinger_bands: log_failure(
            "Bollinger(20,2)",
            indicators::bollinger_bands(&closes, BOLLINGER_PERIOD, BOLLINGER_STD_DEV),
        ),
        stochastic: log_failure(
            "Stochastic(14,3)",
            indicators::stochastic(&highs, &lows, &closes, STOCHASTIC_PERIOD, STOCHASTIC_SIGNAL),
        ),
        atr: log_failure(
            "ATR(14)",
            indicators::atr(&highs, &lows, &closes, ATR_PERIOD),
        ),
        williams_r: log_failure(
            "Williams %R(14)",
            indicators::williams_r(&highs, &lows, &closes, WILLIAMS_PERIOD),
        ),
    }
}

/// 单指标失败降级为 None 并记日志，保证组合计算不中断
fn log_failure<T>(name: &str, result: Result<Vec<T>, TaError>) -> Option<Vec<T>> {
    match result {
        Ok(values) => Some(values),
        Err(e) => {
            warn!("Indicator {} skipped: {}", name, e);
            None
        }
    }
}
