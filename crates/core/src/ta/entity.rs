use serde::{Deserialize, Serialize};

/// # Summary
/// 一个 MACD 输出点。快慢线差值从第 `slow` 根 Bar 起存在，
/// 信号线与柱体要等够 `signal` 个 MACD 值后才有定义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    // 快慢 EMA 之差
    pub macd: f64,
    // MACD 的 EMA 信号线（预热期内为 None）
    pub signal: Option<f64>,
    // macd - signal（预热期内为 None）
    pub histogram: Option<f64>,
}

/// # Summary
/// 一个布林带输出点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerPoint {
    // 上轨
    pub upper: f64,
    // 中轨（窗口均值）
    pub middle: f64,
    // 下轨
    pub lower: f64,
}

/// # Summary
/// 一个随机指标输出点。%D 要等够 `signal` 个 %K 值后才有定义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticPoint {
    // %K 快线
    pub k: f64,
    // %D 慢线（预热期内为 None）
    pub d: Option<f64>,
}

/// # Summary
/// 一次全量指标计算的结果集。所有输出右对齐：
/// 每个序列的最后一个值对应输入的最后一根 Bar。
///
/// # Invariants
/// - `None` 表示该指标计算失败（已记录日志）；
///   `Some(空序列)` 表示输入长度不足预热窗口。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    // 10 周期简单移动平均
    pub sma10: Option<Vec<f64>>,
    // 20 周期简单移动平均
    pub sma20: Option<Vec<f64>>,
    // 50 周期简单移动平均
    pub sma50: Option<Vec<f64>>,
    // 10 周期指数移动平均
    pub ema10: Option<Vec<f64>>,
    // 20 周期指数移动平均
    pub ema20: Option<Vec<f64>>,
    // 14 周期相对强弱指数
    pub rsi: Option<Vec<f64>>,
    // MACD(12, 26, 9)
    pub macd: Option<Vec<MacdPoint>>,
    // 布林带(20, 2)
    pub bollinger_bands: Option<Vec<BollingerPoint>>,
    // 随机指标(14, 3)
    pub stochastic: Option<Vec<StochasticPoint>>,
    // 14 周期平均真实波幅
    pub atr: Option<Vec<f64>>,
    // 14 周期威廉指标
    pub williams_r: Option<Vec<f64>>,
}

/// # Summary
/// 经典枢轴点结果，由前一周期的高低收推导。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    // 枢轴
    pub pivot: f64,
    // 第一至第三阻力位
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    // 第一至第三支撑位
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

/// # Summary
/// 斐波那契层级的推导方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FibDirection {
    // 回撤：从高点向下按比例回落
    Retracement,
    // 扩展：从低点向上按比例延伸
    Extension,
}

/// # Summary
/// 一条斐波那契价位。支撑/阻力的归类取决于调用方的现价，属于视图层职责。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    // 比例系数
    pub ratio: f64,
    // 推导出的价位
    pub level: f64,
    // 百分比标签（一位小数，如 "61.8"）
    pub label: String,
}

/// # Summary
/// 风险回报测算结果。
///
/// # Invariants
/// - `ratio` 永远是有限值；风险为零时取 0 哨兵而不是 ∞/NaN。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReward {
    // 每股风险额
    pub risk: f64,
    // 每股回报额
    pub reward: f64,
    // 回报/风险比
    pub ratio: f64,
}
