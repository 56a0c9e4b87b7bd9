//! # `souba-ta` - 技术指标与交易测算库
//!
//! 本 crate 是 Souba 行情引擎的纯计算层：输入价格序列或标量，
//! 输出指标序列或价位对象，不持有状态、不做 I/O。
//!
//! ## 架构职责
//! - 移动平均、振荡器、波动带等指标的标准公式实现
//! - 全量指标集的隔离式批量计算（单项失败不影响其余）
//! - 枢轴点、斐波那契价位、仓位与风险回报测算
//!
//! 所有指标输出右对齐：输出序列的最后一个值对应输入的最后一根 Bar，
//! 预热窗口为 `period` 的指标对 `n` 根输入产出 `n - period + 1` 个值
//! （RSI 与 ATR 依赖前收，各少一个）。

pub mod battery;
pub mod indicators;
pub mod levels;
pub mod risk;
