use souba_core::ta::entity::{FibDirection, FibLevel, PivotPoints};

// 斐波那契比例集：0 到 1 为回撤挡位，1 以上为扩展挡位
pub const FIB_RATIOS: [f64; 11] = [
    0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0, 1.272, 1.414, 1.618, 2.0,
];

/// # Summary
/// 经典枢轴点：由前一周期的高、低、收算出轴心与三档支撑阻力。
///
/// # Arguments
/// * `high`: 前一周期最高价。
/// * `low`: 前一周期最低价。
/// * `close`: 前一周期收盘价。
///
/// # Returns
/// 轴心加 R1/R2/R3、S1/S2/S3 共七个价位。
pub fn pivot_points(high: f64, low: f64, close: f64) -> PivotPoints {
    let pivot = (high + low + close) / 3.0;
    let range = high - low;
    PivotPoints {
        pivot,
        r1: 2.0 * pivot - low,
        r2: pivot + range,
        r3: high + 2.0 * (pivot - low),
        s1: 2.0 * pivot - high,
        s2: pivot - range,
        s3: low - 2.0 * (high - pivot),
    }
}

/// # Summary
/// 斐波那契价位：按固定比例集在高低区间上取挡位。
///
/// # Logic
/// 1. 回撤从最高价向下量：`level = high - range * ratio`。
/// 2. 扩展从最低价向上量：`level = low + range * ratio`，比例超过 1 时越过最高价。
/// 3. 标签为百分比一位小数，如 `"61.8"`。
///
/// # Arguments
/// * `high`: 区间最高价。
/// * `low`: 区间最低价。
/// * `direction`: 回撤或扩展。
///
/// # Returns
/// 与比例集等长的挡位序列，保持比例集顺序。
pub fn fibonacci_levels(high: f64, low: f64, direction: FibDirection) -> Vec<FibLevel> {
    let range = high - low;
    FIB_RATIOS
        .iter()
        .map(|ratio| {
            let level = match direction {
                FibDirection::Retracement => high - range * ratio,
                FibDirection::Extension => low + range * ratio,
            };
            FibLevel {
                ratio: *ratio,
                level,
                label: format!("{:.1}", ratio * 100.0),
            }
        })
        .collect()
}
