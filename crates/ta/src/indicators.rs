use souba_core::ta::entity::{BollingerPoint, MacdPoint, StochasticPoint};
use souba_core::ta::error::TaError;

/// 周期转除数。窗口长度远小于 u32 上限，超限时退化为无穷而不是截断
fn period_divisor(period: usize) -> f64 {
    u32::try_from(period).map_or(f64::INFINITY, f64::from)
}

fn ensure_period(period: usize) -> Result<(), TaError> {
    if period == 0 {
        return Err(TaError::InvalidPeriod(period));
    }
    Ok(())
}

fn ensure_finite(values: &[f64]) -> Result<(), TaError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(TaError::NonFiniteInput(idx)),
        None => Ok(()),
    }
}

fn ensure_matched(highs: &[f64], lows: &[f64], closes: &[f64]) -> Result<(), TaError> {
    if highs.len() != closes.len() || lows.len() != closes.len() {
        return Err(TaError::InvalidParameter(
            "high/low/close series must share one length".to_string(),
        ));
    }
    Ok(())
}

/// # Summary
/// 简单移动平均：每个长度为 `period` 的尾随窗口取算术平均。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `period`: 窗口长度。
///
/// # Returns
/// `n - period + 1` 个均值；输入不足一个窗口时为空序列。
pub fn sma(closes: &[f64], period: usize) -> Result<Vec<f64>, TaError> {
    ensure_period(period)?;
    ensure_finite(closes)?;
    if closes.len() < period {
        return Ok(Vec::new());
    }
    let divisor = period_divisor(period);
    Ok(closes
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / divisor)
        .collect())
}

/// # Summary
/// 指数移动平均：首值取第一个窗口的 SMA 作为种子，
/// 之后按平滑系数 `2 / (period + 1)` 递推。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `period`: 窗口长度。
///
/// # Returns
/// `n - period + 1` 个均值；输入不足一个窗口时为空序列。
pub fn ema(closes: &[f64], period: usize) -> Result<Vec<f64>, TaError> {
    ensure_period(period)?;
    ensure_finite(closes)?;
    if closes.len() < period {
        return Ok(Vec::new());
    }
    let divisor = period_divisor(period);
    let multiplier = 2.0 / (divisor + 1.0);
    let mut out = Vec::with_capacity(closes.len() - period + 1);
    let mut prev = closes[..period].iter().sum::<f64>() / divisor;
    out.push(prev);
    for close in &closes[period..] {
        prev = (close - prev) * multiplier + prev;
        out.push(prev);
    }
    Ok(out)
}

/// # Summary
/// Wilder 相对强弱指数。
///
/// # Logic
/// 1. 对相邻收盘取差分，拆成涨幅与跌幅。
/// 2. 前 `period` 个差分的平均作为初始平均涨跌幅。
/// 3. 之后按 Wilder 平滑 `avg = (avg * (period - 1) + current) / period` 递推。
/// 4. `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `period`: 平滑周期。
///
/// # Returns
/// `n - period` 个值（差分比原序列少一个）；输入不足时为空序列。
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<f64>, TaError> {
    ensure_period(period)?;
    ensure_finite(closes)?;
    if closes.len() <= period {
        return Ok(Vec::new());
    }
    let divisor = period_divisor(period);
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let mut avg_gain = deltas[..period]
        .iter()
        .map(|d| d.max(0.0))
        .sum::<f64>()
        / divisor;
    let mut avg_loss = deltas[..period]
        .iter()
        .map(|d| (-d).max(0.0))
        .sum::<f64>()
        / divisor;

    let mut out = Vec::with_capacity(closes.len() - period);
    out.push(rsi_value(avg_gain, avg_loss));
    for delta in &deltas[period..] {
        avg_gain = (avg_gain * (divisor - 1.0) + delta.max(0.0)) / divisor;
        avg_loss = (avg_loss * (divisor - 1.0) + (-delta).max(0.0)) / divisor;
        out.push(rsi_value(avg_gain, avg_loss));
    }
    Ok(out)
}

/// 平均跌幅为零的窗口：纯涨取 100，完全走平取中值 50
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return 50.0;
        }
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// # Summary
/// MACD 指标：快慢两条 EMA 之差，再对差值序列取 EMA 作信号线。
///
/// # Logic
/// 1. 分别计算 EMA(fast) 与 EMA(slow)，并把快线对齐到慢线起点。
/// 2. 差值序列从第 `slow - 1` 根 Bar 起存在。
/// 3. 攒够 `signal` 个差值后信号线才有定义，柱体 = macd - signal。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `fast`: 快线周期。
/// * `slow`: 慢线周期，必须大于 `fast`。
/// * `signal`: 信号线周期。
///
/// # Returns
/// `n - slow + 1` 个点；预热期内的点 `signal`/`histogram` 为 None。
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<Vec<MacdPoint>, TaError> {
    ensure_period(fast)?;
    ensure_period(slow)?;
    ensure_period(signal)?;
    if fast >= slow {
        return Err(TaError::InvalidParameter(format!(
            "fast period {} must be shorter than slow period {}",
            fast, slow
        )));
    }
    ensure_finite(closes)?;
    if closes.len() < slow {
        return Ok(Vec::new());
    }

    let fast_ema = ema(closes, fast)?;
    let slow_ema = ema(closes, slow)?;
    // 快线比慢线早 slow - fast 个输出，跳过这部分对齐到同一根 Bar
    let offset = slow - fast;
    let line: Vec<f64> = slow_ema
        .iter()
        .zip(fast_ema[offset..].iter())
        .map(|(s, f)| f - s)
        .collect();

    let signal_line = if line.len() >= signal {
        ema(&line, signal)?
    } else {
        Vec::new()
    };

    Ok(line
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let sig = i
                .checked_sub(signal - 1)
                .and_then(|j| signal_line.get(j))
                .copied();
            MacdPoint {
                macd: *value,
                signal: sig,
                histogram: sig.map(|s| value - s),
            }
        })
        .collect())
}

/// # Summary
/// 布林带：中轨为窗口均值，上下轨为中轨加减 `std_dev` 倍标准差。
/// 标准差取总体口径（除以窗口长度），与参考实现保持一致。
///
/// # Arguments
/// * `closes`: 收盘价序列。
/// * `period`: 窗口长度。
/// * `std_dev`: 标准差倍数，必须为正的有限值。
///
/// # Returns
/// `n - period + 1` 个点；输入不足一个窗口时为空序列。
pub fn bollinger_bands(
    closes: &[f64],
    period: usize,
    std_dev: f64,
) -> Result<Vec<BollingerPoint>, TaError> {
    ensure_period(period)?;
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return Err(TaError::InvalidParameter(format!(
            "std_dev multiplier {} must be a positive finite value",
            std_dev
        )));
    }
    ensure_finite(closes)?;
    if closes.len() < period {
        return Ok(Vec::new());
    }
    let divisor = period_divisor(period);
    Ok(closes
        .windows(period)
        .map(|w| {
            let middle = w.iter().sum::<f64>() / divisor;
            let variance = w.iter().map(|c| (c - middle).powi(2)).sum::<f64>() / divisor;
            let band = variance.sqrt() * std_dev;
            BollingerPoint {
                upper: middle + band,
                middle,
                lower: middle - band,
            }
        })
        .collect())
}

/// # Summary
/// 随机指标：%K 衡量收盘价在窗口高低区间中的相对位置，
/// %D 是 %K 的 SMA 慢线。
///
/// # Logic
/// 1. 每个窗口取最高高点 HH 与最低低点 LL。
/// 2. `%K = 100 * (close - LL) / (HH - LL)`；窗口走平时取中值 50。
/// 3. 攒够 `signal` 个 %K 后，`%D = SMA(signal)`。
///
/// # Arguments
/// * `highs`: 最高价序列。
/// * `lows`: 最低价序列。
/// * `closes`: 收盘价序列，三者长度必须一致。
/// * `period`: 窗口长度。
/// * `signal`: %D 平滑周期。
///
/// # Returns
/// `n - period + 1` 个点；预热期内的点 `d` 为 None。
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    signal: usize,
) -> Result<Vec<StochasticPoint>, TaError> {
    ensure_period(period)?;
    ensure_period(signal)?;
    ensure_matched(highs, lows, closes)?;
    ensure_finite(highs)?;
    ensure_finite(lows)?;
    ensure_finite(closes)?;
    let n = closes.len();
    if n < period {
        return Ok(Vec::new());
    }

    let mut k_line = Vec::with_capacity(n - period + 1);
    for i in (period - 1)..n {
        let start = i + 1 - period;
        let hh = highs[start..=i].iter().fold(f64::NEG_INFINITY, |a, b| a.max(*b));
        let ll = lows[start..=i].iter().fold(f64::INFINITY, |a, b| a.min(*b));
        k_line.push(percent_k(closes[i], hh, ll));
    }

    let d_line = if k_line.len() >= signal {
        sma(&k_line, signal)?
    } else {
        Vec::new()
    };

    Ok(k_line
        .iter()
        .enumerate()
        .map(|(i, k)| StochasticPoint {
            k: *k,
            d: i
                .checked_sub(signal - 1)
                .and_then(|j| d_line.get(j))
                .copied(),
        })
        .collect())
}

/// 窗口走平 (HH == LL) 时取中值 50，避免 NaN 外泄
fn percent_k(close: f64, highest: f64, lowest: f64) -> f64 {
    let range = highest - lowest;
    if range == 0.0 {
        return 50.0;
    }
    100.0 * (close - lowest) / range
}

/// # Summary
/// 平均真实波幅：对真实波幅做 Wilder 平滑。
///
/// # Logic
/// 1. 从第二根 Bar 起计算真实波幅
///    `TR = max(high - low, |high - prev_close|, |low - prev_close|)`。
/// 2. 前 `period` 个 TR 的平均作为种子。
/// 3. 之后按 `atr = (atr * (period - 1) + tr) / period` 递推。
///
/// # Arguments
/// * `highs`: 最高价序列。
/// * `lows`: 最低价序列。
/// * `closes`: 收盘价序列，三者长度必须一致。
/// * `period`: 平滑周期。
///
/// # Returns
/// `n - period` 个值（TR 比原序列少一个）；输入不足时为空序列。
pub fn atr(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Result<Vec<f64>, TaError> {
    ensure_period(period)?;
    ensure_matched(highs, lows, closes)?;
    ensure_finite(highs)?;
    ensure_finite(lows)?;
    ensure_finite(closes)?;
    let n = closes.len();
    if n <= period {
        return Ok(Vec::new());
    }

    let divisor = period_divisor(period);
    let ranges: Vec<f64> = (1..n)
        .map(|i| true_range(highs[i], lows[i], closes[i - 1]))
        .collect();

    let mut out = Vec::with_capacity(n - period);
    let mut current = ranges[..period].iter().sum::<f64>() / divisor;
    out.push(current);
    for tr in &ranges[period..] {
        current = (current * (divisor - 1.0) + tr) / divisor;
        out.push(current);
    }
    Ok(out)
}

fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// # Summary
/// 威廉指标：`%R = -100 * (HH - close) / (HH - LL)`，
/// 等价于 %K - 100，取值落在 [-100, 0]。
///
/// # Arguments
/// * `highs`: 最高价序列。
/// * `lows`: 最低价序列。
/// * `closes`: 收盘价序列，三者长度必须一致。
/// * `period`: 窗口长度。
///
/// # Returns
/// `n - period + 1` 个值；输入不足一个窗口时为空序列。
pub fn williams_r(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Result<Vec<f64>, TaError> {
    ensure_period(period)?;
    ensure_matched(highs, lows, closes)?;
    ensure_finite(highs)?;
    ensure_finite(lows)?;
    ensure_finite(closes)?;
    let n = closes.len();
    if n < period {
        return Ok(Vec::new());
    }

    let mut out = Vec::with_capacity(n - period + 1);
    for i in (period - 1)..n {
        let start = i + 1 - period;
        let hh = highs[start..=i].iter().fold(f64::NEG_INFINITY, |a, b| a.max(*b));
        let ll = lows[start..=i].iter().fold(f64::INFINITY, |a, b| a.min(*b));
        let range = hh - ll;
        if range == 0.0 {
            // 窗口走平时取中值，与随机指标的处理对应
            out.push(-50.0);
        } else {
            out.push(-100.0 * (hh - closes[i]) / range);
        }
    }
    Ok(out)
}
