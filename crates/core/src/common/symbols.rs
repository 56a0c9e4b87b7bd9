//! 内置证券标的表。
//!
//! 引擎不接真实行情源，所有标的的基准价、展示名与分类都取自这张
//! 固定表；未收录的代码回退到 100.0 的默认基准价。

/// Tick 轮播的标的池，混合美股、印度股、加密货币与指数
pub const TICK_ROSTER: [&str; 15] = [
    "AAPL",
    "GOOGL",
    "MSFT",
    "TSLA",
    "AMZN",
    "NVDA",
    "RELIANCE.NS",
    "TCS.NS",
    "INFY.NS",
    "HDFCBANK.NS",
    "ICICIBANK.NS",
    "BTC-USD",
    "ETH-USD",
    "NIFTY50",
    "SENSEX",
];

/// 市场总览页聚合的标的池
pub const OVERVIEW_ROSTER: [&str; 8] = [
    "AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "BTC-USD", "ETH-USD", "SPY",
];

/// 未收录标的的默认基准价
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// # Summary
/// 查询标的的基准价格，序列合成与 Tick 生成都以它为价格中枢。
///
/// # Arguments
/// * `symbol`: 证券代码。
///
/// # Returns
/// 收录标的返回表内价格，否则返回 `DEFAULT_BASE_PRICE`。
pub fn base_price(symbol: &str) -> f64 {
    match symbol {
        "AAPL" => 175.43,
        "GOOGL" => 142.56,
        "MSFT" => 378.91,
        "TSLA" => 248.73,
        "AMZN" => 155.89,
        "NVDA" => 875.43,
        "RELIANCE.NS" => 2456.78,
        "TCS.NS" => 3789.12,
        "INFY.NS" => 1567.89,
        "HDFCBANK.NS" => 1623.45,
        "ICICIBANK.NS" => 987.65,
        "HINDUNILVR.NS" => 2567.89,
        "ITC.NS" => 456.78,
        "SBIN.NS" => 567.89,
        "BHARTIARTL.NS" => 1234.56,
        "ASIANPAINT.NS" => 3123.45,
        "BTC-USD" => 67234.56,
        "ETH-USD" => 3456.78,
        "NIFTY50" => 21567.89,
        "SENSEX" => 71234.56,
        "SPY" => 456.78,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// # Summary
/// 查询标的的展示名称，用于市场总览等面向 UI 的聚合输出。
///
/// # Arguments
/// * `symbol`: 证券代码。
///
/// # Returns
/// 收录标的返回公司/资产名，否则原样返回代码。
pub fn display_name(symbol: &str) -> &str {
    match symbol {
        "AAPL" => "Apple Inc.",
        "GOOGL" => "Alphabet Inc.",
        "MSFT" => "Microsoft Corp.",
        "TSLA" => "Tesla Inc.",
        "AMZN" => "Amazon.com Inc.",
        "BTC-USD" => "Bitcoin",
        "ETH-USD" => "Ethereum",
        "SPY" => "SPDR S&P 500",
        _ => symbol,
    }
}

/// # Summary
/// 判断标的是否属于加密货币，加密标的在 Tick 生成时使用更大的波动率。
///
/// # Arguments
/// * `symbol`: 证券代码。
///
/// # Returns
/// 代码中包含 BTC 或 ETH 时返回 true。
pub fn is_crypto(symbol: &str) -> bool {
    symbol.contains("BTC") || symbol.contains("ETH")
}
