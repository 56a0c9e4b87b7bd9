use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub mod rand;
pub mod symbols;
pub mod time;

/// # Summary
/// K 线时间周期枚举，决定序列中相邻两根 Bar 的时间间距。
///
/// # Invariants
/// - 无特定约束。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Interval {
    // 1分钟
    Minute1,
    // 5分钟
    Minute5,
    // 15分钟
    Minute15,
    // 1小时
    Hour1,
    // 1日
    Day1,
    // 1周
    Week1,
}

impl Interval {
    /// # Summary
    /// 返回该周期对应的时间跨度，用于向过去回推序列时间戳。
    ///
    /// # Returns
    /// 返回 `chrono::Duration` 表示的单位间距。
    pub fn unit(&self) -> chrono::Duration {
        match self {
            Interval::Minute1 => chrono::Duration::minutes(1),
            Interval::Minute5 => chrono::Duration::minutes(5),
            Interval::Minute15 => chrono::Duration::minutes(15),
            Interval::Hour1 => chrono::Duration::hours(1),
            Interval::Day1 => chrono::Duration::days(1),
            Interval::Week1 => chrono::Duration::weeks(1),
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::Day1
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "minute1" => Ok(Interval::Minute1),
            "5m" | "5min" | "minute5" => Ok(Interval::Minute5),
            "15m" | "15min" | "minute15" => Ok(Interval::Minute15),
            "1h" | "hour1" => Ok(Interval::Hour1),
            "1d" | "1day" | "day1" => Ok(Interval::Day1),
            "1w" | "1week" | "week1" => Ok(Interval::Week1),
            _ => Err(format!("Unknown Interval: {}", s)),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interval::Minute1 => write!(f, "1m"),
            Interval::Minute5 => write!(f, "5m"),
            Interval::Minute15 => write!(f, "15m"),
            Interval::Hour1 => write!(f, "1h"),
            Interval::Day1 => write!(f, "1d"),
            Interval::Week1 => write!(f, "1w"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_parse_aliases() {
        // 前端传参同时存在 "1d" 与 "1day" 两种写法
        assert_eq!("1day".parse::<Interval>(), Ok(Interval::Day1));
        assert_eq!("1d".parse::<Interval>(), Ok(Interval::Day1));
        assert_eq!("15MIN".parse::<Interval>(), Ok(Interval::Minute15));
        assert!("3h".parse::<Interval>().is_err());
    }

    #[test]
    fn test_interval_display_roundtrip() {
        let all = [
            Interval::Minute1,
            Interval::Minute5,
            Interval::Minute15,
            Interval::Hour1,
            Interval::Day1,
            Interval::Week1,
        ];
        for iv in all {
            assert_eq!(iv.to_string().parse::<Interval>(), Ok(iv));
        }
    }

    #[test]
    fn test_interval_unit() {
        assert_eq!(Interval::Day1.unit(), chrono::Duration::days(1));
        assert_eq!(Interval::Minute5.unit(), chrono::Duration::minutes(5));
    }
}
