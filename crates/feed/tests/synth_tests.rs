use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use souba_core::common::Interval;
use souba_core::common::time::{FixedClock, SystemClock};
use souba_core::market::port::HistoryProvider;
use souba_feed::rng::{SeededRandom, ThreadRandom};
use souba_feed::synth::SyntheticHistory;

#[tokio::test]
async fn test_synth_bars_hold_price_invariants() {
    let provider = SyntheticHistory::new(Arc::new(ThreadRandom), Arc::new(SystemClock));
    let bars = provider
        .fetch_bars("AAPL", Interval::Day1, 500)
        .await
        .unwrap();

    assert_eq!(bars.len(), 500);
    for bar in &bars {
        assert!(bar.low <= bar.open.min(bar.close));
        assert!(bar.open.max(bar.close) <= bar.high);
        assert!(bar.low > 0.0);
        assert!((100_000..10_100_000).contains(&bar.volume));
    }
}

#[tokio::test]
async fn test_synth_timestamps_step_back_from_clock() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(FixedClock::new(now));
    let provider = SyntheticHistory::new(Arc::new(SeededRandom::new(7)), clock);
    let bars = provider
        .fetch_bars("MSFT", Interval::Day1, 5)
        .await
        .unwrap();

    // 最后一根落在当前时刻的前一天，整条序列等距一天
    assert_eq!(bars.len(), 5);
    assert_eq!(bars[4].time, now - Duration::days(1));
    assert_eq!(bars[0].time, now - Duration::days(5));
    for pair in bars.windows(2) {
        assert_eq!(pair[1].time - pair[0].time, Duration::days(1));
    }
}

#[tokio::test]
async fn test_synth_hourly_interval_spacing() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let provider = SyntheticHistory::new(
        Arc::new(SeededRandom::new(7)),
        Arc::new(FixedClock::new(now)),
    );
    let bars = provider
        .fetch_bars("AAPL", Interval::Hour1, 24)
        .await
        .unwrap();

    assert_eq!(bars[23].time, now - Duration::hours(1));
    for pair in bars.windows(2) {
        assert_eq!(pair[1].time - pair[0].time, Duration::hours(1));
    }
}

#[tokio::test]
async fn test_synth_seeded_source_reproduces_series() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let a = SyntheticHistory::new(
        Arc::new(SeededRandom::new(42)),
        Arc::new(FixedClock::new(now)),
    );
    let b = SyntheticHistory::new(
        Arc::new(SeededRandom::new(42)),
        Arc::new(FixedClock::new(now)),
    );

    let left = a.fetch_bars("BTC-USD", Interval::Hour1, 100).await.unwrap();
    let right = b.fetch_bars("BTC-USD", Interval::Hour1, 100).await.unwrap();
    assert_eq!(left, right);

    let other_seed = SyntheticHistory::new(
        Arc::new(SeededRandom::new(43)),
        Arc::new(FixedClock::new(now)),
    );
    let different = other_seed
        .fetch_bars("BTC-USD", Interval::Hour1, 100)
        .await
        .unwrap();
    assert_ne!(left, different);
}

#[tokio::test]
async fn test_synth_unknown_symbol_orbits_default_base() {
    let provider = SyntheticHistory::new(Arc::new(ThreadRandom), Arc::new(SystemClock));
    let bars = provider
        .fetch_bars("ZZZZ", Interval::Minute5, 200)
        .await
        .unwrap();

    // 默认基准价 100：正弦 ±10、路径噪声 ±2.5、开收噪声 ±2、影线至多 6
    for bar in &bars {
        assert!(bar.high < 121.0);
        assert!(bar.low > 79.0);
    }
}
