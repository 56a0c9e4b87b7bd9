use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use souba_cache::mem::MemSeriesCache;
use souba_core::cache::port::SeriesCache;
use souba_core::common::Interval;
use souba_core::market::entity::{Bar, SeriesKey};

fn make_series(start_price: f64, count: usize) -> Arc<Vec<Bar>> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let bars = (0..count)
        .map(|i| {
            let idx = u32::try_from(i).unwrap();
            let close = start_price + f64::from(idx);
            Bar {
                time: start + Duration::days(i64::from(idx)),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000_000,
            }
        })
        .collect();
    Arc::new(bars)
}

#[tokio::test]
async fn test_mem_cache_hit_returns_same_instance() {
    let cache = MemSeriesCache::new();
    let key = SeriesKey::new("AAPL", Interval::Day1, 100);
    let series = make_series(100.0, 3);

    cache.put(key.clone(), Arc::clone(&series)).await.unwrap();
    let hit = cache.get(&key).await.unwrap().unwrap();

    // 命中返回的是同一个共享实例，不是拷贝
    assert!(Arc::ptr_eq(&hit, &series));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_mem_cache_miss_is_none() {
    let cache = MemSeriesCache::new();
    let key = SeriesKey::new("AAPL", Interval::Day1, 100);

    let result = cache.get(&key).await.unwrap();
    assert!(result.is_none());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_mem_cache_distinct_keys_are_distinct_entries() {
    let cache = MemSeriesCache::new();
    let daily = SeriesKey::new("AAPL", Interval::Day1, 100);
    let hourly = SeriesKey::new("AAPL", Interval::Hour1, 100);
    let shorter = SeriesKey::new("AAPL", Interval::Day1, 50);

    cache.put(daily.clone(), make_series(100.0, 3)).await.unwrap();
    cache.put(hourly.clone(), make_series(200.0, 3)).await.unwrap();
    cache.put(shorter.clone(), make_series(300.0, 3)).await.unwrap();

    assert_eq!(cache.len(), 3);
    let daily_hit = cache.get(&daily).await.unwrap().unwrap();
    assert_eq!(daily_hit[0].close, 100.0);
}

#[tokio::test]
async fn test_bounded_cache_evicts_oldest() {
    let cache = MemSeriesCache::with_capacity(2);
    let a = SeriesKey::new("AAPL", Interval::Day1, 10);
    let b = SeriesKey::new("GOOGL", Interval::Day1, 10);
    let c = SeriesKey::new("MSFT", Interval::Day1, 10);

    cache.put(a.clone(), make_series(1.0, 2)).await.unwrap();
    cache.put(b.clone(), make_series(2.0, 2)).await.unwrap();
    cache.put(c.clone(), make_series(3.0, 2)).await.unwrap();

    // 第三个键挤掉最久未使用的 a
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&a).await.unwrap().is_none());
    assert!(cache.get(&b).await.unwrap().is_some());
    assert!(cache.get(&c).await.unwrap().is_some());
}

#[tokio::test]
async fn test_bounded_cache_get_refreshes_recency() {
    let cache = MemSeriesCache::with_capacity(2);
    let a = SeriesKey::new("AAPL", Interval::Day1, 10);
    let b = SeriesKey::new("GOOGL", Interval::Day1, 10);
    let c = SeriesKey::new("MSFT", Interval::Day1, 10);

    cache.put(a.clone(), make_series(1.0, 2)).await.unwrap();
    cache.put(b.clone(), make_series(2.0, 2)).await.unwrap();
    // 读 a 之后 b 成为最久未使用
    let _ = cache.get(&a).await.unwrap();
    cache.put(c.clone(), make_series(3.0, 2)).await.unwrap();

    assert!(cache.get(&a).await.unwrap().is_some());
    assert!(cache.get(&b).await.unwrap().is_none());
    assert!(cache.get(&c).await.unwrap().is_some());
}

#[tokio::test]
async fn test_put_same_key_overwrites() {
    let cache = MemSeriesCache::with_capacity(2);
    let key = SeriesKey::new("AAPL", Interval::Day1, 10);

    cache.put(key.clone(), make_series(1.0, 2)).await.unwrap();
    cache.put(key.clone(), make_series(9.0, 2)).await.unwrap();

    assert_eq!(cache.len(), 1);
    let hit = cache.get(&key).await.unwrap().unwrap();
    assert_eq!(hit[0].close, 9.0);
}
