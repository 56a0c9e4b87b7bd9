use std::sync::{Arc, Mutex};
use std::time::Duration;

use souba_core::common::symbols::TICK_ROSTER;
use souba_core::common::time::SystemClock;
use souba_core::market::entity::Tick;
use souba_core::market::port::{TickFeed, TickHandler};
use souba_feed::rng::ThreadRandom;
use souba_feed::ticker::TickGenerator;
use tokio::time::sleep;

fn collector() -> (TickHandler, Arc<Mutex<Vec<Tick>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let handler: TickHandler = Arc::new(move |tick: &Tick| {
        sink.lock().unwrap().push(tick.clone());
    });
    (handler, seen)
}

fn make_feed(cadence_ms: u64) -> TickGenerator {
    TickGenerator::new(
        Duration::from_millis(cadence_ms),
        Arc::new(ThreadRandom),
        Arc::new(SystemClock),
    )
}

#[tokio::test]
async fn test_ticker_first_tick_waits_one_cadence() {
    let feed = make_feed(60);
    let (handler, seen) = collector();
    feed.start(handler).await.unwrap();
    assert!(feed.is_running());

    // 半个周期内不应有任何 Tick
    sleep(Duration::from_millis(20)).await;
    assert!(seen.lock().unwrap().is_empty());

    sleep(Duration::from_millis(220)).await;
    let count = seen.lock().unwrap().len();
    assert!(count >= 2, "expected ticks after waiting, got {}", count);
    feed.stop().await;
}

#[tokio::test]
async fn test_ticker_fields_are_plausible() {
    let feed = make_feed(20);
    let (handler, seen) = collector();
    feed.start(handler).await.unwrap();
    sleep(Duration::from_millis(150)).await;
    feed.stop().await;

    let ticks = seen.lock().unwrap();
    assert!(!ticks.is_empty());
    for tick in ticks.iter() {
        assert!(TICK_ROSTER.contains(&tick.symbol.as_str()));
        assert!(tick.price > 0.0);
        assert!((100_000..10_100_000).contains(&tick.volume));
        assert!(tick.high.unwrap() >= tick.price);
        assert!(tick.low.unwrap() <= tick.price);
        assert!(tick.change_percent.is_finite());
    }
}

#[tokio::test]
async fn test_ticker_stop_halts_delivery() {
    let feed = make_feed(25);
    let (handler, seen) = collector();
    feed.start(handler).await.unwrap();
    sleep(Duration::from_millis(130)).await;
    feed.stop().await;
    assert!(!feed.is_running());

    // stop 等待任务退出，之后三个以上周期内不能再有回调
    let frozen = seen.lock().unwrap().len();
    assert!(frozen >= 1);
    sleep(Duration::from_millis(100)).await;
    assert_eq!(seen.lock().unwrap().len(), frozen);
}

#[tokio::test]
async fn test_ticker_start_is_idempotent() {
    let feed = make_feed(40);
    let (first, seen_first) = collector();
    let (second, seen_second) = collector();

    feed.start(first).await.unwrap();
    // 任务已在运行，这次调用连同新回调一起被忽略
    feed.start(second).await.unwrap();
    sleep(Duration::from_millis(180)).await;
    feed.stop().await;

    assert!(seen_first.lock().unwrap().len() >= 2);
    assert!(seen_second.lock().unwrap().is_empty());

    // stop 幂等
    feed.stop().await;
    assert!(!feed.is_running());
}

#[tokio::test]
async fn test_ticker_restarts_after_stop() {
    let feed = make_feed(30);
    let (handler, seen) = collector();

    feed.start(Arc::clone(&handler)).await.unwrap();
    sleep(Duration::from_millis(100)).await;
    feed.stop().await;
    let after_stop = seen.lock().unwrap().len();

    feed.start(handler).await.unwrap();
    assert!(feed.is_running());
    sleep(Duration::from_millis(100)).await;
    feed.stop().await;
    assert!(seen.lock().unwrap().len() > after_stop);
}
