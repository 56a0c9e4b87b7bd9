use std::sync::Arc;
use std::time::Duration;

use souba_cache::mem::MemSeriesCache;
use souba_core::cache::port::SeriesCache;
use souba_core::common::Interval;
use souba_core::common::rand::RandomSource;
use souba_core::common::time::{SystemClock, TimeProvider};
use souba_core::config::AppConfig;
use souba_core::market::entity::Tick;
use souba_core::market::port::{HistoryProvider, MarketData, TickFeed, TickHandler};
use souba_feed::rng::ThreadRandom;
use souba_feed::synth::SyntheticHistory;
use souba_feed::ticker::TickGenerator;
use souba_market::service::MarketDataService;
use tracing::{info, warn};

/// # Summary
/// 加载应用配置：可选的 `souba.*` 配置文件叠加 `SOUBA_` 前缀环境变量。
/// 任一来源解析失败时退回内置默认值，保证进程总能启动。
///
/// # Returns
/// 返回合并后的配置。
fn load_config() -> AppConfig {
    let loaded = config::Config::builder()
        .add_source(config::File::with_name("souba").required(false))
        .add_source(config::Environment::with_prefix("SOUBA").separator("__"))
        .build()
        .and_then(|raw| raw.try_deserialize::<AppConfig>());

    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("Config load failed ({}), using defaults", e);
            AppConfig::default()
        }
    }
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 MarketDataService，
/// 随后演示一轮典型的行情会话。
///
/// # Logic
/// 1. 初始化全局日志与配置。
/// 2. 实例化基础设施层（随机源、时钟、缓存、合成数据源）。
/// 3. 构造领域服务层（MarketDataService）。
/// 4. 演示会话：取历史、算指标、聚合总览、订阅实时 Tick。
/// 5. 挂起等待外部信号，退出前停掉推送源。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志与配置
    tracing_subscriber::fmt::init();
    let config = load_config();
    info!("Souba Engine starting...");

    // 2. 实例化基础设施层
    let rand: Arc<dyn RandomSource> = Arc::new(ThreadRandom);
    let clock: Arc<dyn TimeProvider> = Arc::new(SystemClock);
    let cache: Arc<dyn SeriesCache> = match config.market.history_cache_entries {
        Some(capacity) => Arc::new(MemSeriesCache::with_capacity(capacity)),
        None => Arc::new(MemSeriesCache::new()),
    };
    let provider: Arc<dyn HistoryProvider> =
        Arc::new(SyntheticHistory::new(rand.clone(), clock.clone()));
    let feed: Arc<dyn TickFeed> = Arc::new(TickGenerator::new(
        Duration::from_millis(config.feed.tick_interval_ms),
        rand,
        clock.clone(),
    ));

    // 3. 构造领域服务层（注入 Core Trait 抽象）
    let service = MarketDataService::new(provider, cache, feed, clock);

    // 4. 演示会话：历史序列与全量指标
    let series = service
        .fetch_historical_data("AAPL", Interval::Day1, 100)
        .await?;
    info!("Fetched {} daily bars for AAPL", series.len());

    let indicators = service.calculate_technical_indicators(&series);
    if let Some(rsi) = indicators.rsi.as_ref().and_then(|v| v.last()) {
        info!("AAPL RSI(14) at {:.2}", rsi);
    }
    if let Some(band) = indicators.bollinger_bands.as_ref().and_then(|v| v.last()) {
        info!(
            "AAPL Bollinger(20, 2) at {:.2} / {:.2} / {:.2}",
            band.lower, band.middle, band.upper
        );
    }

    let overview = service.fetch_market_overview().await?;
    info!("Market overview covers {} symbols", overview.len());

    // 订阅两路实时 Tick，回调直接落日志
    for symbol in ["AAPL", "BTC-USD"] {
        let handler: TickHandler = Arc::new(|tick: &Tick| {
            info!(
                "Tick {} {:.2} ({:+.2}%)",
                tick.symbol, tick.price, tick.change_percent
            );
        });
        service.subscribe(symbol, handler).await?;
    }
    info!("Live feed running. Waiting for signals...");

    // 5. 挂起主线程，等待外部退出信号
    tokio::signal::ctrl_c().await?;
    service.disconnect().await;
    info!("Shutdown signal received. Exiting...");

    Ok(())
}
