use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;
use souba_core::cache::port::SeriesCache;
use souba_core::common::Interval;
use souba_core::common::symbols::{self, OVERVIEW_ROSTER};
use souba_core::common::time::TimeProvider;
use souba_core::market::entity::{
    Bar, EconomicEvent, Impact, MarketSnapshot, NewsItem, SeriesKey, Tick,
};
use souba_core::market::error::MarketError;
use souba_core::market::port::{HistoryProvider, MarketData, TickFeed, TickHandler};
use souba_core::ta::entity::IndicatorSet;
use tracing::{debug, info, warn};

/// # Summary
/// MarketData 端口的具体实现：历史序列缓存编排加 Tick 扇出。
///
/// # Invariants
/// - 同一 `(symbol, interval, limit)` 在会话内命中同一份 `Arc` 序列。
/// - 注册表条目的回调列表保持注册顺序；最后一个回调移除时条目整体消失。
/// - 共享推送源在首个订阅出现时启动，注册表全空或显式断开时停止。
pub struct MarketDataService {
    // 历史数据提供者端口
    provider: Arc<dyn HistoryProvider>,
    // 序列缓存端口
    cache: Arc<dyn SeriesCache>,
    // 共享 Tick 推送源端口
    feed: Arc<dyn TickFeed>,
    // 注入的时钟
    clock: Arc<dyn TimeProvider>,
    // 标的到回调列表的注册表
    subscribers: Arc<DashMap<String, Vec<TickHandler>>>,
}

impl MarketDataService {
    /// # Summary
    /// 以四个端口装配市场数据服务。
    ///
    /// # Arguments
    /// * `provider`: 历史数据提供者。
    /// * `cache`: 序列缓存。
    /// * `feed`: 共享 Tick 推送源。
    /// * `clock`: 时钟。
    ///
    /// # Returns
    /// 返回装配完成的服务实例。
    pub fn new(
        provider: Arc<dyn HistoryProvider>,
        cache: Arc<dyn SeriesCache>,
        feed: Arc<dyn TickFeed>,
        clock: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            provider,
            cache,
            feed,
            clock,
            subscribers: Arc::new(DashMap::new()),
        }
    }
}

/// # Summary
/// 把一条 Tick 扇出给其标的的全部订阅者。
///
/// # Logic
/// 1. 先把回调列表从注册表里克隆出来，回调绝不在持锁状态下执行。
/// 2. 无订阅者的 Tick 静默丢弃。
/// 3. 每个回调在 `catch_unwind` 隔离下按注册顺序同步调用，
///    单个订阅者崩溃只记日志，不阻断后续分发。
///
/// # Arguments
/// * `registry`: 标的到回调列表的注册表。
/// * `tick`: 待分发的 Tick。
fn dispatch(registry: &DashMap<String, Vec<TickHandler>>, tick: &Tick) {
    let handlers = match registry.get(&tick.symbol) {
        Some(entry) => entry.value().clone(),
        None => return,
    };
    for handler in handlers {
        if panic::catch_unwind(AssertUnwindSafe(|| handler(tick))).is_err() {
            warn!("Subscriber for {} panicked during dispatch", tick.symbol);
        }
    }
}

#[async_trait]
impl MarketData for MarketDataService {
    /// # Summary
    /// 获取历史序列，优先命中缓存，未命中时走提供者合成并回填。
    ///
    /// # Logic
    /// 1. 按三元组构造缓存键查询，命中直接返回共享序列。
    /// 2. 未命中时调用提供者取完整序列，包成 `Arc` 写入缓存后返回。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `interval`: K 线周期。
    /// * `limit`: 请求的 Bar 数量。
    ///
    /// # Returns
    /// 成功返回共享的不可变序列。
    async fn fetch_historical_data(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Arc<Vec<Bar>>, MarketError> {
        let key = SeriesKey::new(symbol, interval, limit);
        if let Some(hit) = self.cache.get(&key).await? {
            return Ok(hit);
        }

        debug!("Series cache miss for {}", key);
        let bars = self.provider.fetch_bars(symbol, interval, limit).await?;
        let series = Arc::new(bars);
        self.cache.put(key, Arc::clone(&series)).await?;
        Ok(series)
    }

    fn calculate_technical_indicators(&self, bars: &[Bar]) -> IndicatorSet {
        souba_ta::battery::calculate_technical_indicators(bars)
    }

    /// # Summary
    /// 注册回调并在推送源未运行时惰性启动它。
    ///
    /// # Logic
    /// 1. 回调按注册顺序追加到该标的的列表尾部。
    /// 2. 推送源未运行时以分发闭包启动；重复启动由推送源自身幂等化。
    ///
    /// # Arguments
    /// * `symbol`: 订阅的证券代码。
    /// * `handler`: Tick 回调。
    ///
    /// # Returns
    /// 成功返回 Ok。
    async fn subscribe(&self, symbol: &str, handler: TickHandler) -> Result<(), MarketError> {
        self.subscribers
            .entry(symbol.to_string())
            .or_default()
            .push(handler);
        debug!("Subscriber added for {}", symbol);

        if !self.feed.is_running() {
            let registry = Arc::clone(&self.subscribers);
            let on_tick: TickHandler = Arc::new(move |tick: &Tick| dispatch(&registry, tick));
            self.feed.start(on_tick).await?;
        }
        Ok(())
    }

    /// # Summary
    /// 按 `Arc` 身份移除回调，清空的条目整体删除，注册表全空时停掉推送源。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `handler`: 注册时使用的同一个 `Arc` 回调。
    async fn unsubscribe(&self, symbol: &str, handler: &TickHandler) {
        let emptied = match self.subscribers.get_mut(symbol) {
            Some(mut entry) => {
                entry.value_mut().retain(|h| !Arc::ptr_eq(h, handler));
                entry.value().is_empty()
            }
            None => return,
        };
        if emptied {
            // 持锁判空后条目可能又被并发订阅填充，删除前再验证一次
            self.subscribers
                .remove_if(symbol, |_, handlers| handlers.is_empty());
            debug!("Last subscriber removed for {}", symbol);
        }

        if self.subscribers.is_empty() && self.feed.is_running() {
            info!("Subscriber registry empty, stopping tick feed");
            self.feed.stop().await;
        }
    }

    fn has_subscribers(&self, symbol: &str) -> bool {
        self.subscribers
            .get(symbol)
            .is_some_and(|entry| !entry.value().is_empty())
    }

    /// # Summary
    /// 无条件停止推送源；订阅注册全部保留，之后任意订阅会重新启动推送。
    async fn disconnect(&self) {
        info!("Market data service disconnected");
        self.feed.stop().await;
    }

    /// # Summary
    /// 聚合市场总览：对总览标的池逐个取最近两根日线推导涨跌。
    ///
    /// # Logic
    /// 1. 每个标的走缓存路径取 `(symbol, Day1, 2)`。
    /// 2. 用最后两根收盘价算涨跌额与涨跌幅。
    /// 3. 不足两根的标的跳过，不进入结果。
    ///
    /// # Returns
    /// 成功返回快照列表，顺序与标的池一致。
    async fn fetch_market_overview(&self) -> Result<Vec<MarketSnapshot>, MarketError> {
        let mut overview = Vec::with_capacity(OVERVIEW_ROSTER.len());
        for symbol in OVERVIEW_ROSTER {
            let series = self
                .fetch_historical_data(symbol, Interval::Day1, 2)
                .await?;
            let [.., prev, last] = series.as_slice() else {
                continue;
            };

            let change = last.close - prev.close;
            overview.push(MarketSnapshot {
                symbol: symbol.to_string(),
                name: symbols::display_name(symbol).to_string(),
                price: last.close,
                change,
                change_percent: change / prev.close * 100.0,
                volume: last.volume,
            });
        }
        Ok(overview)
    }

    /// # Summary
    /// 返回内置市场资讯，可按关联标的过滤。
    ///
    /// # Arguments
    /// * `symbol`: 可选过滤标的，None 返回全部。
    ///
    /// # Returns
    /// 按发布时间从新到旧排列的资讯列表。
    fn fetch_news(&self, symbol: Option<&str>) -> Vec<NewsItem> {
        let now = self.clock.now();
        let news = vec![
            NewsItem {
                id: 1,
                title: "Federal Reserve Announces Rate Decision".to_string(),
                summary: "The Federal Reserve maintained interest rates at current levels, \
                          citing inflation concerns and economic stability."
                    .to_string(),
                source: "Reuters".to_string(),
                published_at: now - Duration::hours(2),
                related_symbols: vec![
                    "SPY".to_string(),
                    "AAPL".to_string(),
                    "MSFT".to_string(),
                ],
                impact: Impact::High,
            },
            NewsItem {
                id: 2,
                title: "Tech Stocks Rally on AI Breakthrough".to_string(),
                summary: "Major technology companies see significant gains following \
                          announcements of AI advancements."
                    .to_string(),
                source: "Bloomberg".to_string(),
                published_at: now - Duration::hours(4),
                related_symbols: vec![
                    "AAPL".to_string(),
                    "GOOGL".to_string(),
                    "MSFT".to_string(),
                ],
                impact: Impact::Medium,
            },
            NewsItem {
                id: 3,
                title: "Cryptocurrency Market Volatility Continues".to_string(),
                summary: "Bitcoin and Ethereum experience significant price swings amid \
                          regulatory uncertainty."
                    .to_string(),
                source: "CoinDesk".to_string(),
                published_at: now - Duration::hours(6),
                related_symbols: vec!["BTC-USD".to_string(), "ETH-USD".to_string()],
                impact: Impact::High,
            },
        ];

        match symbol {
            Some(wanted) => news
                .into_iter()
                .filter(|item| item.related_symbols.iter().any(|s| s == wanted))
                .collect(),
            None => news,
        }
    }

    /// # Summary
    /// 返回内置财经日历，按公布时间升序。
    ///
    /// # Returns
    /// 三条固定事件。
    fn fetch_economic_calendar(&self) -> Vec<EconomicEvent> {
        let now = self.clock.now();
        vec![
            EconomicEvent {
                id: 1,
                title: "Non-Farm Payrolls".to_string(),
                country: "US".to_string(),
                time: now + Duration::hours(24),
                impact: Impact::High,
                forecast: "200K".to_string(),
                previous: "185K".to_string(),
            },
            EconomicEvent {
                id: 2,
                title: "CPI Inflation Rate".to_string(),
                country: "US".to_string(),
                time: now + Duration::hours(48),
                impact: Impact::High,
                forecast: "3.2%".to_string(),
                previous: "3.1%".to_string(),
            },
            EconomicEvent {
                id: 3,
                title: "GDP Growth Rate".to_string(),
                country: "EU".to_string(),
                time: now + Duration::hours(72),
                impact: Impact::Medium,
                forecast: "0.8%".to_string(),
                previous: "0.6%".to_string(),
            },
        ]
    }
}
