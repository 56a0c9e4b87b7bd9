use crate::common::Interval;
use crate::market::entity::{Bar, EconomicEvent, MarketSnapshot, NewsItem, Tick};
use crate::market::error::MarketError;
use crate::ta::entity::IndicatorSet;
use async_trait::async_trait;
use std::sync::Arc;

/// # Summary
/// Tick 订阅回调别名。回调以同步方式被调用，必须自行保证短小不阻塞；
/// 回调的身份由 `Arc` 指针判定，同一个 `Arc` 克隆视为同一个订阅者。
pub type TickHandler = Arc<dyn Fn(&Tick) + Send + Sync>;

/// # Summary
/// 历史行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 返回的序列长度必须精确等于 `limit`，按时间升序排列且时间戳不重复。
/// - 实现不得返回部分结果；要么完整序列，要么错误。
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// # Summary
    /// 获取特定证券的历史 K 线序列。
    ///
    /// # Logic
    /// 1. 以当前时刻为锚点按周期向过去回推 `limit` 个时间戳。
    /// 2. 为每个时间戳产出一根满足价格不变量的 Bar。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `interval`: K 线周期。
    /// * `limit`: 请求的 Bar 数量。
    ///
    /// # Returns
    /// 成功返回恰好 `limit` 根 K 线。
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Bar>, MarketError>;
}

/// # Summary
/// 实时 Tick 推送源接口。整个服务共享一个推送源实例，
/// 由市场数据服务在首个订阅出现时惰性启动。
///
/// # Invariants
/// - `start` 幂等：任务存活期间的重复调用是空操作。
/// - `stop` 幂等，且返回后不得再有任何回调被触发。
#[async_trait]
pub trait TickFeed: Send + Sync {
    /// # Summary
    /// 启动周期性 Tick 生成任务。
    ///
    /// # Logic
    /// 1. 若已有存活任务则直接返回。
    /// 2. 否则挂载回调并按固定节拍生成 Tick。
    ///
    /// # Arguments
    /// * `on_tick`: 每个 Tick 的处理回调（通常是服务的分发闭包）。
    ///
    /// # Returns
    /// 成功返回 Ok。
    async fn start(&self, on_tick: TickHandler) -> Result<(), MarketError>;

    /// # Summary
    /// 停止 Tick 生成任务并等待其完全退出。
    ///
    /// # Logic
    /// 1. 取出并中止生成协程。
    /// 2. 等待协程句柄结算，保证不再有任何在途回调。
    async fn stop(&self);

    /// # Summary
    /// 查询生成任务是否存活。
    ///
    /// # Returns
    /// 任务存活返回 true。
    fn is_running(&self) -> bool;
}

/// # Summary
/// 市场数据服务契约，UI 会话面向的唯一入口。
///
/// # Invariants
/// - 相同 `(symbol, interval, limit)` 的历史请求在会话内命中同一份缓存序列。
/// - 回调只会收到其注册标的的 Tick；同一标的内按注册顺序分发。
#[async_trait]
pub trait MarketData: Send + Sync {
    /// # Summary
    /// 获取历史 K 线序列，优先命中缓存。
    ///
    /// # Logic
    /// 1. 按三元组构造缓存键并查询。
    /// 2. 未命中时调用历史数据提供者合成，写入缓存。
    /// 3. 返回共享的不可变序列。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `interval`: K 线周期。
    /// * `limit`: 请求的 Bar 数量。
    ///
    /// # Returns
    /// 成功返回共享序列引用。
    async fn fetch_historical_data(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Arc<Vec<Bar>>, MarketError>;

    /// # Summary
    /// 对一段序列计算全量技术指标集。
    ///
    /// # Logic
    /// 1. 委托指标库在隔离模式下逐个计算。
    /// 2. 失败的指标置空并记录日志，不影响其余指标。
    ///
    /// # Arguments
    /// * `bars`: 输入 K 线序列。
    ///
    /// # Returns
    /// 返回指标集；单项失败表现为对应字段为 None。
    fn calculate_technical_indicators(&self, bars: &[Bar]) -> IndicatorSet;

    /// # Summary
    /// 注册某标的的 Tick 回调，并在推送源未运行时惰性启动它。
    ///
    /// # Arguments
    /// * `symbol`: 订阅的证券代码。
    /// * `handler`: Tick 回调。
    ///
    /// # Returns
    /// 成功返回 Ok。
    async fn subscribe(&self, symbol: &str, handler: TickHandler) -> Result<(), MarketError>;

    /// # Summary
    /// 按 `Arc` 身份移除某标的下的回调。
    ///
    /// # Logic
    /// 1. 从该标的的回调列表中移除指针相等的项。
    /// 2. 列表清空时移除整个标的条目。
    /// 3. 注册表全空时停止共享推送源。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `handler`: 注册时使用的同一个 `Arc` 回调。
    async fn unsubscribe(&self, symbol: &str, handler: &TickHandler);

    /// # Summary
    /// 查询某标的当前是否存在订阅者。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    ///
    /// # Returns
    /// 存在至少一个回调返回 true。
    fn has_subscribers(&self, symbol: &str) -> bool;

    /// # Summary
    /// 无条件停止共享推送源，保留全部订阅注册。
    /// 之后任意一次 `subscribe` 会重新启动推送。
    async fn disconnect(&self);

    /// # Summary
    /// 聚合市场总览：对总览标的池逐个取最近两根日线推导涨跌。
    ///
    /// # Returns
    /// 成功返回快照列表；历史不足两根的标的被跳过。
    async fn fetch_market_overview(&self) -> Result<Vec<MarketSnapshot>, MarketError>;

    /// # Summary
    /// 返回内置市场资讯，可按关联标的过滤。
    ///
    /// # Arguments
    /// * `symbol`: 可选过滤标的。
    ///
    /// # Returns
    /// 资讯列表。
    fn fetch_news(&self, symbol: Option<&str>) -> Vec<NewsItem>;

    /// # Summary
    /// 返回内置财经日历事件。
    ///
    /// # Returns
    /// 事件列表，按公布时间升序。
    fn fetch_economic_calendar(&self) -> Vec<EconomicEvent>;
}
