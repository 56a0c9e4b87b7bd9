use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use souba_core::common::rand::RandomSource;
use souba_core::common::symbols::{self, TICK_ROSTER};
use souba_core::common::time::TimeProvider;
use souba_core::market::entity::Tick;
use souba_core::market::error::MarketError;
use souba_core::market::port::{TickFeed, TickHandler};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// # Summary
/// 周期性 Tick 生成器：固定节奏随机挑选一个轮播符号并合成一条 Tick。
///
/// # Invariants
/// - 最多存在一个活动任务；重复 `start` 在任务存活时为空操作。
/// - `stop` 返回后不再有任何回调触发。
/// - 取消通过任务句柄而不是标志位完成。
pub struct TickGenerator {
    // 两次 Tick 之间的间隔
    cadence: Duration,
    // 注入的随机源
    rand: Arc<dyn RandomSource>,
    // 注入的时钟
    clock: Arc<dyn TimeProvider>,
    // 活动任务句柄，None 表示未运行
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TickGenerator {
    /// # Summary
    /// 创建 Tick 生成器。
    ///
    /// # Arguments
    /// * `cadence`: 两次 Tick 的固定间隔。
    /// * `rand`: 随机源端口。
    /// * `clock`: 时钟端口。
    ///
    /// # Returns
    /// 返回未启动的 TickGenerator。
    pub fn new(cadence: Duration, rand: Arc<dyn RandomSource>, clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            cadence,
            rand,
            clock,
            task: Mutex::new(None),
        }
    }
}

/// 价格统一保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// # Summary
/// 合成一条 Tick：加密符号波动率 0.02，其余 0.005。
///
/// # Logic
/// 1. 从轮播表均匀挑一个符号并取其基准价。
/// 2. 涨跌额为 `uniform(-1, 1) * volatility * base`，价格钳位在 0.01 以上。
/// 3. 瞬时高低在价格上下各浮动至多 1%，开盘沿涨跌方向偏移至多半个涨跌额。
///
/// # Arguments
/// * `rand`: 随机源。
/// * `clock`: 时钟。
///
/// # Returns
/// 一条字段完整的 Tick。
fn synth_tick(rand: &dyn RandomSource, clock: &dyn TimeProvider) -> Tick {
    let symbol = TICK_ROSTER[rand.pick(TICK_ROSTER.len())];
    let base = symbols::base_price(symbol);
    let volatility = if symbols::is_crypto(symbol) { 0.02 } else { 0.005 };

    let change = rand.uniform(-1.0, 1.0) * volatility * base;
    let price = (base + change).max(0.01);

    Tick {
        symbol: symbol.to_string(),
        price: round2(price),
        change: round2(change),
        change_percent: round2(change / base * 100.0),
        volume: rand.uniform_u64(100_000, 10_100_000),
        time: clock.now(),
        high: Some(round2(price * (1.0 + rand.uniform(0.0, 0.01)))),
        low: Some(round2(price * (1.0 - rand.uniform(0.0, 0.01)))),
        open: Some(round2(price + rand.uniform(-0.5, 0.5) * change)),
    }
}

#[async_trait]
impl TickFeed for TickGenerator {
    /// # Summary
    /// 启动周期任务；任务存活时重复调用为空操作。
    ///
    /// # Logic
    /// 1. 检查槽位里是否已有未结束的任务，有则直接返回。
    /// 2. 启动 interval 驱动的任务并吞掉 interval 的首次立即触发，
    ///    让第一条 Tick 在一个完整周期之后才出现。
    /// 3. 把句柄存入槽位供 `stop` 取消。
    ///
    /// # Arguments
    /// * `on_tick`: 每条 Tick 的回调。
    ///
    /// # Returns
    /// * `Result<(), MarketError>` - 合成任务的启动不会失败。
    async fn start(&self, on_tick: TickHandler) -> Result<(), MarketError> {
        let mut slot = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if slot.as_ref().is_some_and(|h| !h.is_finished()) {
            return Ok(());
        }

        let rand = Arc::clone(&self.rand);
        let clock = Arc::clone(&self.clock);
        let cadence = self.cadence;
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(cadence);
            // interval 的第一次 tick 立即完成，先消费掉
            timer.tick().await;
            loop {
                timer.tick().await;
                let tick = synth_tick(rand.as_ref(), clock.as_ref());
                on_tick(&tick);
            }
        });
        *slot = Some(handle);
        info!("Tick feed started, cadence {:?}", self.cadence);
        Ok(())
    }

    /// # Summary
    /// 停止周期任务并等待其真正退出。
    ///
    /// # Logic
    /// 1. 取出句柄并 abort。
    /// 2. 等待 join 完成，保证返回后不再有回调触发。
    /// 3. 未运行时调用为空操作。
    ///
    /// # Returns
    /// 无。
    async fn stop(&self) {
        let handle = {
            let mut slot = self.task.lock().unwrap_or_else(|e| e.into_inner());
            slot.take()
        };
        if let Some(handle) = handle {
            handle.abort();
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Tick task ended abnormally: {}", e);
                }
            }
            info!("Tick feed stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}
