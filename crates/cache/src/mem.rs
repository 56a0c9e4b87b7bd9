use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dashmap::DashMap;
use souba_core::cache::error::CacheError;
use souba_core::cache::port::SeriesCache;
use souba_core::market::entity::{Bar, SeriesKey};
use tracing::debug;

/// # Summary
/// 基于 DashMap 的内存序列缓存实现。
///
/// # Invariants
/// - 条目一旦写入不再变更，读取方共享同一个 `Arc`。
/// - 有界模式下 `entries` 与 `recency` 的键集合保持一致，队首为最旧条目。
/// - 无界模式（默认）下条目只进不出，与单次会话的生命周期一致。
pub struct MemSeriesCache {
    // 键到整条序列的并发映射
    entries: DashMap<SeriesKey, Arc<Vec<Bar>>>,
    // 最近使用顺序，队首最旧
    recency: Mutex<VecDeque<SeriesKey>>,
    // 条目上限，None 为不设限
    capacity: Option<usize>,
}

impl MemSeriesCache {
    /// # Summary
    /// 创建不设容量上限的缓存实例。
    ///
    /// # Returns
    /// * `Self` - 初始化的缓存实例。
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            recency: Mutex::new(VecDeque::new()),
            capacity: None,
        }
    }

    /// # Summary
    /// 创建带 LRU 容量上限的缓存实例。
    ///
    /// # Arguments
    /// * `capacity`: 最多保留的条目数，超出时从最久未使用的条目开始逐出。
    ///
    /// # Returns
    /// * `Self` - 初始化的缓存实例。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            recency: Mutex::new(VecDeque::new()),
            capacity: Some(capacity),
        }
    }

    /// 把键挪到使用顺序队尾
    fn touch(&self, key: &SeriesKey) {
        let mut order = self.recency.lock().unwrap_or_else(|e| e.into_inner());
        order.retain(|k| k != key);
        order.push_back(key.clone());
    }
}

impl Default for MemSeriesCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeriesCache for MemSeriesCache {
    /// # Summary
    /// 按键读取整条序列。
    ///
    /// # Logic
    /// 命中时克隆 `Arc` 返回并刷新使用顺序；未命中返回 None 而不是错误。
    ///
    /// # Arguments
    /// * `key`: 序列缓存键。
    ///
    /// # Returns
    /// * `Result<Option<Arc<Vec<Bar>>>, CacheError>` - 命中的共享序列或 None。
    async fn get(&self, key: &SeriesKey) -> Result<Option<Arc<Vec<Bar>>>, CacheError> {
        let hit = self.entries.get(key).map(|v| Arc::clone(v.value()));
        if hit.is_some() {
            self.touch(key);
        }
        Ok(hit)
    }

    /// # Summary
    /// 写入一条序列，同键覆盖。
    ///
    /// # Logic
    /// 1. 插入哈希表并把键挪到使用顺序队尾。
    /// 2. 有界模式下从队首逐出条目，直到总数回到上限以内。
    ///
    /// # Arguments
    /// * `key`: 序列缓存键。
    /// * `series`: 待缓存的共享序列。
    ///
    /// # Returns
    /// * `Result<(), CacheError>` - 内存实现始终返回 Ok。
    async fn put(&self, key: SeriesKey, series: Arc<Vec<Bar>>) -> Result<(), CacheError> {
        self.entries.insert(key.clone(), series);
        let mut order = self.recency.lock().unwrap_or_else(|e| e.into_inner());
        order.retain(|k| k != &key);
        order.push_back(key);

        if let Some(cap) = self.capacity {
            while self.entries.len() > cap {
                let Some(oldest) = order.pop_front() else {
                    break;
                };
                if self.entries.remove(&oldest).is_some() {
                    debug!("Series cache evicted {}", oldest);
                }
            }
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
