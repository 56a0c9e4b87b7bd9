use crate::cache::error::CacheError;
use crate::market::entity::{Bar, SeriesKey};
use async_trait::async_trait;
use std::sync::Arc;

/// # Summary
/// 历史序列缓存接口 (Port)。以 `(symbol, interval, limit)` 三元组为键，
/// 值是共享的不可变序列，命中时返回同一个 `Arc` 实例。
///
/// # Invariants
/// - 条目一旦写入不可变；覆盖写等价于替换整个条目。
/// - 未命中以 `Ok(None)` 表达，不是错误。
/// - 实现可以设置容量上限；淘汰只作用于整个条目。
#[async_trait]
pub trait SeriesCache: Send + Sync {
    /// # Summary
    /// 查询缓存序列。
    ///
    /// # Logic
    /// 1. 按键检索条目并刷新其访问新鲜度（若实现有容量上限）。
    ///
    /// # Arguments
    /// * `key`: 序列缓存键。
    ///
    /// # Returns
    /// 命中返回 `Some(Arc)`，未命中返回 `None`。
    async fn get(&self, key: &SeriesKey) -> Result<Option<Arc<Vec<Bar>>>, CacheError>;

    /// # Summary
    /// 写入缓存序列。
    ///
    /// # Logic
    /// 1. 写入条目；若实现有容量上限且已满，先淘汰最久未使用的条目。
    ///
    /// # Arguments
    /// * `key`: 序列缓存键。
    /// * `series`: 共享的不可变序列。
    ///
    /// # Returns
    /// 成功返回 Ok。
    async fn put(&self, key: SeriesKey, series: Arc<Vec<Bar>>) -> Result<(), CacheError>;

    /// # Summary
    /// 当前缓存条目数量。
    ///
    /// # Returns
    /// 条目数。
    fn len(&self) -> usize;

    /// # Summary
    /// 缓存是否为空。
    ///
    /// # Returns
    /// 无任何条目时返回 true。
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
