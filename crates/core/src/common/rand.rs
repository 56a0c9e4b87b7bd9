/// # Summary
/// 随机源接口，用于劫持和隔离系统随机数生成器。
/// 序列合成与 Tick 生成的全部随机性必须经由此接口产生，
/// 以便测试注入确定性种子获得可复现的输出。
///
/// # Invariants
/// - 实现必须是线程安全的 (`Send + Sync`)。
/// - `uniform` 与 `uniform_u64` 的输出落在 `[low, high)` 半开区间内。
pub trait RandomSource: Send + Sync {
    /// # Summary
    /// 产生 `[low, high)` 区间内均匀分布的浮点数。
    ///
    /// # Arguments
    /// * `low`: 下界（包含）。
    /// * `high`: 上界（不包含）。
    ///
    /// # Returns
    /// 区间内的随机浮点数。
    fn uniform(&self, low: f64, high: f64) -> f64;

    /// # Summary
    /// 产生 `[low, high)` 区间内均匀分布的整数，用于成交量等计数字段。
    ///
    /// # Arguments
    /// * `low`: 下界（包含）。
    /// * `high`: 上界（不包含）。
    ///
    /// # Returns
    /// 区间内的随机整数。
    fn uniform_u64(&self, low: u64, high: u64) -> u64;

    /// # Summary
    /// 从 `n` 个元素中等概率挑选一个下标。
    ///
    /// # Arguments
    /// * `n`: 候选数量，调用方保证大于 0。
    ///
    /// # Returns
    /// `[0, n)` 区间内的下标。
    fn pick(&self, n: usize) -> usize;
}
