use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use souba_core::common::rand::RandomSource;

/// # Summary
/// 系统熵随机源，每次调用都走线程本地生成器。
///
/// # Invariants
/// - 无内部状态，跨线程调用彼此独立。
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        rand::thread_rng().gen_range(low..high)
    }

    fn uniform_u64(&self, low: u64, high: u64) -> u64 {
        rand::thread_rng().gen_range(low..high)
    }

    fn pick(&self, n: usize) -> usize {
        rand::thread_rng().gen_range(0..n)
    }
}

/// # Summary
/// 固定种子随机源，同一种子产生同一序列。
///
/// # Invariants
/// - 生成器由互斥锁保护，调用顺序决定输出顺序。
pub struct SeededRandom {
    // 带锁的确定性生成器
    inner: Mutex<StdRng>,
}

impl SeededRandom {
    /// # Summary
    /// 以给定种子创建确定性随机源。
    ///
    /// # Arguments
    /// * `seed`: 种子值。
    ///
    /// # Returns
    /// * `Self` - 初始化的随机源。
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gen_range(low..high)
    }

    fn uniform_u64(&self, low: u64, high: u64) -> u64 {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gen_range(low..high)
    }

    fn pick(&self, n: usize) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .gen_range(0..n)
    }
}
