use thiserror::Error;

/// # Summary
/// 缓存域错误枚举。内存实现不会产生错误，
/// 变体为未来替换持久化介质的实现保留。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 缓存未命中不是错误，以 `Ok(None)` 表达。
#[derive(Error, Debug)]
pub enum CacheError {
    // 底层存储引擎故障
    #[error("Storage error: {0}")]
    Storage(String),
    // 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
