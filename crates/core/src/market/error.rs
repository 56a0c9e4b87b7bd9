use crate::cache::error::CacheError;
use thiserror::Error;

/// # Summary
/// 市场数据域错误枚举，覆盖推送源与缓存传播两类故障。
/// 历史合成本身不会失败，错误变体主要服务于未来接入真实行情源的实现。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum MarketError {
    // 推送源或数据提供者错误
    #[error("Feed error: {0}")]
    Feed(String),
    // 缓存层错误，自动从 CacheError 转换
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    // 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
