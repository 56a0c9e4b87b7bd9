use thiserror::Error;

/// # Summary
/// 指标计算域错误枚举。全量指标集内部逐项捕获此错误并降级为空字段，
/// 不会向服务调用方抛出。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 输入长度不足预热窗口不是错误，以空序列表达。
#[derive(Error, Debug)]
pub enum TaError {
    // 周期参数为零
    #[error("Invalid period: {0}")]
    InvalidPeriod(usize),
    // 其他非法参数（如布林带标准差倍数非正）
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    // 输入序列含非有限值
    #[error("Non-finite input at index {0}")]
    NonFiniteInput(usize),
}
