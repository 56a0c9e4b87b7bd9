use souba_core::ta::entity::RiskReward;

/// # Summary
/// 仓位规模：单笔可承受亏损除以每股止损距离，向下取整到整数股。
///
/// # Arguments
/// * `risk_amount`: 单笔可承受的亏损金额。
/// * `current_price`: 当前价。
/// * `stop_loss`: 止损价。
///
/// # Returns
/// 可买入的股数；止损距离为零或输入算不出有限结果时为 0。
pub fn position_size(risk_amount: f64, current_price: f64, stop_loss: f64) -> f64 {
    let per_share = (current_price - stop_loss).abs();
    if per_share == 0.0 {
        return 0.0;
    }
    let size = (risk_amount / per_share).floor();
    if size.is_finite() {
        size.max(0.0)
    } else {
        0.0
    }
}

/// # Summary
/// 盈亏比：止损距离对止盈距离，比值恒为有限值。
///
/// # Arguments
/// * `current_price`: 当前价。
/// * `stop_loss`: 止损价。
/// * `take_profit`: 止盈价。
///
/// # Returns
/// 风险、收益与比值；风险为零时比值取 0 哨兵而不是无穷。
pub fn risk_reward(current_price: f64, stop_loss: f64, take_profit: f64) -> RiskReward {
    let risk = (current_price - stop_loss).abs();
    let reward = (take_profit - current_price).abs();
    let ratio = if risk == 0.0 { 0.0 } else { reward / risk };
    RiskReward {
        risk,
        reward,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_size_golden() {
        assert_eq!(position_size(1000.0, 100.0, 95.0), 200.0);
    }

    #[test]
    fn test_position_size_zero_distance() {
        assert_eq!(position_size(1000.0, 100.0, 100.0), 0.0);
    }

    #[test]
    fn test_position_size_rounds_down() {
        // 1000 / 3 股价差 = 333.33...，取 333 股
        assert_eq!(position_size(1000.0, 100.0, 97.0), 333.0);
    }

    #[test]
    fn test_position_size_never_negative_or_non_finite() {
        assert_eq!(position_size(-500.0, 100.0, 95.0), 0.0);
        assert_eq!(position_size(f64::NAN, 100.0, 95.0), 0.0);
        assert_eq!(position_size(f64::INFINITY, 100.0, 95.0), 0.0);
    }

    #[test]
    fn test_risk_reward_basic() {
        let rr = risk_reward(100.0, 95.0, 110.0);
        assert_eq!(rr.risk, 5.0);
        assert_eq!(rr.reward, 10.0);
        assert_eq!(rr.ratio, 2.0);
    }

    #[test]
    fn test_risk_reward_zero_risk_sentinel() {
        let rr = risk_reward(100.0, 100.0, 110.0);
        assert_eq!(rr.risk, 0.0);
        assert_eq!(rr.reward, 10.0);
        assert_eq!(rr.ratio, 0.0);
    }
}
