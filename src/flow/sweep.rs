use super::history::HeadLossHistory;
use super::params::SimulationParameters;
use super::physics::compute;

/// 유량을 `from`에서 `to`까지 `steps`개 지점으로 나눠 계산하고 이력에 쌓는다.
///
/// 이력 용량을 넘으면 앞쪽(먼저 계산한) 지점이 밀려난다.
pub fn sweep_flow_rates(
    base: &SimulationParameters,
    from_l_s: f64,
    to_l_s: f64,
    steps: usize,
) -> HeadLossHistory {
    let mut history = HeadLossHistory::new();
    if steps == 0 {
        return history;
    }
    let span = to_l_s - from_l_s;
    let denom = steps.saturating_sub(1).max(1) as f64;
    for i in 0..steps {
        let q = from_l_s + span * i as f64 / denom;
        let params = SimulationParameters {
            flow_rate_l_s: q.max(0.0),
            ..*base
        };
        let result = compute(&params);
        if result.is_finite() {
            history.record(result.velocity_m_s, result.head_loss_m);
        }
    }
    history
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_flow_point_is_skipped() {
        let h = sweep_flow_rates(&SimulationParameters::default(), 0.0, 1.0, 5);
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn reversed_range_is_still_sorted() {
        let h = sweep_flow_rates(&SimulationParameters::default(), 2.0, 0.5, 4);
        let sorted = h.sorted();
        assert!(sorted.windows(2).all(|w| w[0].velocity_m_s <= w[1].velocity_m_s));
        assert!(sorted.windows(2).all(|w| w[0].head_loss_m <= w[1].head_loss_m));
    }
}
