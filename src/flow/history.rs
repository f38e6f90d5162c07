use std::collections::VecDeque;

/// 차트에 남기는 최대 샘플 수
pub const HISTORY_CAPACITY: usize = 50;

/// (유속, 손실수두) 한 점.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadLossSample {
    pub velocity_m_s: f64,
    pub head_loss_m: f64,
}

/// 손실수두-유속 곡선용 이력. 도착 순서로 보관하고 가장 오래된 것부터 버린다.
#[derive(Debug, Clone, Default)]
pub struct HeadLossHistory {
    samples: VecDeque<HeadLossSample>,
}

impl HeadLossHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// 유효한 샘플만 추가한다. 추가되었으면 true.
    pub fn record(&mut self, velocity_m_s: f64, head_loss_m: f64) -> bool {
        if !(velocity_m_s > 0.0 && velocity_m_s.is_finite() && head_loss_m.is_finite()) {
            return false;
        }
        self.samples.push_back(HeadLossSample {
            velocity_m_s,
            head_loss_m,
        });
        while self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        true
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 유속 오름차순으로 정렬한 사본. 차트는 이 순서로 그린다.
    pub fn sorted(&self) -> Vec<HeadLossSample> {
        let mut out: Vec<HeadLossSample> = self.samples.iter().copied().collect();
        out.sort_by(|a, b| a.velocity_m_s.total_cmp(&b.velocity_m_s));
        out
    }

    /// 차트 입력: 소수 둘째 자리 유속 라벨과 손실수두 값.
    pub fn chart_series(&self) -> (Vec<String>, Vec<f64>) {
        self.sorted()
            .into_iter()
            .map(|s| (format!("{:.2}", s.velocity_m_s), s.head_loss_m))
            .unzip()
    }
}

/// 정렬된 이력을 받아 그리는 쪽.
pub trait ChartSink {
    fn update(&mut self, labels: Vec<String>, values: Vec<f64>);
}

/// 마지막으로 받은 차트 데이터를 보관한다. GUI는 이것을 egui_plot으로 그린다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// 지금까지 받은 갱신 횟수
    pub updates: usize,
}

impl ChartSeries {
    /// 라벨을 다시 숫자로 읽어 (x, y) 점 목록을 만든다.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.labels
            .iter()
            .zip(&self.values)
            .filter_map(|(x, y)| x.parse::<f64>().ok().map(|x| [x, *y]))
            .collect()
    }
}

impl ChartSink for ChartSeries {
    fn update(&mut self, labels: Vec<String>, values: Vec<f64>) {
        self.labels = labels;
        self.values = values;
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        let mut h = HeadLossHistory::new();
        assert!(!h.record(0.0, 1.0));
        assert!(!h.record(-1.0, 1.0));
        assert!(!h.record(f64::NAN, 1.0));
        assert!(!h.record(1.0, f64::INFINITY));
        assert!(h.is_empty());
    }

    #[test]
    fn chart_series_is_sorted_with_two_decimals() {
        let mut h = HeadLossHistory::new();
        h.record(1.234, 0.3);
        h.record(0.5, 0.1);
        let (labels, values) = h.chart_series();
        assert_eq!(labels, vec!["0.50".to_string(), "1.23".to_string()]);
        assert_eq!(values, vec![0.1, 0.3]);
    }

    #[test]
    fn chart_points_parse_labels() {
        let mut series = ChartSeries::default();
        series.update(vec!["0.50".into(), "1.00".into()], vec![0.1, 0.4]);
        assert_eq!(series.points(), vec![[0.5, 0.1], [1.0, 0.4]]);
        assert_eq!(series.updates, 1);
    }
}
