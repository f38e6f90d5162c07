use serde::{Deserialize, Serialize};

/// 체적 유량 단위. 시뮬레이터 기준은 L/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowUnit {
    LiterPerSecond,
    LiterPerMinute,
    CubicMeterPerSecond,
    CubicMeterPerHour,
    /// US gallon per minute
    Gpm,
}

impl FlowUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            FlowUnit::LiterPerSecond => "L/s",
            FlowUnit::LiterPerMinute => "L/min",
            FlowUnit::CubicMeterPerSecond => "m3/s",
            FlowUnit::CubicMeterPerHour => "m3/h",
            FlowUnit::Gpm => "gpm",
        }
    }
}

fn to_l_s(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::LiterPerSecond => value,
        FlowUnit::LiterPerMinute => value / 60.0,
        FlowUnit::CubicMeterPerSecond => value * 1000.0,
        FlowUnit::CubicMeterPerHour => value / 3.6,
        FlowUnit::Gpm => value * 0.0630902,
    }
}

fn from_l_s(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::LiterPerSecond => value,
        FlowUnit::LiterPerMinute => value * 60.0,
        FlowUnit::CubicMeterPerSecond => value / 1000.0,
        FlowUnit::CubicMeterPerHour => value * 3.6,
        FlowUnit::Gpm => value / 0.0630902,
    }
}

/// 유량을 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    from_l_s(to_l_s(value, from), to)
}
