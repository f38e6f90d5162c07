//! 원형 배관 유동의 닫힌 형식 계산(유속, 레이놀즈수, 마찰계수, Darcy-Weisbach 손실수두).

use super::params::SimulationParameters;

/// 중력가속도 [m/s2]
pub const GRAVITY: f64 = 9.81;
/// 층류/난류 경계 레이놀즈수. 이 값 미만이면 층류로 본다.
pub const LAMINAR_LIMIT: f64 = 2300.0;

/// 한 번의 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationResult {
    /// 평균 유속 [m/s]
    pub velocity_m_s: f64,
    /// 레이놀즈수
    pub reynolds: f64,
    /// Darcy 마찰계수
    pub friction_factor: f64,
    /// 손실수두 [m]
    pub head_loss_m: f64,
}

impl SimulationResult {
    /// 유속과 손실수두가 모두 유한한지 확인한다.
    pub fn is_finite(&self) -> bool {
        self.velocity_m_s.is_finite() && self.head_loss_m.is_finite()
    }

    pub fn is_laminar(&self) -> bool {
        self.reynolds < LAMINAR_LIMIT
    }
}

/// 파라미터로부터 유동 상태를 계산한다. 순수 함수이며 패닉하지 않는다.
pub fn compute(params: &SimulationParameters) -> SimulationResult {
    let d = params.diameter_m;
    let area = std::f64::consts::PI * (d / 2.0).powi(2);
    let flow_m3_s = params.flow_rate_l_s / 1000.0;
    let velocity = flow_m3_s / area;

    let fluid = params.fluid.properties();
    let reynolds = fluid.density_kg_m3 * velocity * d / fluid.viscosity_pa_s;

    // 유량 0은 손실 0으로 취급한다 (64/0 방지).
    if velocity == 0.0 || reynolds == 0.0 {
        return SimulationResult {
            velocity_m_s: velocity,
            reynolds,
            friction_factor: 0.0,
            head_loss_m: 0.0,
        };
    }

    let friction_factor = friction_factor(reynolds);
    let head_loss = friction_factor * (params.length_m / d) * velocity * velocity / (2.0 * GRAVITY);

    SimulationResult {
        velocity_m_s: velocity,
        reynolds,
        friction_factor,
        head_loss_m: head_loss,
    }
}

/// 층류는 64/Re, 난류는 Blasius 상관식 0.316·Re^-0.25.
pub fn friction_factor(reynolds: f64) -> f64 {
    if reynolds <= 0.0 {
        0.0
    } else if reynolds < LAMINAR_LIMIT {
        64.0 / reynolds
    } else {
        0.316 * reynolds.powf(-0.25)
    }
}

/// 유입측 계기 압력 [Pa]. 유출측은 대기압(0)으로 본다.
pub fn inlet_pressure_pa(params: &SimulationParameters, result: &SimulationResult) -> f64 {
    params.fluid.density() * GRAVITY * result.head_loss_m
}

/// 압력 게이지 색상 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeLevel {
    Success,
    Warning,
    Danger,
}

impl GaugeLevel {
    pub fn classify(pressure_pa: f64) -> Self {
        let p = if pressure_pa.is_nan() { 0.0 } else { pressure_pa.round() };
        if p > 1000.0 {
            GaugeLevel::Danger
        } else if p > 500.0 {
            GaugeLevel::Warning
        } else {
            GaugeLevel::Success
        }
    }
}

/// 압력계 바늘 영역 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterBand {
    Low,
    Medium,
    High,
}

impl MeterBand {
    pub fn classify(pressure_pa: f64) -> Self {
        if pressure_pa > 7500.0 {
            MeterBand::High
        } else if pressure_pa > 3750.0 {
            MeterBand::Medium
        } else {
            MeterBand::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_uses_turbulent_branch() {
        let turbulent = 0.316 * LAMINAR_LIMIT.powf(-0.25);
        assert_eq!(friction_factor(LAMINAR_LIMIT), turbulent);
        let below = 2299.999;
        assert_eq!(friction_factor(below), 64.0 / below);
    }

    #[test]
    fn zero_reynolds_has_no_friction() {
        assert_eq!(friction_factor(0.0), 0.0);
    }

    #[test]
    fn gauge_levels() {
        assert_eq!(GaugeLevel::classify(500.4), GaugeLevel::Success);
        assert_eq!(GaugeLevel::classify(700.0), GaugeLevel::Warning);
        assert_eq!(GaugeLevel::classify(1000.6), GaugeLevel::Danger);
        assert_eq!(GaugeLevel::classify(f64::NAN), GaugeLevel::Success);
    }

    #[test]
    fn meter_bands() {
        assert_eq!(MeterBand::classify(100.0), MeterBand::Low);
        assert_eq!(MeterBand::classify(3750.1), MeterBand::Medium);
        assert_eq!(MeterBand::classify(9000.0), MeterBand::High);
    }
}
