use crate::flow::physics::GRAVITY;

/// 실험 장치의 고정 정수두 [m]
pub const STATIC_LIFT_M: f64 = 10.0;

/// 펌프 성능 계산 오류.
#[derive(Debug)]
pub enum PumpCalcError {
    /// 입력값이 잘못된 경우
    InvalidInput(&'static str),
}

impl std::fmt::Display for PumpCalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PumpCalcError::InvalidInput(msg) => write!(f, "입력 오류: {msg}"),
        }
    }
}

impl std::error::Error for PumpCalcError {}

/// 원심펌프 시험 입력.
#[derive(Debug, Clone)]
pub struct PumpInput {
    /// 전동기 전압 [V]
    pub voltage_v: f64,
    /// 전동기 전류 [A]
    pub current_a: f64,
    /// 측정 시간 동안 모은 수량 [L]
    pub volume_l: f64,
    /// 측정 시간 [s]
    pub duration_s: f64,
    /// 유체 밀도 [kg/m3]
    pub density_kg_m3: f64,
    /// 배관계 손실수두 [m]
    pub head_loss_m: f64,
}

/// 펌프 성능 결과.
#[derive(Debug, Clone)]
pub struct PumpResult {
    /// 토출량 [L/s]
    pub discharge_l_s: f64,
    /// 전양정 [m]
    pub total_head_m: f64,
    /// 입력 전력 [W]
    pub input_power_w: f64,
    /// 수동력 [W]
    pub output_power_w: f64,
    /// 효율 [%]
    pub efficiency_pct: f64,
}

/// 토출량, 전양정, 수동력과 효율을 계산한다.
pub fn compute_pump_performance(input: &PumpInput) -> Result<PumpResult, PumpCalcError> {
    let values = [
        input.voltage_v,
        input.current_a,
        input.volume_l,
        input.duration_s,
        input.density_kg_m3,
        input.head_loss_m,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PumpCalcError::InvalidInput("모든 입력은 유한한 숫자여야 합니다."));
    }
    if input.duration_s <= 0.0 {
        return Err(PumpCalcError::InvalidInput("측정 시간은 0보다 커야 합니다."));
    }
    if input.voltage_v < 0.0 || input.current_a < 0.0 || input.volume_l < 0.0 {
        return Err(PumpCalcError::InvalidInput("전압, 전류, 수량은 음수일 수 없습니다."));
    }
    if input.density_kg_m3 <= 0.0 {
        return Err(PumpCalcError::InvalidInput("밀도는 0보다 커야 합니다."));
    }

    let discharge_l_s = input.volume_l / input.duration_s;
    let total_head_m = STATIC_LIFT_M + input.head_loss_m;
    let input_power_w = input.voltage_v * input.current_a;
    let output_power_w = input.density_kg_m3 * GRAVITY * (discharge_l_s / 1000.0) * total_head_m;
    let efficiency_pct = if input_power_w > 0.0 {
        output_power_w / input_power_w * 100.0
    } else {
        0.0
    };

    Ok(PumpResult {
        discharge_l_s,
        total_head_m,
        input_power_w,
        output_power_w,
        efficiency_pct,
    })
}
