/// 전동기 시작 온도 [°C]
pub const AMBIENT_C: f64 = 25.0;
/// 전동기 최고 온도 [°C]
pub const MAX_TEMP_C: f64 = 85.0;
const COOLING_PER_TICK_C: f64 = 0.2;

/// 온도 경고 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureLevel {
    Normal,
    Warm,
    Hot,
}

impl TemperatureLevel {
    pub fn classify(temp_c: f64) -> Self {
        if temp_c > 70.0 {
            TemperatureLevel::Hot
        } else if temp_c > 50.0 {
            TemperatureLevel::Warm
        } else {
            TemperatureLevel::Normal
        }
    }
}

/// 손실 전력에 비례해 데워지고 정지 중에는 서서히 식는 단순 열 모델.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorThermalModel {
    temperature_c: f64,
}

impl Default for MotorThermalModel {
    fn default() -> Self {
        Self {
            temperature_c: AMBIENT_C,
        }
    }
}

impl MotorThermalModel {
    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn level(&self) -> TemperatureLevel {
        TemperatureLevel::classify(self.temperature_c)
    }

    /// 1초 진행. 운전 중이면 손실 전력(kW)의 절반만큼 오르고, 정지 중이면 0.2°C 식는다.
    pub fn tick(&mut self, running: bool, input_power_w: f64, efficiency_pct: f64) -> f64 {
        if running {
            let loss_w = input_power_w * (1.0 - efficiency_pct / 100.0);
            let rise = (loss_w / 1000.0) * 0.5;
            if rise.is_finite() {
                self.temperature_c = (self.temperature_c + rise).min(MAX_TEMP_C);
            }
        } else {
            self.temperature_c = (self.temperature_c - COOLING_PER_TICK_C).max(AMBIENT_C);
        }
        self.temperature_c
    }

    pub fn reset(&mut self) {
        self.temperature_c = AMBIENT_C;
    }
}
