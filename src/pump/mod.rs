//! 원심펌프 시험 관련 계산을 모아둔다.
//! 토출량/양정/효율 계산과 전동기 온도 모델로 구성한다.

pub mod performance;
pub mod thermal;

pub use performance::{compute_pump_performance, PumpCalcError, PumpInput, PumpResult};
pub use thermal::{MotorThermalModel, TemperatureLevel};
