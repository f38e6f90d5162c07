//! 배관 유동 시뮬레이터: 입력 해석, 물리 계산, 손실수두 이력, 입자 애니메이션.

pub mod fluid;
pub mod history;
pub mod params;
pub mod particles;
pub mod physics;
pub mod simulator;
pub mod sweep;

pub use fluid::Fluid;
pub use history::{ChartSeries, ChartSink, HeadLossHistory, HeadLossSample, HISTORY_CAPACITY};
pub use params::{ingest, InputField, InputSource, SimulationParameters, TextInputs};
pub use physics::{compute, SimulationResult};
pub use simulator::{LoopState, PipeFlowSimulator, SimulatorOptions};
pub use sweep::sweep_flow_rates;
