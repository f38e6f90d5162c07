//! 계산과 시뮬레이션 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod flow;
pub mod i18n;
pub mod pump;
pub mod render;
pub mod ui_cli;
pub mod units;
