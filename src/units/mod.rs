//! 단위 정의 및 변환 모듈 모음.

pub mod flow;
pub mod length;

pub use flow::{convert_flow, FlowUnit};
pub use length::{convert_length, LengthUnit};
