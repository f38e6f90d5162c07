//! 사용자 입력 필드에서 시뮬레이션 파라미터를 읽어들인다.
//! 잘못된 값은 오류 없이 기본값으로 대체한다.

use log::warn;
use serde::{Deserialize, Serialize};

use super::fluid::Fluid;

pub const DEFAULT_LENGTH_M: f64 = 5.0;
pub const DEFAULT_DIAMETER_M: f64 = 0.05;
pub const DEFAULT_FLOW_RATE_L_S: f64 = 0.0;

/// 배관 유동 계산 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// 배관 길이 [m], 항상 0보다 크다.
    pub length_m: f64,
    /// 배관 내경 [m], 항상 0보다 크다.
    pub diameter_m: f64,
    /// 체적 유량 [L/s], 0 이상.
    pub flow_rate_l_s: f64,
    pub fluid: Fluid,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            length_m: DEFAULT_LENGTH_M,
            diameter_m: DEFAULT_DIAMETER_M,
            flow_rate_l_s: DEFAULT_FLOW_RATE_L_S,
            fluid: Fluid::Water,
        }
    }
}

/// 입력 필드 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Length,
    Diameter,
    FlowRate,
    Fluid,
}

impl InputField {
    pub fn name(&self) -> &'static str {
        match self {
            InputField::Length => "pipe length",
            InputField::Diameter => "pipe diameter",
            InputField::FlowRate => "flow rate",
            InputField::Fluid => "fluid",
        }
    }
}

/// 사용자가 편집하는 원시 입력을 제공한다.
///
/// 필드 자체가 존재하지 않으면 `None`, 비어 있으면 `Some("")`를 반환한다.
pub trait InputSource {
    fn raw(&self, field: InputField) -> Option<String>;
}

/// 문자열 필드 네 개를 그대로 들고 있는 기본 입력 소스. GUI/CLI가 공통으로 사용한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInputs {
    pub length: String,
    pub diameter: String,
    pub flow_rate: String,
    pub fluid: String,
}

impl TextInputs {
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        Self {
            length: params.length_m.to_string(),
            diameter: params.diameter_m.to_string(),
            flow_rate: params.flow_rate_l_s.to_string(),
            fluid: params.fluid.name().to_string(),
        }
    }
}

impl InputSource for TextInputs {
    fn raw(&self, field: InputField) -> Option<String> {
        let value = match field {
            InputField::Length => &self.length,
            InputField::Diameter => &self.diameter,
            InputField::FlowRate => &self.flow_rate,
            InputField::Fluid => &self.fluid,
        };
        Some(value.clone())
    }
}

/// 네 개의 입력값을 읽고 기본값 대체 규칙을 적용한다.
pub fn ingest<S: InputSource + ?Sized>(source: &S) -> SimulationParameters {
    let length_m = read_positive(source, InputField::Length, DEFAULT_LENGTH_M);
    let diameter_m = read_positive(source, InputField::Diameter, DEFAULT_DIAMETER_M);
    let flow_rate_l_s = match read_number(source, InputField::FlowRate) {
        Some(q) if q >= 0.0 => q,
        _ => DEFAULT_FLOW_RATE_L_S,
    };
    let fluid = read_raw(source, InputField::Fluid)
        .and_then(|code| Fluid::from_code(&code))
        .unwrap_or_default();

    SimulationParameters {
        length_m,
        diameter_m,
        flow_rate_l_s,
        fluid,
    }
}

/// 숫자 하나를 해석한다. 비어 있거나 유한하지 않으면 None.
pub fn parse_number(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

fn read_raw<S: InputSource + ?Sized>(source: &S, field: InputField) -> Option<String> {
    let raw = source.raw(field);
    if raw.is_none() {
        warn!("input field '{}' not found, using default", field.name());
    }
    raw
}

fn read_number<S: InputSource + ?Sized>(source: &S, field: InputField) -> Option<f64> {
    read_raw(source, field).and_then(|raw| parse_number(&raw))
}

// 길이와 내경은 0 이하이면 0 나눗셈이 생기므로 기본값으로 대체한다.
fn read_positive<S: InputSource + ?Sized>(source: &S, field: InputField, default: f64) -> f64 {
    match read_number(source, field) {
        Some(v) if v > 0.0 => v,
        _ => default,
    }
}
