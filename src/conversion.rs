use crate::flow::Fluid;
use crate::render::Theme;
use crate::units::*;

/// 단위/선택값 문자열 해석 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    UnknownUnit(String),
    /// 알 수 없는 유체 이름
    UnknownFluid(String),
    /// 알 수 없는 테마 이름
    UnknownTheme(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::UnknownUnit(u) => write!(f, "알 수 없는 단위: {u}"),
            ConversionError::UnknownFluid(name) => {
                write!(f, "알 수 없는 유체: {name} (water/glycerin/oil)")
            }
            ConversionError::UnknownTheme(name) => write!(f, "알 수 없는 테마: {name} (light/dark)"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// 길이 단위 문자열(`m`, `mm`, `in` 등)을 해석한다.
pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "cm" => Ok(LengthUnit::Centimeter),
        "mm" => Ok(LengthUnit::Millimeter),
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 유량 단위 문자열(`L/s`, `m3/h`, `gpm` 등)을 해석한다.
pub fn parse_flow_unit(s: &str) -> Result<FlowUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "l/s" | "lps" => Ok(FlowUnit::LiterPerSecond),
        "l/min" | "lpm" => Ok(FlowUnit::LiterPerMinute),
        "m3/s" | "m³/s" => Ok(FlowUnit::CubicMeterPerSecond),
        "m3/h" | "m³/h" | "cmh" => Ok(FlowUnit::CubicMeterPerHour),
        "gpm" => Ok(FlowUnit::Gpm),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_fluid(s: &str) -> Result<Fluid, ConversionError> {
    Fluid::from_code(s).ok_or_else(|| ConversionError::UnknownFluid(s.to_string()))
}

pub fn parse_theme(s: &str) -> Result<Theme, ConversionError> {
    Theme::from_code(s).ok_or_else(|| ConversionError::UnknownTheme(s.to_string()))
}

/// 임의 단위 길이를 미터로 환산한다.
pub fn length_to_m(value: f64, unit: &str) -> Result<f64, ConversionError> {
    Ok(convert_length(value, parse_length_unit(unit)?, LengthUnit::Meter))
}

/// 임의 단위 유량을 L/s로 환산한다.
pub fn flow_to_l_s(value: f64, unit: &str) -> Result<f64, ConversionError> {
    Ok(convert_flow(value, parse_flow_unit(unit)?, FlowUnit::LiterPerSecond))
}
