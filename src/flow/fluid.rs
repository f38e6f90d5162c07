use serde::{Deserialize, Serialize};
use std::fmt;

use crate::render::Rgba;

/// 시뮬레이터에서 선택 가능한 유체.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fluid {
    #[default]
    Water,
    Glycerin,
    Oil,
}

/// 유체 물성치(상온 기준 고정값).
#[derive(Debug, Clone, Copy)]
pub struct FluidProperties {
    /// 밀도 [kg/m3]
    pub density_kg_m3: f64,
    /// 점성계수 [Pa·s]
    pub viscosity_pa_s: f64,
    pub name: &'static str,
    /// 입자 표시 색상
    pub particle_colour: Rgba,
}

impl Fluid {
    pub const ALL: [Fluid; 3] = [Fluid::Water, Fluid::Glycerin, Fluid::Oil];

    pub fn properties(&self) -> FluidProperties {
        match self {
            Fluid::Water => FluidProperties {
                density_kg_m3: 998.0,
                viscosity_pa_s: 0.001,
                name: "water",
                particle_colour: Rgba::new(52, 152, 219, 204),
            },
            Fluid::Glycerin => FluidProperties {
                density_kg_m3: 1260.0,
                viscosity_pa_s: 1.412,
                name: "glycerin",
                particle_colour: Rgba::new(255, 105, 180, 204),
            },
            Fluid::Oil => FluidProperties {
                density_kg_m3: 900.0,
                viscosity_pa_s: 0.03,
                name: "oil",
                particle_colour: Rgba::new(241, 196, 15, 204),
            },
        }
    }

    pub fn density(&self) -> f64 {
        self.properties().density_kg_m3
    }

    pub fn viscosity(&self) -> f64 {
        self.properties().viscosity_pa_s
    }

    pub fn name(&self) -> &'static str {
        self.properties().name
    }

    /// 선택 상자 값(문자열)을 유체로 해석한다. 알 수 없는 값은 None.
    pub fn from_code(code: &str) -> Option<Fluid> {
        match code.trim().to_lowercase().as_str() {
            "water" => Some(Fluid::Water),
            "glycerin" | "glycerine" => Some(Fluid::Glycerin),
            "oil" => Some(Fluid::Oil),
            _ => None,
        }
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
