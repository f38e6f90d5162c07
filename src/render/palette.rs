use serde::{Deserialize, Serialize};
use std::fmt;

use super::canvas::Rgba;

/// 화면 테마.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// "light"/"dark" 속성 값을 해석한다.
    pub fn from_code(code: &str) -> Option<Theme> {
        match code.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// 배관 그림에 쓰는 색 묶음. 렌더러는 계산하지 않고 여기서 찾아 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba,
    pub pipe: Rgba,
    pub water: Rgba,
    pub pipe_wall: Rgba,
    pub pipe_wall_dark: Rgba,
    pub accent: Rgba,
    pub highlight: Rgba,
}

pub const LIGHT: Palette = Palette {
    background: Rgba::opaque(248, 250, 252),
    pipe: Rgba::opaque(226, 232, 240),
    water: Rgba::new(59, 130, 246, 38),
    pipe_wall: Rgba::opaque(100, 116, 139),
    pipe_wall_dark: Rgba::opaque(51, 65, 85),
    accent: Rgba::opaque(37, 99, 235),
    highlight: Rgba::new(255, 255, 255, 102),
};

pub const DARK: Palette = Palette {
    background: Rgba::opaque(15, 23, 42),
    pipe: Rgba::opaque(30, 41, 59),
    water: Rgba::new(56, 189, 248, 38),
    pipe_wall: Rgba::opaque(148, 163, 184),
    pipe_wall_dark: Rgba::opaque(71, 85, 105),
    accent: Rgba::opaque(96, 165, 250),
    highlight: Rgba::new(255, 255, 255, 102),
};
