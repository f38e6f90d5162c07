use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::flow::particles::DEFAULT_PIXELS_PER_M_S;
use crate::flow::SimulationParameters;
use crate::render::Theme;
use crate::units::{FlowUnit, LengthUnit};

const CONFIG_FILE: &str = "config.toml";

/// CLI 입출력에 쓰는 기본 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub length: LengthUnit,
    pub diameter: LengthUnit,
    pub flow: FlowUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            length: LengthUnit::Meter,
            diameter: LengthUnit::Meter,
            flow: FlowUnit::LiterPerSecond,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    /// 언어 코드(auto/en/ko)
    pub language: String,
    /// 언어팩(TOML) 디렉터리
    pub language_pack_dir: Option<String>,
    /// 유속 → 입자 화면 속도 배율
    pub particle_scale: f32,
    /// 입력란 초기값
    pub initial: SimulationParameters,
    pub default_units: DefaultUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            language: "auto".to_string(),
            language_pack_dir: None,
            particle_scale: DEFAULT_PIXELS_PER_M_S,
            initial: SimulationParameters::default(),
            default_units: DefaultUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 읽는다. 파일이 없으면 기본값을 저장하고 반환한다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        log::info!("created default configuration at {}", path.display());
        Ok(cfg)
    }
}

fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_to(self, path)?;
        log::info!("configuration saved to {}", path.display());
        Ok(())
    }
}
