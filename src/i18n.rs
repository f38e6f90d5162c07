use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_PIPE_FLOW: &str = "main_menu.pipe_flow";
    pub const MAIN_MENU_SWEEP: &str = "main_menu.sweep";
    pub const MAIN_MENU_PUMP: &str = "main_menu.pump";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PIPE_FLOW_HEADING: &str = "pipe_flow.heading";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_FLOW_RATE: &str = "prompt.flow_rate";
    pub const PROMPT_FLUID: &str = "prompt.fluid";
    pub const RESULT_VELOCITY: &str = "result.velocity";
    pub const RESULT_REYNOLDS: &str = "result.reynolds";
    pub const RESULT_FRICTION: &str = "result.friction_factor";
    pub const RESULT_HEAD_LOSS: &str = "result.head_loss";
    pub const RESULT_INLET_PRESSURE: &str = "result.inlet_pressure";
    pub const REGIME_LAMINAR: &str = "regime.laminar";
    pub const REGIME_TURBULENT: &str = "regime.turbulent";

    pub const SWEEP_HEADING: &str = "sweep.heading";
    pub const PROMPT_FLOW_FROM: &str = "prompt.flow_from";
    pub const PROMPT_FLOW_TO: &str = "prompt.flow_to";
    pub const PROMPT_STEPS: &str = "prompt.steps";

    pub const PUMP_HEADING: &str = "pump.heading";
    pub const PROMPT_VOLTAGE: &str = "prompt.voltage";
    pub const PROMPT_CURRENT: &str = "prompt.current";
    pub const PROMPT_VOLUME: &str = "prompt.volume";
    pub const PROMPT_DURATION: &str = "prompt.duration";
    pub const PROMPT_DENSITY: &str = "prompt.density";
    pub const PROMPT_HEAD_LOSS: &str = "prompt.head_loss";
    pub const RESULT_DISCHARGE: &str = "result.discharge";
    pub const RESULT_TOTAL_HEAD: &str = "result.total_head";
    pub const RESULT_INPUT_POWER: &str = "result.input_power";
    pub const RESULT_OUTPUT_POWER: &str = "result.output_power";
    pub const RESULT_EFFICIENCY: &str = "result.efficiency";
    pub const RESULT_TEMPERATURE: &str = "result.temperature";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_THEME: &str = "settings.current_theme";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_TITLE: &str = "gui.title";
    pub const GUI_TAB_PIPE: &str = "gui.tab.pipe";
    pub const GUI_TAB_PUMP: &str = "gui.tab.pump";
    pub const GUI_THEME_TOGGLE: &str = "gui.theme_toggle";
    pub const GUI_CHART_TITLE: &str = "gui.chart.title";
    pub const GUI_CHART_X: &str = "gui.chart.x";
    pub const GUI_CHART_Y: &str = "gui.chart.y";
    pub const GUI_PUMP_START: &str = "gui.pump.start";
    pub const GUI_PUMP_STOP: &str = "gui.pump.stop";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 > 내장 문자열 > 영어 순으로 찾고, 없으면 키 자체.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let found = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        found.unwrap_or(key).to_string()
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Pipe Flow Lab ===",
        MAIN_MENU_PIPE_FLOW => "1) 배관 손실수두 계산",
        MAIN_MENU_SWEEP => "2) 유량 스윕 (손실수두 곡선)",
        MAIN_MENU_PUMP => "3) 펌프 성능",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PIPE_FLOW_HEADING => "\n-- 배관 유동 --",
        PROMPT_LENGTH => "배관 길이 [m] (빈칸=5): ",
        PROMPT_DIAMETER => "배관 내경 [m] (빈칸=0.05): ",
        PROMPT_FLOW_RATE => "유량 [L/s] (빈칸=0): ",
        PROMPT_FLUID => "유체 (water/glycerin/oil): ",
        RESULT_VELOCITY => "유속:",
        RESULT_REYNOLDS => "레이놀즈수:",
        RESULT_FRICTION => "마찰계수:",
        RESULT_HEAD_LOSS => "손실수두:",
        RESULT_INLET_PRESSURE => "입구 압력:",
        REGIME_LAMINAR => "층류",
        REGIME_TURBULENT => "난류",
        SWEEP_HEADING => "\n-- 유량 스윕 --",
        PROMPT_FLOW_FROM => "시작 유량 [L/s]: ",
        PROMPT_FLOW_TO => "끝 유량 [L/s]: ",
        PROMPT_STEPS => "단계 수: ",
        PUMP_HEADING => "\n-- 펌프 성능 --",
        PROMPT_VOLTAGE => "전압 [V]: ",
        PROMPT_CURRENT => "전류 [A]: ",
        PROMPT_VOLUME => "수량 [L]: ",
        PROMPT_DURATION => "측정 시간 [s]: ",
        PROMPT_DENSITY => "유체 밀도 [kg/m3]: ",
        PROMPT_HEAD_LOSS => "손실수두 [m]: ",
        RESULT_DISCHARGE => "토출량:",
        RESULT_TOTAL_HEAD => "전양정:",
        RESULT_INPUT_POWER => "입력 전력:",
        RESULT_OUTPUT_POWER => "수동력:",
        RESULT_EFFICIENCY => "효율:",
        RESULT_TEMPERATURE => "전동기 온도:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_THEME => "현재 테마:",
        SETTINGS_OPTIONS => "1) 라이트  2) 다크  (light/dark 이름도 가능, 빈칸: 유지)",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        GUI_TITLE => "배관 유동 실험",
        GUI_TAB_PIPE => "배관 유동",
        GUI_TAB_PUMP => "펌프 성능",
        GUI_THEME_TOGGLE => "테마 전환",
        GUI_CHART_TITLE => "유속에 따른 손실수두",
        GUI_CHART_X => "유속 (m/s)",
        GUI_CHART_Y => "손실수두 (m)",
        GUI_PUMP_START => "운전",
        GUI_PUMP_STOP => "정지",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Pipe Flow Lab ===",
        MAIN_MENU_PIPE_FLOW => "1) Pipe head loss",
        MAIN_MENU_SWEEP => "2) Flow sweep (head loss curve)",
        MAIN_MENU_PUMP => "3) Pump performance",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid selection, try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PIPE_FLOW_HEADING => "\n-- Pipe flow --",
        PROMPT_LENGTH => "Pipe length [m] (blank=5): ",
        PROMPT_DIAMETER => "Pipe diameter [m] (blank=0.05): ",
        PROMPT_FLOW_RATE => "Flow rate [L/s] (blank=0): ",
        PROMPT_FLUID => "Fluid (water/glycerin/oil): ",
        RESULT_VELOCITY => "Velocity:",
        RESULT_REYNOLDS => "Reynolds number:",
        RESULT_FRICTION => "Friction factor:",
        RESULT_HEAD_LOSS => "Head loss:",
        RESULT_INLET_PRESSURE => "Inlet pressure:",
        REGIME_LAMINAR => "laminar",
        REGIME_TURBULENT => "turbulent",
        SWEEP_HEADING => "\n-- Flow sweep --",
        PROMPT_FLOW_FROM => "Start flow [L/s]: ",
        PROMPT_FLOW_TO => "End flow [L/s]: ",
        PROMPT_STEPS => "Steps: ",
        PUMP_HEADING => "\n-- Pump performance --",
        PROMPT_VOLTAGE => "Voltage [V]: ",
        PROMPT_CURRENT => "Current [A]: ",
        PROMPT_VOLUME => "Collected volume [L]: ",
        PROMPT_DURATION => "Duration [s]: ",
        PROMPT_DENSITY => "Fluid density [kg/m3]: ",
        PROMPT_HEAD_LOSS => "Head loss [m]: ",
        RESULT_DISCHARGE => "Discharge:",
        RESULT_TOTAL_HEAD => "Total head:",
        RESULT_INPUT_POWER => "Input power:",
        RESULT_OUTPUT_POWER => "Hydraulic power:",
        RESULT_EFFICIENCY => "Efficiency:",
        RESULT_TEMPERATURE => "Motor temperature:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_THEME => "Current theme:",
        SETTINGS_OPTIONS => "1) Light  2) Dark  (or type light/dark, blank: keep)",
        SETTINGS_SAVED => "Settings saved.",
        GUI_TITLE => "Pipe Flow Lab",
        GUI_TAB_PIPE => "Pipe flow",
        GUI_TAB_PUMP => "Pump performance",
        GUI_THEME_TOGGLE => "Toggle theme",
        GUI_CHART_TITLE => "Head loss vs flow velocity",
        GUI_CHART_X => "Flow velocity (m/s)",
        GUI_CHART_Y => "Head loss (m)",
        GUI_PUMP_START => "Start",
        GUI_PUMP_STOP => "Stop",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_falls_back_to_key() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn korean_lookup() {
        let tr = Translator::new("ko-kr");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::REGIME_LAMINAR), "층류");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[result]\nvelocity = \"V:\"\n").unwrap_or_default();
        assert_eq!(map.get("result.velocity").map(String::as_str), Some("V:"));
    }
}
