use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::conversion;
use crate::flow::physics::{inlet_pressure_pa, GaugeLevel};
use crate::flow::{compute, ingest, sweep_flow_rates, HeadLossHistory, SimulationParameters, SimulationResult, TextInputs};
use crate::i18n::{keys, Translator};
use crate::pump::{compute_pump_performance, PumpInput, PumpResult};
use crate::render::Theme;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PipeFlow,
    Sweep,
    Pump,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_PIPE_FLOW,
        keys::MAIN_MENU_SWEEP,
        keys::MAIN_MENU_PUMP,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::PipeFlow),
            "2" => return Ok(MenuChoice::Sweep),
            "3" => return Ok(MenuChoice::Pump),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 배관 손실수두 메뉴. 빈칸/잘못된 값은 시뮬레이터와 같은 규칙으로 기본값 처리한다.
pub fn handle_pipe_flow(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PIPE_FLOW_HEADING));
    let params = read_parameters(tr, &cfg.initial)?;
    let result = compute(&params);
    println!("{}", format_flow_result(tr, &params, &result));
    Ok(())
}

/// 유량 스윕 메뉴.
pub fn handle_sweep(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SWEEP_HEADING));
    let base = read_parameters(tr, &cfg.initial)?;
    let from = read_f64(tr, keys::PROMPT_FLOW_FROM)?;
    let to = read_f64(tr, keys::PROMPT_FLOW_TO)?;
    let steps = read_f64(tr, keys::PROMPT_STEPS)?.max(0.0) as usize;
    let history = sweep_flow_rates(&base, from, to, steps);
    println!("{}", format_history(tr, &history));
    Ok(())
}

/// 펌프 성능 메뉴.
pub fn handle_pump(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PUMP_HEADING));
    let input = PumpInput {
        voltage_v: read_f64(tr, keys::PROMPT_VOLTAGE)?,
        current_a: read_f64(tr, keys::PROMPT_CURRENT)?,
        volume_l: read_f64(tr, keys::PROMPT_VOLUME)?,
        duration_s: read_f64(tr, keys::PROMPT_DURATION)?,
        density_kg_m3: read_f64(tr, keys::PROMPT_DENSITY)?,
        head_loss_m: read_f64(tr, keys::PROMPT_HEAD_LOSS)?,
    };
    let result = compute_pump_performance(&input)?;
    println!("{}", format_pump_result(tr, &result));
    Ok(())
}

/// 설정 메뉴(테마 선택).
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_THEME), cfg.theme);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
    if let Some(theme) = theme_choice(&sel)? {
        cfg.theme = theme;
    }
    Ok(())
}

/// 설정 메뉴 입력을 테마로 바꾼다. 번호나 이름(light/dark)을 받고, 빈칸은 유지.
pub fn theme_choice(input: &str) -> Result<Option<Theme>, AppError> {
    match input.trim() {
        "" => Ok(None),
        "1" => Ok(Some(Theme::Light)),
        "2" => Ok(Some(Theme::Dark)),
        name => Ok(Some(conversion::parse_theme(name)?)),
    }
}

/// 계산 결과를 사람이 읽을 수 있는 여러 줄 문자열로 만든다.
pub fn format_flow_result(tr: &Translator, params: &SimulationParameters, result: &SimulationResult) -> String {
    let regime = if result.is_laminar() {
        tr.t(keys::REGIME_LAMINAR)
    } else {
        tr.t(keys::REGIME_TURBULENT)
    };
    let p1 = inlet_pressure_pa(params, result);
    let gauge = match GaugeLevel::classify(p1) {
        GaugeLevel::Success => "",
        GaugeLevel::Warning => " (!)",
        GaugeLevel::Danger => " (!!)",
    };
    format!(
        "L = {} m, D = {} m, Q = {} L/s, {}\n{} {:.3} m/s\n{} {:.0} ({regime})\n{} {:.4}\n{} {:.3} m\n{} {:.0} Pa{gauge}",
        params.length_m,
        params.diameter_m,
        params.flow_rate_l_s,
        params.fluid,
        tr.t(keys::RESULT_VELOCITY),
        result.velocity_m_s,
        tr.t(keys::RESULT_REYNOLDS),
        result.reynolds,
        tr.t(keys::RESULT_FRICTION),
        result.friction_factor,
        tr.t(keys::RESULT_HEAD_LOSS),
        result.head_loss_m,
        tr.t(keys::RESULT_INLET_PRESSURE),
        p1,
    )
}

/// 정렬된 손실수두 곡선을 표로 만든다.
pub fn format_history(tr: &Translator, history: &HeadLossHistory) -> String {
    let (labels, values) = history.chart_series();
    let mut out = format!(
        "{:>12} | {}\n",
        tr.t(keys::GUI_CHART_X),
        tr.t(keys::GUI_CHART_Y)
    );
    for (v, h) in labels.iter().zip(values) {
        out.push_str(&format!("{v:>12} | {h:.4}\n"));
    }
    out
}

pub fn format_pump_result(tr: &Translator, r: &PumpResult) -> String {
    format!(
        "{} {:.2} L/s\n{} {:.2} m\n{} {:.2} W\n{} {:.2} W\n{} {:.2} %",
        tr.t(keys::RESULT_DISCHARGE),
        r.discharge_l_s,
        tr.t(keys::RESULT_TOTAL_HEAD),
        r.total_head_m,
        tr.t(keys::RESULT_INPUT_POWER),
        r.input_power_w,
        tr.t(keys::RESULT_OUTPUT_POWER),
        r.output_power_w,
        tr.t(keys::RESULT_EFFICIENCY),
        r.efficiency_pct,
    )
}

fn read_parameters(tr: &Translator, initial: &SimulationParameters) -> Result<SimulationParameters, AppError> {
    let mut inputs = TextInputs {
        length: read_line(&tr.t(keys::PROMPT_LENGTH))?.trim().to_string(),
        diameter: read_line(&tr.t(keys::PROMPT_DIAMETER))?.trim().to_string(),
        flow_rate: read_line(&tr.t(keys::PROMPT_FLOW_RATE))?.trim().to_string(),
        fluid: read_line(&tr.t(keys::PROMPT_FLUID))?.trim().to_string(),
    };
    if inputs.fluid.is_empty() {
        inputs.fluid = initial.fluid.name().to_string();
    }
    Ok(ingest(&inputs))
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(&tr.t(key))?;
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::Fluid;

    #[test]
    fn flow_result_mentions_regime() {
        let tr = Translator::new("en");
        let params = SimulationParameters {
            flow_rate_l_s: 1.0,
            ..SimulationParameters::default()
        };
        let text = format_flow_result(&tr, &params, &compute(&params));
        assert!(text.contains("turbulent"), "{text}");

        let slow = SimulationParameters {
            flow_rate_l_s: 0.01,
            fluid: Fluid::Glycerin,
            ..SimulationParameters::default()
        };
        let text = format_flow_result(&tr, &slow, &compute(&slow));
        assert!(text.contains("laminar"), "{text}");
    }

    #[test]
    fn theme_choice_accepts_numbers_and_names() {
        assert_eq!(theme_choice("1\n").expect("number"), Some(Theme::Light));
        assert_eq!(theme_choice(" dark ").expect("name"), Some(Theme::Dark));
        assert_eq!(theme_choice("").expect("blank"), None);
        assert!(matches!(
            theme_choice("sepia"),
            Err(AppError::Conversion(conversion::ConversionError::UnknownTheme(_)))
        ));
    }

    #[test]
    fn history_table_has_header_and_rows() {
        let tr = Translator::new("en");
        let history = sweep_flow_rates(&SimulationParameters::default(), 0.5, 1.0, 3);
        let table = format_history(&tr, &history);
        assert_eq!(table.lines().count(), 4);
    }
}
