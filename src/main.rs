use clap::{Parser, Subcommand};
use pipe_flow_lab::{
    app::{self, AppError},
    config, conversion,
    flow::{compute, ingest, sweep_flow_rates, SimulationParameters, TextInputs},
    i18n::{self, Translator},
    pump::{compute_pump_performance, PumpInput},
    ui_cli,
};

/// 배관 손실수두와 펌프 성능 계산 CLI.
#[derive(Debug, Parser)]
#[command(name = "pipe_flow_lab_cli", version, about)]
struct Cli {
    /// 표시 언어 (auto/en/ko)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, clap::Args)]
struct PipeArgs {
    /// 배관 길이
    #[arg(long)]
    length: Option<String>,
    /// 배관 내경
    #[arg(long)]
    diameter: Option<String>,
    /// 체적 유량
    #[arg(long)]
    flow_rate: Option<String>,
    /// 유체 (water/glycerin/oil)
    #[arg(long)]
    fluid: Option<String>,
    /// 길이/내경 단위 (m, cm, mm, in, ft). 생략 시 설정값
    #[arg(long)]
    length_unit: Option<String>,
    /// 유량 단위 (L/s, L/min, m3/s, m3/h, gpm). 생략 시 설정값
    #[arg(long)]
    flow_unit: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 한 지점의 유속, 레이놀즈수, 마찰계수, 손실수두를 계산한다.
    Compute(PipeArgs),
    /// 유량 범위를 훑어 손실수두-유속 곡선을 출력한다.
    Sweep {
        #[command(flatten)]
        pipe: PipeArgs,
        /// 시작 유량
        #[arg(long)]
        from: f64,
        /// 끝 유량
        #[arg(long)]
        to: f64,
        #[arg(long, default_value_t = 20)]
        steps: usize,
    },
    /// 펌프 토출량, 양정, 효율을 계산한다.
    Pump {
        #[arg(long)]
        voltage: f64,
        #[arg(long)]
        current: f64,
        /// 모은 수량 [L]
        #[arg(long)]
        volume: f64,
        /// 측정 시간 [s]
        #[arg(long)]
        duration: f64,
        #[arg(long, default_value_t = 1000.0)]
        density: f64,
        #[arg(long, default_value_t = 0.0)]
        head_loss: f64,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() {
    env_logger::init();
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    match cli.command {
        None => app::run(&mut cfg, &tr)?,
        Some(Command::Compute(pipe)) => {
            let params = pipe_parameters(&pipe, &cfg)?;
            let result = compute(&params);
            println!("{}", ui_cli::format_flow_result(&tr, &params, &result));
        }
        Some(Command::Sweep {
            pipe,
            from,
            to,
            steps,
        }) => {
            let params = pipe_parameters(&pipe, &cfg)?;
            let flow_unit = pipe.flow_unit.clone().unwrap_or_else(|| cfg.default_units.flow.symbol().to_string());
            let from = conversion::flow_to_l_s(from, &flow_unit)?;
            let to = conversion::flow_to_l_s(to, &flow_unit)?;
            let history = sweep_flow_rates(&params, from, to, steps);
            print!("{}", ui_cli::format_history(&tr, &history));
        }
        Some(Command::Pump {
            voltage,
            current,
            volume,
            duration,
            density,
            head_loss,
        }) => {
            let result = compute_pump_performance(&PumpInput {
                voltage_v: voltage,
                current_a: current,
                volume_l: volume,
                duration_s: duration,
                density_kg_m3: density,
                head_loss_m: head_loss,
            })?;
            println!("{}", ui_cli::format_pump_result(&tr, &result));
        }
    }
    Ok(())
}

/// 명령행 값을 SI로 바꾼 뒤 입력 해석 규칙(기본값 대체)을 그대로 적용한다.
fn pipe_parameters(args: &PipeArgs, cfg: &config::Config) -> Result<SimulationParameters, AppError> {
    let length_unit = args
        .length_unit
        .clone()
        .unwrap_or_else(|| cfg.default_units.length.symbol().to_string());
    let diameter_unit = args
        .length_unit
        .clone()
        .unwrap_or_else(|| cfg.default_units.diameter.symbol().to_string());
    let flow_unit = args
        .flow_unit
        .clone()
        .unwrap_or_else(|| cfg.default_units.flow.symbol().to_string());

    if let Some(fluid) = &args.fluid {
        conversion::parse_fluid(fluid)?;
    }

    let initial = TextInputs::from_parameters(&cfg.initial);
    let inputs = TextInputs {
        length: to_si(args.length.as_deref(), &initial.length, |v| {
            conversion::length_to_m(v, &length_unit)
        })?,
        diameter: to_si(args.diameter.as_deref(), &initial.diameter, |v| {
            conversion::length_to_m(v, &diameter_unit)
        })?,
        flow_rate: to_si(args.flow_rate.as_deref(), &initial.flow_rate, |v| {
            conversion::flow_to_l_s(v, &flow_unit)
        })?,
        fluid: args.fluid.clone().unwrap_or(initial.fluid),
    };
    Ok(ingest(&inputs))
}

// 숫자로 읽히는 값만 환산하고, 나머지는 원문 그대로 넘겨 기본값 처리에 맡긴다.
fn to_si<F>(raw: Option<&str>, initial: &str, convert: F) -> Result<String, AppError>
where
    F: Fn(f64) -> Result<f64, conversion::ConversionError>,
{
    match raw {
        None => Ok(initial.to_string()),
        Some(text) => match text.trim().parse::<f64>() {
            Ok(v) => Ok(convert(v)?.to_string()),
            Err(_) => Ok(text.to_string()),
        },
    }
}
