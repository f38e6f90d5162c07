use crate::config::Config;
use crate::conversion;
use crate::i18n::{self, Translator};
use crate::pump;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 단위/선택값 해석 오류
    Conversion(conversion::ConversionError),
    /// 펌프 계산 오류
    Pump(pump::PumpCalcError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Conversion(e) => write!(f, "입력 해석 오류: {e}"),
            AppError::Pump(e) => write!(f, "펌프 계산 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<conversion::ConversionError> for AppError {
    fn from(value: conversion::ConversionError) -> Self {
        AppError::Conversion(value)
    }
}

impl From<pump::PumpCalcError> for AppError {
    fn from(value: pump::PumpCalcError) -> Self {
        AppError::Pump(value)
    }
}

/// 대화형 CLI의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::PipeFlow => ui_cli::handle_pipe_flow(tr, config),
            MenuChoice::Sweep => ui_cli::handle_sweep(tr, config),
            MenuChoice::Pump => ui_cli::handle_pump(tr),
            MenuChoice::Settings => ui_cli::handle_settings(tr, config).and_then(|_| {
                config.save()?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                Ok(())
            }),
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        // 계산 오류는 메뉴로 돌아가고, 입출력 오류만 루프를 끝낸다.
        match outcome {
            Ok(()) => {}
            Err(AppError::Io(e)) => return Err(AppError::Io(e)),
            Err(e) => println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX)),
        }
    }
    Ok(())
}
