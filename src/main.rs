use std::process::ExitCode;

use prompt_wizard::config::Config;
use prompt_wizard::{logger, ui};

fn main() -> ExitCode {
    let config = match Config::from_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("설정 오류: {}", err);
            return ExitCode::from(2);
        }
    };

    if let Err(err) = logger::init(config.log_file()) {
        eprintln!("로거 초기화 실패: {}", err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = ui::run(&config) {
        tracing::error!(error = %err, "위저드 실행 실패");
        eprintln!("실행 중 오류가 발생했습니다: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
