use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::wizard::{AiTool, Language, Mode, SessionState};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("내보내기 경로가 디렉토리가 아닙니다: {path}")]
    ExportDirNotDirectory { path: String },

    #[error("로그 파일 경로가 올바르지 않습니다: {path}")]
    InvalidLogPath { path: String },
}

/// 프롬프트 위저드 실행 설정.
#[derive(Debug, Clone, Parser)]
#[command(name = "prompt-wizard", version, about = "초보자도 쉽게 만드는 AI 프롬프트")]
pub struct Config {
    /// 내보낸 프롬프트 파일을 저장할 디렉토리
    #[arg(long, env = "PROMPT_WIZARD_EXPORT_DIR", default_value = ".")]
    export_dir: PathBuf,

    /// 로그 파일 경로
    #[arg(long, env = "PROMPT_WIZARD_LOG", default_value = "/tmp/prompt-wizard.log")]
    log_file: PathBuf,

    /// 시작 모드
    #[arg(long, value_enum, default_value_t = Mode::Beginner)]
    mode: Mode,

    /// 시작 AI 툴 (ChatGPT, Claude, Gemini, Grok, SONA, 그 외는 Other)
    #[arg(long, default_value = "ChatGPT")]
    tool: String,

    /// 시작 언어
    #[arg(long, value_enum, default_value_t = Language::Ko)]
    language: Language,
}

impl Config {
    pub fn from_args() -> Result<Self, ConfigError> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.export_dir.exists() && !self.export_dir.is_dir() {
            return Err(ConfigError::ExportDirNotDirectory {
                path: self.export_dir.display().to_string(),
            });
        }
        if self.log_file.file_name().is_none() {
            return Err(ConfigError::InvalidLogPath {
                path: self.log_file.display().to_string(),
            });
        }
        Ok(())
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn tool(&self) -> AiTool {
        AiTool::from_name(&self.tool)
    }

    pub fn initial_session(&self) -> SessionState {
        SessionState::new(self.mode, self.tool(), self.language)
    }
}
