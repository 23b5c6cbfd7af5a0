use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "prompt_wizard=info";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("로그 파일을 열 수 없습니다: {path}")]
    OpenFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("로거를 초기화할 수 없습니다: {0}")]
    InitFailed(String),
}

/// 표준 출력은 TUI가 쓰므로 로그는 파일에만 남긴다.
pub fn init(path: &Path) -> Result<(), LoggerError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| LoggerError::OpenFailed {
            path: path.display().to_string(),
            source: err,
        })?;
    let file = Arc::new(file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(move || SharedFile(Arc::clone(&file)))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|err| LoggerError::InitFailed(err.to_string()))
}

struct SharedFile(Arc<File>);

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.0).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_fails_for_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("wizard.log");

        let err = init(&path).unwrap_err();

        assert!(
            matches!(err, LoggerError::OpenFailed { .. }),
            "expected OpenFailed, got: {err}",
        );
    }
}
