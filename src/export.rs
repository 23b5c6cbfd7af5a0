mod clipboard;
mod error;

pub use clipboard::copy_to_clipboard;
pub use error::ExportError;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// `prompt_<unix millis>.txt` 형식의 내보내기 파일 이름.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("prompt_{}.txt", now.timestamp_millis())
}

pub fn write_export(dir: &Path, text: &str, now: DateTime<Utc>) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|err| ExportError::DirectoryCreationFailed {
        path: dir.display().to_string(),
        source: err,
    })?;

    let file_path = dir.join(export_file_name(now));
    fs::write(&file_path, text).map_err(|err| ExportError::WriteFailed {
        path: file_path.display().to_string(),
        source: err,
    })?;

    tracing::info!(path = %file_path.display(), bytes = text.len(), "프롬프트 파일 저장");
    Ok(file_path)
}
