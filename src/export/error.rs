use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("내보내기 디렉토리를 만들 수 없습니다: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("프롬프트 파일을 쓸 수 없습니다: {path}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
