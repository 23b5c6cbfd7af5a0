use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("터미널 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
}
