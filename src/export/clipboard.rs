use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 우선순위 순으로 시도하는 클립보드 프로그램과 인수.
const CLIPBOARD_PROGRAMS: [(&str, &[&str]); 4] = [
    ("wl-copy", &[]),
    ("pbcopy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// 텍스트를 시스템 클립보드로 복사한다. 실패는 `false`로만 알린다.
pub fn copy_to_clipboard(text: &str) -> bool {
    let Some((binary, args)) = find_clipboard_program() else {
        tracing::debug!("클립보드 프로그램을 찾지 못함");
        return false;
    };

    match pipe_into(&binary, args, text) {
        Ok(true) => true,
        Ok(false) => {
            tracing::debug!(program = %binary.display(), "클립보드 프로그램이 실패 코드로 종료");
            false
        }
        Err(err) => {
            tracing::debug!(program = %binary.display(), error = %err, "클립보드 복사 실패");
            false
        }
    }
}

fn find_clipboard_program() -> Option<(PathBuf, &'static [&'static str])> {
    CLIPBOARD_PROGRAMS
        .iter()
        .find_map(|(name, args)| which::which(name).ok().map(|path| (path, *args)))
}

fn pipe_into(binary: &Path, args: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(binary)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    // stdin을 닫아야 프로그램이 입력 끝을 보고 종료한다.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    let status = child.wait()?;
    written?;
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failure_still_reaps_child() {
        let Ok(binary) = which::which("true") else {
            return;
        };
        let text = "x".repeat(1 << 20);
        let result = pipe_into(&binary, &[], &text);

        // true는 입력을 읽지 않고 끝나므로 쓰기가 끊길 수 있다. 어느 쪽이든 대기는 끝난다.
        match result {
            Ok(success) => assert!(success),
            Err(err) => assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe),
        }
    }

    #[test]
    fn spawning_missing_binary_is_an_io_error() {
        let result = pipe_into(Path::new("/nonexistent/clipboard-bin"), &[], "text");
        assert!(result.is_err());
    }
}
