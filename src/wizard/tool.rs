use std::fmt;

use serde::{Deserialize, Serialize};

/// 프롬프트를 최적화할 대상 AI 도구.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiTool {
    #[default]
    ChatGPT,
    Claude,
    Gemini,
    Grok,
    #[serde(rename = "SONA")]
    Sona,
    Other,
}

impl AiTool {
    pub const ALL: [AiTool; 6] = [
        AiTool::ChatGPT,
        AiTool::Claude,
        AiTool::Gemini,
        AiTool::Grok,
        AiTool::Sona,
        AiTool::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AiTool::ChatGPT => "ChatGPT",
            AiTool::Claude => "Claude",
            AiTool::Gemini => "Gemini",
            AiTool::Grok => "Grok",
            AiTool::Sona => "SONA",
            AiTool::Other => "Other",
        }
    }

    /// 알 수 없는 이름은 실패 대신 `Other`로 취급한다.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(AiTool::Other)
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for AiTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Beginner,
    Pro,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Beginner => "초보자",
            Mode::Pro => "고급",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Beginner => Mode::Pro,
            Mode::Pro => Mode::Beginner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ko,
    En,
    Both,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ko, Language::En, Language::Both];

    pub fn label(self) -> &'static str {
        match self {
            Language::Ko => "한국어",
            Language::En => "English",
            Language::Both => "한국어+English",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// `all` 안에서 `current`로부터 `step`칸 뒤의 값. 끝에서는 처음으로 돌아간다.
pub(super) fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let index = all.iter().position(|item| *item == current).unwrap_or(0);
    all[(index + step) % all.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_matches_known_tools_case_insensitively() {
        assert_eq!(AiTool::from_name("chatgpt"), AiTool::ChatGPT);
        assert_eq!(AiTool::from_name("Sona"), AiTool::Sona);
        assert_eq!(AiTool::from_name(" Gemini "), AiTool::Gemini);
    }

    #[test]
    fn from_name_falls_back_to_other() {
        assert_eq!(AiTool::from_name("Llama"), AiTool::Other);
        assert_eq!(AiTool::from_name(""), AiTool::Other);
    }

    #[test]
    fn tool_cycle_wraps_around() {
        assert_eq!(AiTool::Other.next(), AiTool::ChatGPT);
        assert_eq!(AiTool::ChatGPT.previous(), AiTool::Other);
        assert_eq!(AiTool::Grok.next(), AiTool::Sona);
    }

    #[test]
    fn language_cycle_visits_all_variants() {
        assert_eq!(Language::Ko.next(), Language::En);
        assert_eq!(Language::En.next(), Language::Both);
        assert_eq!(Language::Both.next(), Language::Ko);
        for language in Language::ALL {
            assert_eq!(language.next().previous(), language);
        }
    }

    #[test]
    fn serde_names_match_wire_values() {
        assert_eq!(serde_json::to_string(&AiTool::Sona).unwrap(), "\"SONA\"");
        assert_eq!(serde_json::to_string(&Mode::Pro).unwrap(), "\"pro\"");
        assert_eq!(serde_json::to_string(&Language::Both).unwrap(), "\"both\"");
    }
}
