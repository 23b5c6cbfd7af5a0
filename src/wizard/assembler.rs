//! 세션에 모인 답변과 섹션을 하나의 프롬프트 문서로 조립한다.

use super::section::SectionId;
use super::session::SessionState;
use super::tool::{AiTool, Language};

pub const BLOCK_COUNT: usize = 10;
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// 답변이 없는 자리에 들어가는 표시.
pub const MISSING: &str = "-";

pub fn assemble(state: &SessionState) -> String {
    assemble_blocks(state).join(BLOCK_SEPARATOR)
}

pub fn assemble_blocks(state: &SessionState) -> [String; BLOCK_COUNT] {
    let section = |id: SectionId| {
        let text = collapse_blank_lines(state.sections.get(id));
        if text.is_empty() { MISSING.to_string() } else { text }
    };
    let answer = |id: &str| {
        state
            .answer(id)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or_else(|| MISSING.to_string(), collapse_blank_lines)
    };

    [
        format!("# 역할\n{}", section(SectionId::Role)),
        format!("# 목표/산출물\n{}", section(SectionId::Goal)),
        format!(
            "# 환경·버전\n{}\nAI 툴: {}\n도구: {}, 버전: {}, Credentials: {}",
            section(SectionId::Environment),
            state.ai_tool,
            answer("tool"),
            answer("version"),
            answer("creds"),
        ),
        format!(
            "# 입력 스펙\n{}\n데이터 소스: {}",
            section(SectionId::Inputs),
            answer("sources"),
        ),
        format!(
            "# 출력 포맷\n{}\n산출물: {}",
            section(SectionId::Outputs),
            answer("deliverable"),
        ),
        format!(
            "# 제약/정책\n{}\n## AI 툴 최적화 가이드\n{}",
            section(SectionId::Constraints),
            tool_guide(state.ai_tool),
        ),
        format!(
            "# 예외 처리\n{}\n추가 예외: {}",
            section(SectionId::Exceptions),
            answer("edge"),
        ),
        format!("# 검증/테스트\n{}", section(SectionId::Validation)),
        format!("# 예시\n{}", section(SectionId::Examples)),
        format!("# 언어\n{}", language_marker(state.language)),
    ]
}

/// 사용자 입력 안의 연속된 줄바꿈을 하나로 줄이고 앞뒤 줄바꿈을 없앤다.
/// 블록 구분자(`\n\n`)는 블록 사이에만 나타나야 한다.
fn collapse_blank_lines(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\n' && collapsed.ends_with('\n') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed.trim_matches('\n').to_string()
}

pub fn tool_guide(tool: AiTool) -> &'static str {
    match tool {
        AiTool::ChatGPT => {
            "- 출력은 코드블록(```json)으로 고정하고 스키마를 준수하세요.\n- 불확실하면 추가 질문 후 진행.\n- 단계별 설명과 함께 결과를 제공합니다."
        }
        AiTool::Claude => {
            "- 간결/정확 위주로 답변하고, 불확실성은 명시하세요.\n- 토큰 효율을 고려해 중복 설명을 줄입니다."
        }
        AiTool::Gemini => {
            "- 멀티모달 입력(이미지/파일) 가능 여부를 고려하세요.\n- 세이프티 가이드 준수 및 금칙 표현 필터링을 적용합니다."
        }
        AiTool::Grok => "- 최신성/재치 있는 톤 요청 시에도 사실 검증을 우선합니다.",
        AiTool::Sona => "- 엔진 특성에 맞춘 예시/제약을 명시하고, 형식 일관성을 유지합니다.",
        AiTool::Other => "- 선택한 엔진에 맞춘 출력 형식과 제약을 엄격히 준수하세요.",
    }
}

pub fn language_marker(language: Language) -> &'static str {
    match language {
        Language::Ko => "(언어: 한국어)",
        Language::En => "(Language: English)",
        Language::Both => "(언어: 한국어/영어 병기)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::session::Action;

    fn answered(pairs: &[(&str, &str)]) -> SessionState {
        pairs.iter().fold(SessionState::default(), |state, (id, value)| {
            state.apply(Action::SetAnswer {
                id: id.to_string(),
                value: value.to_string(),
            })
        })
    }

    #[test]
    fn default_state_has_ten_blank_line_separated_blocks() {
        let text = assemble(&SessionState::default());
        let blocks: Vec<&str> = text.split(BLOCK_SEPARATOR).collect();

        assert_eq!(blocks.len(), BLOCK_COUNT);
        assert!(blocks.iter().all(|block| block.starts_with("# ")));
    }

    #[test]
    fn blank_lines_in_user_text_keep_ten_blocks() {
        let state = answered(&[("edge", "타임아웃\n\n\n재시도")])
            .apply(Action::SetSection {
                id: SectionId::Examples,
                text: "입력 예시\n\n기대 출력".to_string(),
            })
            .apply(Action::SetSection {
                id: SectionId::Role,
                text: "\n\n역할\n\n".to_string(),
            })
            .apply(Action::SetSection {
                id: SectionId::Environment,
                text: "\n".to_string(),
            });

        let text = assemble(&state);

        assert_eq!(text.split(BLOCK_SEPARATOR).count(), BLOCK_COUNT);
        assert!(text.contains("# 예시\n입력 예시\n기대 출력"));
        assert!(text.contains("추가 예외: 타임아웃\n재시도"));
        assert!(text.starts_with("# 역할\n역할\n\n# 목표/산출물"));
        assert!(text.contains("# 환경·버전\n-\nAI 툴: ChatGPT"));
    }

    #[test]
    fn collapse_keeps_single_line_breaks() {
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\nb");
        assert_eq!(collapse_blank_lines("\n\n역할\n\n"), "역할");
        assert_eq!(collapse_blank_lines(""), "");
    }

    #[test]
    fn missing_answers_render_as_dash() {
        let blocks = assemble_blocks(&SessionState::default());

        assert!(blocks[2].ends_with("AI 툴: ChatGPT\n도구: -, 버전: -, Credentials: -"));
        assert!(blocks[3].ends_with("데이터 소스: -"));
        assert!(blocks[4].ends_with("산출물: -"));
        assert!(blocks[6].ends_with("추가 예외: -"));
    }

    #[test]
    fn blank_answers_also_render_as_dash() {
        let blocks = assemble_blocks(&answered(&[("version", "   "), ("sources", "")]));

        assert!(blocks[2].contains("버전: -,"));
        assert!(blocks[3].ends_with("데이터 소스: -"));
    }

    #[test]
    fn answers_are_embedded_in_their_blocks() {
        let state = answered(&[
            ("tool", "n8n"),
            ("version", "1.100.1"),
            ("creds", "일부 적용"),
            ("sources", "Google Drive"),
            ("deliverable", "workflow JSON"),
            ("edge", "권한 오류"),
        ]);
        let blocks = assemble_blocks(&state);

        assert!(blocks[2].ends_with("도구: n8n, 버전: 1.100.1, Credentials: 일부 적용"));
        assert!(blocks[3].ends_with("데이터 소스: Google Drive"));
        assert!(blocks[4].ends_with("산출물: workflow JSON"));
        assert!(blocks[6].ends_with("추가 예외: 권한 오류"));
    }

    #[test]
    fn stale_answers_are_ignored() {
        let with_stale = answered(&[("chatgpt_model", "gpt-4o"), ("limits", "8초")]);
        assert_eq!(assemble(&with_stale), assemble(&SessionState::default()));
    }

    #[test]
    fn constraints_block_carries_tool_guidance() {
        for tool in AiTool::ALL {
            let state = SessionState::default().apply(Action::SetTool(tool));
            let blocks = assemble_blocks(&state);

            assert!(blocks[5].starts_with("# 제약/정책\n"));
            assert!(blocks[5].contains("## AI 툴 최적화 가이드\n"));
            assert!(blocks[5].ends_with(tool_guide(tool)));
            assert!(blocks[2].contains(&format!("AI 툴: {}", tool.name())));
        }
    }

    #[test]
    fn unknown_tool_gets_default_guidance() {
        let state = SessionState::default().apply(Action::SetTool(AiTool::from_name("Mistral")));
        assert!(assemble(&state).contains("선택한 엔진에 맞춘 출력 형식과 제약을 엄격히 준수하세요."));
    }

    #[test]
    fn language_marker_only_changes_last_block() {
        let ko = assemble_blocks(&SessionState::default());
        for language in [Language::En, Language::Both] {
            let other = assemble_blocks(&SessionState::default().apply(Action::SetLanguage(language)));
            assert_eq!(ko[..BLOCK_COUNT - 1], other[..BLOCK_COUNT - 1]);
            assert_eq!(other[BLOCK_COUNT - 1], format!("# 언어\n{}", language_marker(language)));
        }
        assert_eq!(ko[BLOCK_COUNT - 1], "# 언어\n(언어: 한국어)");
    }

    #[test]
    fn edited_sections_flow_into_blocks() {
        let state = SessionState::default().apply(Action::SetSection {
            id: SectionId::Examples,
            text: "입력: a.jpg → 출력: {\"date\": \"2024-01-01\"}".to_string(),
        });
        let blocks = assemble_blocks(&state);
        assert_eq!(blocks[8], "# 예시\n입력: a.jpg → 출력: {\"date\": \"2024-01-01\"}");
    }

    #[test]
    fn assembly_is_idempotent() {
        let state = answered(&[("version", "1.0")]);
        let snapshot = state.clone();

        assert_eq!(assemble(&state), assemble(&state));
        assert_eq!(state, snapshot);
    }
}
