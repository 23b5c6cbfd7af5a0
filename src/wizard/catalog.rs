//! 도구, 모드, 목표 문장으로부터 인터뷰 질문 목록을 만든다.
//!
//! 순서는 고정이다: 도구별 질문, 공통 질문, 목표 키워드로 추가되는 질문,
//! 고급 모드 전용 질문. 사용자 질문은 호출자가 마지막에 붙인다.

use super::question::Question;
use super::tool::{AiTool, Mode};

/// 목표 문장에 이 단어가 있으면 이미지/파일 입력 질문을 추가한다.
pub const IMAGE_KEYWORD: &str = "이미지";

pub const BASE_QUESTION_COUNT: usize = 5;
pub const PRO_QUESTION_COUNT: usize = 2;

pub fn generate(tool: AiTool, mode: Mode, goal_text: &str) -> Vec<Question> {
    let mut questions = tool_extras(tool);
    questions.extend(base_questions());

    if mentions_image(goal_text) {
        questions.push(Question::textarea(
            "vision",
            "이미지/파일 입력 여부와 처리 범위(해상도, OCR 등)",
            "예: JPG 300dpi, 영역 OCR 추출",
        ));
    }

    if mode == Mode::Pro {
        questions.extend(pro_questions());
    }

    questions
}

pub fn mentions_image(goal_text: &str) -> bool {
    goal_text.to_lowercase().contains(IMAGE_KEYWORD)
}

fn tool_extras(tool: AiTool) -> Vec<Question> {
    match tool {
        AiTool::ChatGPT => vec![
            Question::text(
                "chatgpt_model",
                "사용할 모델/엔진 이름(예: gpt-4o / o3 / o4-mini-high)",
                "예: gpt-4o",
            ),
            Question::select(
                "chatgpt_output",
                "출력 형식 고정 필요 여부(JSON/Markdown/코드블록)",
                &["JSON", "Markdown", "Code block", "상관없음"],
            ),
        ],
        AiTool::Claude => vec![
            Question::text(
                "claude_model",
                "사용할 모델/엔진 이름(예: Claude 3.5 Sonnet 등)",
                "예: Claude 3.5 Sonnet",
            ),
            Question::select("claude_style", "토큰 절약/간결성 우선 여부", &["네", "아니오"]),
        ],
        AiTool::Gemini => vec![
            Question::text(
                "gemini_model",
                "사용할 모델/엔진 이름(예: Gemini 1.5 Pro 등)",
                "예: Gemini 1.5 Pro",
            ),
            Question::select(
                "gemini_safety",
                "세이프티 가이드(금칙/톤) 필요 여부",
                &["필요", "불필요"],
            ),
        ],
        AiTool::Grok => vec![Question::text("grok_model", "사용할 모델/엔진 이름", "예: Grok-2")],
        AiTool::Sona => vec![Question::text("sona_model", "사용할 모델/엔진 이름", "예: SONA-…")],
        AiTool::Other => vec![Question::text("llm_model", "사용할 모델/엔진 이름", "예: 모델명")],
    }
}

fn base_questions() -> [Question; BASE_QUESTION_COUNT] {
    [
        Question::text(
            "version",
            "버전/환경을 지정해주세요 (예: n8n 1.100.1 또는 사용 API 버전)",
            "예: n8n 1.100.1",
        ),
        Question::select(
            "creds",
            "Credentials 상태는 어떤가요?",
            &["모두 적용", "일부 적용", "미완료"],
        ),
        Question::text(
            "sources",
            "입력/출력 데이터 소스는? (예: Google Drive OCR → Google Sheets → Notion)",
            "예: Google Drive OCR → Google Sheets",
        ),
        Question::text(
            "deliverable",
            "최종 산출물 형식을 지정해주세요 (예: n8n workflow JSON + 주석 / Markdown 템플릿 / 스키마)",
            "예: JSON + 주석 + 테스트 체크리스트",
        ),
        Question::textarea(
            "edge",
            "예외/에러 케이스를 지정해주세요",
            "예: 인증 실패, 빈 데이터, 중복 데이터, 권한 오류",
        ),
    ]
}

fn pro_questions() -> [Question; PRO_QUESTION_COUNT] {
    [
        Question::textarea(
            "evaluation",
            "결과 검증 방법(스키마 검증, 샘플 데이터, 자동 재시도 규칙 등)을 구체적으로 적어주세요",
            "예: 샘플 3건, 실패 시 2회 재시도 후 요약 리포트",
        ),
        Question::text(
            "limits",
            "성능/비용 제약(토큰/속도/요금 한도)",
            "예: 응답 8초 이내, 비용 1회 0.02$ 이내",
        ),
    ]
}
