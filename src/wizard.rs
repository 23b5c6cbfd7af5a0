pub mod assembler;
pub mod catalog;
pub mod quality;
pub mod question;
pub mod section;
pub mod session;
pub mod tool;

use std::collections::HashSet;

pub use quality::{Grade, Quality};
pub use question::{CustomQuestionDraft, DraftKind, Question, QuestionKind};
pub use section::{SectionId, Sections};
pub use session::{Action, SessionState, Step};
pub use tool::{AiTool, Language, Mode};

/// 카탈로그 질문 뒤에 사용자 질문을 붙인 현재 질문 목록.
/// 같은 id가 두 번 나오면 먼저 나온 것만 남긴다.
pub fn generate_questions(
    tool: AiTool,
    mode: Mode,
    goal_text: &str,
    custom_questions: &[Question],
) -> Vec<Question> {
    let mut seen = HashSet::new();
    catalog::generate(tool, mode, goal_text)
        .into_iter()
        .chain(custom_questions.iter().cloned())
        .filter(|question| seen.insert(question.id.clone()))
        .collect()
}

pub fn active_questions(state: &SessionState) -> Vec<Question> {
    generate_questions(
        state.ai_tool,
        state.mode,
        &state.goal_text,
        &state.custom_questions,
    )
}

pub fn assemble_prompt(state: &SessionState) -> String {
    assembler::assemble(state)
}

pub fn compute_quality(state: &SessionState) -> Quality {
    quality::evaluate(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(id: &str) -> Question {
        Question {
            id: id.to_string(),
            label: id.to_string(),
            placeholder: None,
            kind: QuestionKind::Text,
        }
    }

    #[test]
    fn custom_questions_follow_catalog_in_insertion_order() {
        let customs = [custom("custom_b_1"), custom("custom_a_2")];
        let questions = generate_questions(AiTool::Grok, Mode::Pro, "", &customs);

        let tail: Vec<&str> = questions[questions.len() - 2..]
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(tail, ["custom_b_1", "custom_a_2"]);
        assert_eq!(questions[questions.len() - 3].id, "limits");
    }

    #[test]
    fn duplicate_ids_are_presented_once() {
        let customs = [custom("custom_x_1"), custom("custom_x_1"), custom("version")];
        let questions = generate_questions(AiTool::ChatGPT, Mode::Beginner, "", &customs);

        let mut ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 2 + catalog::BASE_QUESTION_COUNT + 1);
    }

    #[test]
    fn active_questions_track_session_inputs() {
        let state = SessionState::default()
            .apply(Action::SetGoal("이미지 OCR 자동화".to_string()))
            .apply(Action::AddCustomQuestion(CustomQuestionDraft {
                label: "대상 독자".to_string(),
                ..Default::default()
            }));
        let questions = active_questions(&state);

        assert_eq!(questions.len(), 9);
        assert!(questions[8].is_custom());
    }

    #[test]
    fn compute_quality_reports_score_and_grade() {
        let quality = compute_quality(&SessionState::default());
        assert_eq!((quality.score, quality.grade), (50, Grade::D));
    }

    #[test]
    fn assemble_prompt_matches_assembler() {
        let state = SessionState::default();
        assert_eq!(assemble_prompt(&state), assembler::assemble(&state));
    }
}
