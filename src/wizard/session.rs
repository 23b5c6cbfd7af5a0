use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::question::{CustomQuestionDraft, Question, is_custom_id};
use super::quality;
use super::section::{SectionId, Sections};
use super::tool::{AiTool, Language, Mode};

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 5;

pub const STEP_NAMES: [&str; 5] = ["입력", "질문", "구성", "리뷰", "결과"];

const RESEARCH_SUMMARY: &str = "초안 리서치: 사용 도구/버전, 인증 상태, 데이터 소스, 출력 형식, 예외 처리 항목을 정리합니다. 고급 모드에선 노드/성능/보안도 점검합니다.";

/// 체크리스트에서 "품질 점수 75+" 항목의 기준.
const CHECKLIST_QUALITY_THRESHOLD: u8 = 75;
const GOAL_PROGRESS_TARGET_CHARS: f64 = 20.0;

/// 1..=5 범위로 고정된 위저드 단계. 역직렬화도 같은 범위로 고정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Step(u8);

impl From<u8> for Step {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl Step {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(FIRST_STEP, LAST_STEP))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        STEP_NAMES
            .get(usize::from(self.0.saturating_sub(FIRST_STEP)))
            .copied()
            .unwrap_or(STEP_NAMES[0])
    }

    fn next(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    fn previous(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for Step {
    fn default() -> Self {
        Self(FIRST_STEP)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NextStep,
    PrevStep,
    FirstStep,
    SetMode(Mode),
    SetTool(AiTool),
    SetLanguage(Language),
    SetGoal(String),
    SetAnswer { id: String, value: String },
    SetSection { id: SectionId, text: String },
    AddCustomQuestion(CustomQuestionDraft),
    RemoveCustomQuestion(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub step: Step,
    pub mode: Mode,
    pub ai_tool: AiTool,
    pub goal_text: String,
    pub research_summary: String,
    pub answers: BTreeMap<String, String>,
    pub custom_questions: Vec<Question>,
    pub sections: Sections,
    pub language: Language,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            step: Step::default(),
            mode: Mode::Beginner,
            ai_tool: AiTool::ChatGPT,
            goal_text: String::new(),
            research_summary: RESEARCH_SUMMARY.to_string(),
            answers: BTreeMap::new(),
            custom_questions: Vec::new(),
            sections: Sections::default(),
            language: Language::Ko,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub ok: bool,
}

impl SessionState {
    pub fn new(mode: Mode, ai_tool: AiTool, language: Language) -> Self {
        Self {
            mode,
            ai_tool,
            language,
            ..Self::default()
        }
    }

    /// 이전 상태는 그대로 두고 변경이 반영된 새 상태를 돌려준다.
    pub fn apply(&self, action: Action) -> Self {
        let mut next = self.clone();
        match action {
            Action::NextStep => {
                if next.can_leave_current_step() {
                    next.step = next.step.next();
                }
            }
            Action::PrevStep => next.step = next.step.previous(),
            Action::FirstStep => next.step = Step::default(),
            Action::SetMode(mode) => next.mode = mode,
            Action::SetTool(tool) => next.ai_tool = tool,
            Action::SetLanguage(language) => next.language = language,
            Action::SetGoal(goal) => next.goal_text = goal,
            Action::SetAnswer { id, value } => {
                next.answers.insert(id, value);
            }
            Action::SetSection { id, text } => next.sections.set(id, text),
            Action::AddCustomQuestion(draft) => {
                if let Some(question) = draft.build() {
                    next.custom_questions.push(question);
                }
            }
            Action::RemoveCustomQuestion(id) => {
                if is_custom_id(&id) {
                    next.custom_questions.retain(|question| question.id != id);
                }
            }
        }
        next
    }

    pub fn can_leave_current_step(&self) -> bool {
        self.step.get() != FIRST_STEP || !self.goal_text.trim().is_empty()
    }

    pub fn answer(&self, id: &str) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    pub fn is_answered(&self, id: &str) -> bool {
        self.answer(id).is_some_and(|value| !value.trim().is_empty())
    }

    pub fn all_questions_answered(&self, questions: &[Question]) -> bool {
        questions.iter().all(|question| self.is_answered(&question.id))
    }

    pub fn goal_progress(&self) -> u8 {
        let chars = self.goal_text.trim().chars().count() as f64;
        let percent = (chars / GOAL_PROGRESS_TARGET_CHARS * 100.0).round();
        percent.min(100.0) as u8
    }

    pub fn checklist(&self, questions: &[Question]) -> [ChecklistItem; 4] {
        [
            ChecklistItem {
                label: "목표 입력",
                ok: !self.goal_text.trim().is_empty(),
            },
            ChecklistItem {
                label: "요건 Q&A",
                ok: self.all_questions_answered(questions),
            },
            ChecklistItem {
                label: "섹션 편집",
                ok: true,
            },
            ChecklistItem {
                label: "품질 점수 75+",
                ok: quality::score(self) >= CHECKLIST_QUALITY_THRESHOLD,
            },
        ]
    }

    /// 직전 질문 목록에는 있었지만 새 목록에서 빠진, 답변이 있는 질문 id.
    pub fn orphaned_answers(&self, previous: &[Question], current: &[Question]) -> Vec<String> {
        let active: HashSet<&str> = current.iter().map(|q| q.id.as_str()).collect();
        previous
            .iter()
            .filter(|q| !active.contains(q.id.as_str()) && self.is_answered(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }
}
