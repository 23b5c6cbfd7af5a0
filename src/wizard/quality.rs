use std::fmt;

use serde::Serialize;

use super::section::SectionId;
use super::session::SessionState;

const BASELINE: u8 = 50;
const MAX_SCORE: u8 = 100;

const IMPROVEMENT_HINT: &str = "출력 포맷과 검증 단계를 더 구체화하면 점수가 상승합니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::A,
            75.. => Grade::B,
            60.. => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quality {
    pub score: u8,
    pub grade: Grade,
    pub hints: Vec<&'static str>,
}

/// 기본 50점에서 시작해 항목별 기준을 넘을 때마다 가산한다.
/// 섹션은 사용자가 기본 문구를 고친 경우에만 길이를 센다.
pub fn score(state: &SessionState) -> u8 {
    let section_len = |id: SectionId| {
        if state.sections.is_seeded(id) {
            0
        } else {
            trimmed_len(state.sections.get(id))
        }
    };

    let mut total = BASELINE;
    if trimmed_len(&state.goal_text) > 10 {
        total += 10;
    }
    if state.is_answered("version") {
        total += 8;
    }
    if section_len(SectionId::Outputs) > 20 {
        total += 10;
    }
    if section_len(SectionId::Validation) > 20 {
        total += 10;
    }
    if section_len(SectionId::Exceptions) > 10 {
        total += 8;
    }
    total.min(MAX_SCORE)
}

pub fn evaluate(state: &SessionState) -> Quality {
    let score = score(state);
    let grade = Grade::from_score(score);
    let hints = if grade == Grade::A {
        Vec::new()
    } else {
        vec![IMPROVEMENT_HINT]
    };
    Quality { score, grade, hints }
}

fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::session::Action;

    fn blank_sections(state: SessionState) -> SessionState {
        SectionId::ALL.into_iter().fold(state, |state, id| {
            state.apply(Action::SetSection {
                id,
                text: String::new(),
            })
        })
    }

    fn set_section(state: SessionState, id: SectionId, chars: usize) -> SessionState {
        state.apply(Action::SetSection {
            id,
            text: "가".repeat(chars),
        })
    }

    #[test]
    fn nothing_filled_scores_baseline_grade_d() {
        let state = blank_sections(SessionState::default());
        let quality = evaluate(&state);

        assert_eq!(quality.score, 50);
        assert_eq!(quality.grade, Grade::D);
        assert_eq!(quality.hints, [IMPROVEMENT_HINT]);
    }

    #[test]
    fn untouched_default_state_scores_baseline() {
        let quality = evaluate(&SessionState::default());
        assert_eq!(quality.score, 50);
        assert_eq!(quality.grade, Grade::D);
    }

    #[test]
    fn seeded_copy_counts_once_edited() {
        let state = SessionState::default();
        let edited = format!("{} 스키마 검증 포함", state.sections.get(SectionId::Outputs));
        let state = state.apply(Action::SetSection {
            id: SectionId::Outputs,
            text: edited,
        });

        assert_eq!(score(&state), 60);
    }

    #[test]
    fn every_threshold_met_scores_96_grade_a() {
        let state = SessionState::default()
            .apply(Action::SetGoal("가".repeat(15)))
            .apply(Action::SetAnswer {
                id: "version".to_string(),
                value: "1.0".to_string(),
            });
        let state = set_section(state, SectionId::Outputs, 25);
        let state = set_section(state, SectionId::Validation, 25);
        let state = set_section(state, SectionId::Exceptions, 15);

        let quality = evaluate(&state);
        assert_eq!(quality.score, 96);
        assert_eq!(quality.grade, Grade::A);
        assert!(quality.hints.is_empty());
    }

    #[test]
    fn thresholds_are_strict_and_use_trimmed_length() {
        let state = blank_sections(SessionState::default())
            .apply(Action::SetGoal(format!("  {}  ", "가".repeat(10))))
            .apply(Action::SetAnswer {
                id: "version".to_string(),
                value: "   ".to_string(),
            });
        let state = set_section(state, SectionId::Outputs, 20);
        let state = set_section(state, SectionId::Exceptions, 10);

        assert_eq!(score(&state), 50);
    }

    #[test]
    fn each_threshold_crossing_never_lowers_score() {
        let steps: Vec<Box<dyn Fn(SessionState) -> SessionState>> = vec![
            Box::new(|s| s.apply(Action::SetGoal("열 글자를 넘는 목표 문장".to_string()))),
            Box::new(|s| {
                s.apply(Action::SetAnswer {
                    id: "version".to_string(),
                    value: "n8n 1.100.1".to_string(),
                })
            }),
            Box::new(|s| set_section(s, SectionId::Outputs, 21)),
            Box::new(|s| set_section(s, SectionId::Validation, 21)),
            Box::new(|s| set_section(s, SectionId::Exceptions, 11)),
        ];

        let mut state = blank_sections(SessionState::default());
        let mut previous = score(&state);
        for step in &steps {
            state = step(state);
            let current = score(&state);
            assert!(current > previous);
            assert!((50..=100).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(75), Grade::B);
        assert_eq!(Grade::from_score(74), Grade::C);
        assert_eq!(Grade::from_score(60), Grade::C);
        assert_eq!(Grade::from_score(59), Grade::D);
        assert_eq!(Grade::D.to_string(), "D");
    }
}
