use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tool::cycle;

pub const CUSTOM_ID_PREFIX: &str = "custom_";

/// 인터뷰 단계에서 보여줄 입력 필드의 형태.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Textarea,
    Select { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    pub placeholder: Option<String>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn text(id: &str, label: &str, placeholder: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: Some(placeholder.to_string()),
            kind: QuestionKind::Text,
        }
    }

    pub fn textarea(id: &str, label: &str, placeholder: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: Some(placeholder.to_string()),
            kind: QuestionKind::Textarea,
        }
    }

    pub fn select(id: &str, label: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            placeholder: None,
            kind: QuestionKind::Select {
                options: options.iter().map(|option| option.to_string()).collect(),
            },
        }
    }

    /// 사용자가 추가한 질문만 삭제할 수 있다.
    pub fn is_custom(&self) -> bool {
        is_custom_id(&self.id)
    }

    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Select { options } => options,
            QuestionKind::Text | QuestionKind::Textarea => &[],
        }
    }
}

pub fn is_custom_id(id: &str) -> bool {
    id.starts_with(CUSTOM_ID_PREFIX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    #[default]
    Text,
    Textarea,
    Select,
}

impl DraftKind {
    const ALL: [DraftKind; 3] = [DraftKind::Text, DraftKind::Textarea, DraftKind::Select];

    pub fn label(self) -> &'static str {
        match self {
            DraftKind::Text => "텍스트",
            DraftKind::Textarea => "긴 텍스트",
            DraftKind::Select => "선택",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

/// 아직 질문 목록에 추가되지 않은 사용자 질문 입력값.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomQuestionDraft {
    pub label: String,
    pub kind: DraftKind,
    /// 쉼표로 구분된 선택지. `DraftKind::Select`에서만 사용한다.
    pub options: String,
}

impl CustomQuestionDraft {
    /// 라벨이 비어 있으면 `None`을 반환한다.
    pub fn build(&self) -> Option<Question> {
        self.build_with_suffix(&random_suffix())
    }

    fn build_with_suffix(&self, suffix: &str) -> Option<Question> {
        let label = self.label.trim();
        if label.is_empty() {
            return None;
        }

        let slug = label
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        let id = format!("{}{}_{}", CUSTOM_ID_PREFIX, slug, suffix);

        let kind = match self.kind {
            DraftKind::Text => QuestionKind::Text,
            DraftKind::Textarea => QuestionKind::Textarea,
            DraftKind::Select => {
                let options: Vec<String> = self
                    .options
                    .split(',')
                    .map(str::trim)
                    .filter(|option| !option.is_empty())
                    .map(str::to_string)
                    .collect();
                if options.is_empty() {
                    QuestionKind::Text
                } else {
                    QuestionKind::Select { options }
                }
            }
        };

        Some(Question {
            id,
            label: label.to_string(),
            placeholder: None,
            kind,
        })
    }
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_with_blank_label_is_rejected() {
        let draft = CustomQuestionDraft {
            label: "   ".to_string(),
            ..Default::default()
        };
        assert!(draft.build().is_none());
    }

    #[test]
    fn draft_id_is_slugged_and_prefixed() {
        let draft = CustomQuestionDraft {
            label: "  Target  Audience ".to_string(),
            ..Default::default()
        };
        let question = draft.build_with_suffix("abc123").unwrap();

        assert_eq!(question.id, "custom_target_audience_abc123");
        assert_eq!(question.label, "Target  Audience");
        assert_eq!(question.kind, QuestionKind::Text);
        assert!(question.is_custom());
    }

    #[test]
    fn random_ids_differ_between_builds() {
        let draft = CustomQuestionDraft {
            label: "대상 독자".to_string(),
            ..Default::default()
        };
        let first = draft.build().unwrap();
        let second = draft.build().unwrap();

        assert!(first.id.starts_with("custom_대상_독자_"));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn select_draft_splits_and_trims_options() {
        let draft = CustomQuestionDraft {
            label: "톤".to_string(),
            kind: DraftKind::Select,
            options: " 격식, 친근 ,, 유머 ".to_string(),
        };
        let question = draft.build_with_suffix("x").unwrap();

        assert_eq!(question.options(), ["격식", "친근", "유머"]);
    }

    #[test]
    fn select_draft_without_options_degrades_to_text() {
        let draft = CustomQuestionDraft {
            label: "톤".to_string(),
            kind: DraftKind::Select,
            options: " , ".to_string(),
        };
        let question = draft.build_with_suffix("x").unwrap();

        assert_eq!(question.kind, QuestionKind::Text);
    }

    #[test]
    fn catalog_style_ids_are_not_custom() {
        assert!(!is_custom_id("version"));
        assert!(!is_custom_id("chatgpt_model"));
        assert!(is_custom_id("custom_x_1"));
    }

    #[test]
    fn question_serializes_kind_as_tagged_type() {
        let question = Question::select("creds", "상태", &["모두 적용"]);
        let json = serde_json::to_value(&question).unwrap();

        assert_eq!(json["type"], "select");
        assert_eq!(json["options"][0], "모두 적용");
    }
}
