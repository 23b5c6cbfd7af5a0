use crate::wizard::{
    AiTool, CustomQuestionDraft, DraftKind, Language, Question, QuestionKind, SectionId,
    SessionState,
};

/// 현재 단계에서 포커스를 받을 수 있는 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Tool,
    Goal,
    Answer(usize),
    DraftLabel,
    DraftKind,
    DraftOptions,
    Section(SectionId),
    Language,
}

/// 필드의 편집 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { multiline: bool },
    Choice,
}

pub fn fields_for_step(
    state: &SessionState,
    questions: &[Question],
    draft: &CustomQuestionDraft,
) -> Vec<Field> {
    match state.step.get() {
        1 => vec![Field::Tool, Field::Goal],
        2 => {
            let mut fields: Vec<Field> = (0..questions.len()).map(Field::Answer).collect();
            fields.push(Field::DraftLabel);
            fields.push(Field::DraftKind);
            if draft.kind == DraftKind::Select {
                fields.push(Field::DraftOptions);
            }
            fields
        }
        3 => SectionId::ALL.into_iter().map(Field::Section).collect(),
        5 => vec![Field::Language],
        _ => Vec::new(),
    }
}

pub fn field_kind(field: Field, questions: &[Question]) -> FieldKind {
    match field {
        Field::Tool | Field::DraftKind | Field::Language => FieldKind::Choice,
        Field::Goal | Field::Section(_) => FieldKind::Text { multiline: true },
        Field::DraftLabel | Field::DraftOptions => FieldKind::Text { multiline: false },
        Field::Answer(index) => match questions.get(index).map(|q| &q.kind) {
            Some(QuestionKind::Select { .. }) => FieldKind::Choice,
            Some(QuestionKind::Textarea) => FieldKind::Text { multiline: true },
            Some(QuestionKind::Text) | None => FieldKind::Text { multiline: false },
        },
    }
}

/// 선택형 답변 순환. 빈 값("선택")이 맨 앞에 온다.
pub fn cycle_option(options: &[String], current: &str, forward: bool) -> String {
    let slots = options.len() + 1;
    let index = options
        .iter()
        .position(|option| option == current)
        .map_or(0, |i| i + 1);
    let next = if forward {
        (index + 1) % slots
    } else {
        (index + slots - 1) % slots
    };
    if next == 0 {
        String::new()
    } else {
        options[next - 1].clone()
    }
}

pub fn cycle_tool(tool: AiTool, forward: bool) -> AiTool {
    if forward { tool.next() } else { tool.previous() }
}

pub fn cycle_language(language: Language, forward: bool) -> Language {
    if forward { language.next() } else { language.previous() }
}

pub fn cycle_draft_kind(kind: DraftKind, forward: bool) -> DraftKind {
    if forward { kind.next() } else { kind.previous() }
}
