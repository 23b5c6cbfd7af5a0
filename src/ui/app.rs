use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::export;
use crate::wizard::{self, Action, CustomQuestionDraft, Question, Quality, SessionState};
use super::form::{self, Field, FieldKind};
use super::renderer::{VisualLineInfo, editor_width, find_cursor_visual_position, visual_lines};

const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);
const STATUS_DURATION: Duration = Duration::from_millis(1600);

pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

pub struct App {
    state: SessionState,
    questions: Vec<Question>,
    orphaned_answers: Vec<String>,
    draft: CustomQuestionDraft,
    focus: usize,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub should_quit: bool,
    pub cursor_visible: bool,
    cursor_blink_at: Instant,
    pub scroll_offset: u16,
    keyboard_enhancement_enabled: bool,
    export_dir: PathBuf,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(state: SessionState, export_dir: PathBuf) -> Self {
        let questions = wizard::active_questions(&state);
        let mut app = Self {
            state,
            questions,
            orphaned_answers: Vec::new(),
            draft: CustomQuestionDraft::default(),
            focus: 0,
            input_buffer: String::new(),
            cursor_position: 0,
            terminal_width: 80,
            terminal_height: 24,
            should_quit: false,
            cursor_visible: true,
            cursor_blink_at: Instant::now(),
            scroll_offset: 0,
            keyboard_enhancement_enabled: false,
            export_dir,
            status: None,
        };
        app.load_focused_field();
        app
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn orphaned_answers(&self) -> &[String] {
        &self.orphaned_answers
    }

    pub fn draft(&self) -> &CustomQuestionDraft {
        &self.draft
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn quality(&self) -> Quality {
        wizard::compute_quality(&self.state)
    }

    pub fn prompt_text(&self) -> String {
        wizard::assemble_prompt(&self.state)
    }

    pub fn fields(&self) -> Vec<Field> {
        form::fields_for_step(&self.state, &self.questions, &self.draft)
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.fields().get(self.focus).copied()
    }

    fn focused_kind(&self) -> Option<FieldKind> {
        self.focused_field()
            .map(|field| form::field_kind(field, &self.questions))
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.reset_cursor_blink();

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::PageUp => {
                self.scroll_up();
                return;
            }
            KeyCode::PageDown => {
                self.scroll_down();
                return;
            }
            KeyCode::F(2) => {
                self.dispatch(Action::SetMode(self.state.mode.toggled()));
                return;
            }
            KeyCode::F(3) => {
                self.dispatch(Action::SetLanguage(self.state.language.next()));
                return;
            }
            KeyCode::Tab => {
                self.move_focus(true);
                return;
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                return;
            }
            KeyCode::Char(c) if ctrl => {
                self.handle_shortcut(c);
                return;
            }
            _ => {}
        }

        match self.focused_kind() {
            Some(FieldKind::Choice) => self.handle_choice_input(key_event),
            Some(FieldKind::Text { multiline }) => self.handle_text_input(key_event, multiline),
            None => {}
        }
    }

    pub fn handle_paste(&mut self, text: String) {
        self.reset_cursor_blink();

        match self.focused_kind() {
            Some(FieldKind::Text { multiline: true }) => {
                let cleaned = text.replace("\r\n", "\n").replace('\r', "\n");
                self.insert_text_at_cursor(&cleaned);
                self.commit_buffer();
            }
            Some(FieldKind::Text { multiline: false }) => {
                let cleaned = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
                self.insert_text_at_cursor(&cleaned);
                self.commit_buffer();
            }
            Some(FieldKind::Choice) | None => {}
        }
    }

    pub fn tick(&mut self) {
        self.tick_cursor_blink();
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.shown_at.elapsed() >= STATUS_DURATION)
        {
            self.status = None;
        }
    }

    fn tick_cursor_blink(&mut self) {
        if self.cursor_blink_at.elapsed() >= CURSOR_BLINK_INTERVAL {
            self.cursor_visible = !self.cursor_visible;
            self.cursor_blink_at = Instant::now();
        }
    }

    fn reset_cursor_blink(&mut self) {
        self.cursor_visible = true;
        self.cursor_blink_at = Instant::now();
    }

    pub fn scroll_up(&mut self) {
        let page_size = self.terminal_height.saturating_sub(6);
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }

    pub fn scroll_down(&mut self) {
        let page_size = self.terminal_height.saturating_sub(6);
        self.scroll_offset = self.scroll_offset.saturating_add(page_size);
    }

    pub fn set_keyboard_enhancement_enabled(&mut self, enabled: bool) {
        self.keyboard_enhancement_enabled = enabled;
    }

    pub fn help_text(&self) -> &str {
        match self.state.step.get() {
            1 => "[Tab] 이동  [←/→] 툴 선택  [Ctrl+N] 다음  [F2] 모드  [F3] 언어  [Esc] 종료",
            2 => "[Tab] 이동  [Ctrl+A] 질문 추가  [Ctrl+D] 질문 삭제  [Ctrl+N/P] 다음/이전  [Ctrl+G] 처음으로  [Esc] 종료",
            3 => {
                if self.keyboard_enhancement_enabled {
                    "[Tab] 이동  [Shift+Enter] 줄바꿈  [Ctrl+N/P] 다음/이전  [Ctrl+G] 처음으로  [Esc] 종료"
                } else {
                    "[Tab] 이동  [Alt+Enter] 줄바꿈  [Ctrl+N/P] 다음/이전  [Ctrl+G] 처음으로  [Esc] 종료"
                }
            }
            4 => "[PgUp/PgDn] 스크롤  [Ctrl+N/P] 다음/이전  [Ctrl+G] 처음으로  [Esc] 종료",
            _ => "[Ctrl+Y] 복사  [Ctrl+S] 파일 저장  [←/→] 언어  [Ctrl+P] 이전  [Ctrl+G] 처음으로  [Esc] 종료",
        }
    }

    fn handle_shortcut(&mut self, c: char) {
        match c.to_ascii_lowercase() {
            'n' => self.go_next(),
            'p' => self.dispatch(Action::PrevStep),
            'g' => self.dispatch(Action::FirstStep),
            'a' if self.state.step.get() == 2 => self.add_custom_question(),
            'd' if self.state.step.get() == 2 => self.remove_focused_custom_question(),
            's' if self.state.step.get() == 5 => self.save_export(),
            'y' if self.state.step.get() == 5 => self.copy_prompt(),
            'c' => self.should_quit = true,
            _ => {}
        }
    }

    fn go_next(&mut self) {
        if !self.state.can_leave_current_step() {
            self.show_status("목표를 입력해야 다음 단계로 이동할 수 있습니다.", true);
            return;
        }
        self.dispatch(Action::NextStep);
    }

    fn handle_choice_input(&mut self, key_event: KeyEvent) {
        let forward = match key_event.code {
            KeyCode::Right | KeyCode::Char(' ') => true,
            KeyCode::Left => false,
            KeyCode::Enter => {
                self.move_focus(true);
                return;
            }
            _ => return,
        };

        let Some(field) = self.focused_field() else {
            return;
        };
        match field {
            Field::Tool => {
                self.dispatch(Action::SetTool(form::cycle_tool(self.state.ai_tool, forward)));
            }
            Field::Language => {
                self.dispatch(Action::SetLanguage(form::cycle_language(
                    self.state.language,
                    forward,
                )));
            }
            Field::DraftKind => {
                self.draft.kind = form::cycle_draft_kind(self.draft.kind, forward);
            }
            Field::Answer(index) => {
                let Some(question) = self.questions.get(index) else {
                    return;
                };
                let current = self.state.answer(&question.id).unwrap_or_default();
                let value = form::cycle_option(question.options(), current, forward);
                let id = question.id.clone();
                self.dispatch(Action::SetAnswer { id, value });
            }
            Field::Goal | Field::DraftLabel | Field::DraftOptions | Field::Section(_) => {}
        }
    }

    fn handle_text_input(&mut self, key_event: KeyEvent, multiline: bool) {
        match key_event.code {
            KeyCode::Enter if multiline && self.is_newline_modifier(key_event.modifiers) => {
                self.insert_char_at_cursor('\n');
                self.commit_buffer();
            }
            KeyCode::Enter => match self.focused_field() {
                Some(Field::DraftLabel | Field::DraftOptions) => self.add_custom_question(),
                _ => self.move_focus(true),
            },
            KeyCode::Backspace => {
                self.delete_char_before_cursor();
                self.commit_buffer();
            }
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up if multiline => self.move_cursor_up(),
            KeyCode::Down if multiline => self.move_cursor_down(),
            KeyCode::Up => self.move_focus(false),
            KeyCode::Down => self.move_focus(true),
            KeyCode::Char(c) => {
                self.insert_char_at_cursor(c);
                self.commit_buffer();
            }
            _ => {}
        }
    }

    /// 상태를 새 값으로 교체하고 파생 값(질문 목록, 고아 답변)을 다시 계산한다.
    fn dispatch(&mut self, action: Action) {
        let previous_step = self.state.step;
        tracing::debug!(?action, "상태 전이");

        self.state = self.state.apply(action);

        let questions = wizard::active_questions(&self.state);
        if questions != self.questions {
            let orphaned = self.state.orphaned_answers(&self.questions, &questions);
            if !orphaned.is_empty() {
                tracing::info!(ids = ?orphaned, "질문 목록 변경으로 사용되지 않는 답변");
            }
            self.orphaned_answers = orphaned;
            self.questions = questions;
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(&self.state) {
                Ok(snapshot) => tracing::trace!(%snapshot, "세션 스냅샷"),
                Err(err) => tracing::trace!(error = %err, "세션 직렬화 실패"),
            }
        }

        if self.state.step != previous_step {
            tracing::info!(step = self.state.step.get(), name = self.state.step.name(), "단계 이동");
            self.focus = 0;
            self.scroll_offset = 0;
            self.orphaned_answers.clear();
        }

        let field_count = self.fields().len();
        if self.focus >= field_count {
            self.focus = field_count.saturating_sub(1);
        }
        self.load_focused_field();
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.fields().len();
        if count == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.load_focused_field();
    }

    fn load_focused_field(&mut self) {
        let value = match self.focused_field() {
            Some(Field::Goal) => self.state.goal_text.clone(),
            Some(Field::Answer(index)) => self
                .questions
                .get(index)
                .and_then(|q| self.state.answer(&q.id))
                .unwrap_or_default()
                .to_string(),
            Some(Field::DraftLabel) => self.draft.label.clone(),
            Some(Field::DraftOptions) => self.draft.options.clone(),
            Some(Field::Section(id)) => self.state.sections.get(id).to_string(),
            Some(Field::Tool | Field::DraftKind | Field::Language) | None => String::new(),
        };
        self.cursor_position = value.chars().count();
        self.input_buffer = value;
    }

    fn commit_buffer(&mut self) {
        let value = self.input_buffer.clone();
        match self.focused_field() {
            Some(Field::Goal) => self.dispatch_keep_cursor(Action::SetGoal(value)),
            Some(Field::Answer(index)) => {
                if let Some(question) = self.questions.get(index) {
                    let id = question.id.clone();
                    self.dispatch_keep_cursor(Action::SetAnswer { id, value });
                }
            }
            Some(Field::Section(id)) => {
                self.dispatch_keep_cursor(Action::SetSection { id, text: value });
            }
            Some(Field::DraftLabel) => self.draft.label = value,
            Some(Field::DraftOptions) => self.draft.options = value,
            Some(Field::Tool | Field::DraftKind | Field::Language) | None => {}
        }
    }

    /// 편집 중인 필드의 커서를 유지하며 상태를 갱신한다.
    fn dispatch_keep_cursor(&mut self, action: Action) {
        let cursor = self.cursor_position;
        let field = self.focused_field();
        self.dispatch(action);

        // 목표 문장이 바뀌어 질문 수가 달라져도 편집 중인 필드에 머문다.
        if let Some(field) = field
            && let Some(index) = self.fields().iter().position(|f| *f == field)
        {
            self.focus = index;
            self.load_focused_field();
        }
        self.cursor_position = cursor.min(self.input_buffer.chars().count());
    }

    fn add_custom_question(&mut self) {
        if self.draft.label.trim().is_empty() {
            return;
        }
        let draft = std::mem::take(&mut self.draft);
        tracing::info!(label = %draft.label.trim(), kind = ?draft.kind, "사용자 질문 추가");
        self.dispatch(Action::AddCustomQuestion(draft));
        self.show_status("질문이 추가되었습니다.", false);
    }

    fn remove_focused_custom_question(&mut self) {
        let Some(Field::Answer(index)) = self.focused_field() else {
            return;
        };
        let Some(question) = self.questions.get(index) else {
            return;
        };
        if !question.is_custom() {
            self.show_status("기본 질문은 삭제할 수 없습니다.", true);
            return;
        }
        let id = question.id.clone();
        tracing::info!(%id, "사용자 질문 삭제");
        self.dispatch(Action::RemoveCustomQuestion(id));
    }

    fn save_export(&mut self) {
        match export::write_export(&self.export_dir, &self.prompt_text(), Utc::now()) {
            Ok(path) => self.show_status(&format!("저장되었습니다: {}", path.display()), false),
            Err(err) => {
                tracing::warn!(error = %err, "프롬프트 파일 저장 실패");
                self.show_status(&format!("저장 실패: {}", err), true);
            }
        }
    }

    fn copy_prompt(&mut self) {
        if export::copy_to_clipboard(&self.prompt_text()) {
            self.show_status("복사됨", false);
        }
    }

    fn show_status(&mut self, text: &str, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    fn is_newline_modifier(&self, modifiers: KeyModifiers) -> bool {
        if self.keyboard_enhancement_enabled {
            modifiers.contains(KeyModifiers::SHIFT)
        } else {
            modifiers.contains(KeyModifiers::ALT)
        }
    }

    fn insert_char_at_cursor(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input_buffer, self.cursor_position);
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    fn insert_text_at_cursor(&mut self, text: &str) {
        let byte_pos = char_to_byte_index(&self.input_buffer, self.cursor_position);
        self.input_buffer.insert_str(byte_pos, text);
        self.cursor_position += text.chars().count();
    }

    fn delete_char_before_cursor(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let byte_pos = char_to_byte_index(&self.input_buffer, self.cursor_position);
        self.input_buffer.remove(byte_pos);
    }

    fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn move_cursor_up(&mut self) {
        let visual_lines = self.compute_visual_lines();
        let (current_line, current_col) =
            find_cursor_visual_position(self.cursor_position, &visual_lines);

        if current_line == 0 {
            self.move_focus(false);
            return;
        }

        let target = &visual_lines[current_line - 1];
        let max_col = if target.is_last_of_logical {
            target.char_count
        } else {
            target.char_count.saturating_sub(1)
        };
        self.cursor_position = target.char_start + current_col.min(max_col);
    }

    fn move_cursor_down(&mut self) {
        let visual_lines = self.compute_visual_lines();
        let (current_line, current_col) =
            find_cursor_visual_position(self.cursor_position, &visual_lines);

        if current_line + 1 >= visual_lines.len() {
            self.move_focus(true);
            return;
        }

        let target = &visual_lines[current_line + 1];
        let max_col = if target.is_last_of_logical {
            target.char_count
        } else {
            target.char_count.saturating_sub(1)
        };
        self.cursor_position = target.char_start + current_col.min(max_col);
    }

    fn compute_visual_lines(&self) -> Vec<VisualLineInfo> {
        visual_lines(&self.input_buffer, editor_width(self.terminal_width))
    }
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
