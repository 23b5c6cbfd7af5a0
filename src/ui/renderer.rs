use std::io::{self, Stdout, stdout};

use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::wizard::session::STEP_NAMES;
use crate::wizard::{QuestionKind, SectionId};
use super::app::App;
use super::form::{Field, FieldKind, field_kind};

const TITLE: &str = "초보자도 쉽게 만드는 AI 프롬프트";
const INSPECTOR_WIDTH: u16 = 30;
const MIN_WIDTH_FOR_INSPECTOR: u16 = 80;
const FIELD_INDENT: &str = "  ";
const FOCUS_PREFIX: &str = "> ";
/// 테두리 두 칸과 커서 한 칸.
const EDITOR_RESERVED: usize = 3;

pub struct TerminalWriter {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalWriter {
    pub fn new() -> io::Result<Self> {
        crossterm::execute!(stdout(), EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal
            .size()
            .map(|size| (size.width, size.height))
            .unwrap_or((80, 24))
    }

    pub fn render(&mut self, app: &mut App) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame, app))?;
        Ok(())
    }

    pub fn handle_resize(&mut self) -> io::Result<()> {
        self.terminal.autoresize()
    }

    pub fn finalize(mut self) -> io::Result<()> {
        self.terminal.show_cursor()?;
        crossterm::execute!(stdout(), LeaveAlternateScreen)
    }
}

/// 입력 필드 한 줄에 들어가는 최대 표시 폭.
pub fn editor_width(terminal_width: u16) -> usize {
    let main_width = main_width(terminal_width) as usize;
    main_width
        .saturating_sub(EDITOR_RESERVED + FIELD_INDENT.len())
        .max(1)
}

fn main_width(terminal_width: u16) -> u16 {
    if terminal_width >= MIN_WIDTH_FOR_INSPECTOR {
        terminal_width - INSPECTOR_WIDTH
    } else {
        terminal_width
    }
}

pub struct VisualLineInfo {
    pub char_start: usize,
    pub char_count: usize,
    pub is_last_of_logical: bool,
}

pub fn visual_lines(text: &str, width: usize) -> Vec<VisualLineInfo> {
    let logical_lines: Vec<&str> = text.split('\n').collect();
    let mut result = Vec::new();
    let mut global_char_offset = 0;

    for (logical_idx, logical_line) in logical_lines.iter().enumerate() {
        let wrapped = wrap_text_by_char_width(logical_line, width);
        let wrap_count = wrapped.len();
        let mut line_char_offset = 0;

        for (wrap_idx, visual_text) in wrapped.iter().enumerate() {
            let char_count = visual_text.chars().count();
            result.push(VisualLineInfo {
                char_start: global_char_offset + line_char_offset,
                char_count,
                is_last_of_logical: wrap_idx == wrap_count - 1,
            });
            line_char_offset += char_count;
        }

        global_char_offset += logical_line.chars().count();
        if logical_idx < logical_lines.len() - 1 {
            global_char_offset += 1; // '\n'
        }
    }

    result
}

pub fn find_cursor_visual_position(
    cursor_position: usize,
    visual_lines: &[VisualLineInfo],
) -> (usize, usize) {
    for (i, vl) in visual_lines.iter().enumerate() {
        let vl_end = vl.char_start + vl.char_count;

        if cursor_position >= vl.char_start && cursor_position < vl_end {
            return (i, cursor_position - vl.char_start);
        }

        if cursor_position == vl_end && vl.is_last_of_logical {
            return (i, vl.char_count);
        }
    }

    let last = visual_lines.len().saturating_sub(1);
    (last, visual_lines.get(last).map_or(0, |vl| vl.char_count))
}

/// 표시 폭 기준으로 줄을 나눈다. 빈 문자열도 한 줄로 취급한다.
pub fn wrap_text_by_char_width(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += char_width;
    }

    lines.push(current);
    lines
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(build_header_line(app)), rows[0]);
    frame.render_widget(Paragraph::new(build_stepper_line(app.state().step.get())), rows[1]);

    let (main_area, inspector_area) = split_body(rows[2]);
    render_main(frame, app, main_area);
    if let Some(inspector_area) = inspector_area {
        render_inspector(frame, app, inspector_area);
    }

    frame.render_widget(Paragraph::new(build_footer_lines(app, area.width)), rows[3]);
}

fn split_body(area: Rect) -> (Rect, Option<Rect>) {
    if area.width < MIN_WIDTH_FOR_INSPECTOR {
        return (area, None);
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(INSPECTOR_WIDTH)])
        .split(area);
    (columns[0], Some(columns[1]))
}

fn build_header_line(app: &App) -> Line<'static> {
    let state = app.state();
    Line::from(vec![
        Span::styled(
            TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "   모드: {}  언어: {}  AI 툴: {}",
                state.mode.label(),
                state.language.label(),
                state.ai_tool,
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn build_stepper_line(current: u8) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, name) in STEP_NAMES.iter().enumerate() {
        let number = i as u8 + 1;
        let style = if number <= current {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{} {}", number, name), style));
        if i + 1 < STEP_NAMES.len() {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
    }
    Line::from(spans)
}

fn render_main(frame: &mut Frame, app: &mut App, area: Rect) {
    let (title, lines, focus_line) = match app.state().step.get() {
        1 => build_goal_lines(app),
        2 => build_interview_lines(app),
        3 => build_sections_lines(app),
        4 => build_review_lines(app),
        _ => build_export_lines(app),
    };

    let inner_height = area.height.saturating_sub(2);
    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(inner_height);
    let auto_scroll = focus_line
        .map(|line| (line as u16 + 3).saturating_sub(inner_height))
        .unwrap_or(0);
    let scroll = auto_scroll.saturating_add(app.scroll_offset).min(max_scroll);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));
    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);

    app.scroll_offset = app.scroll_offset.min(max_scroll.saturating_sub(auto_scroll));
}

type StepView = (&'static str, Vec<Line<'static>>, Option<usize>);

fn build_goal_lines(app: &App) -> StepView {
    let mut builder = FieldLines::new(app);

    builder.label("AI 툴 선택", Field::Tool);
    builder.choice(Field::Tool, app.state().ai_tool.name());
    builder.hint("선택한 툴에 맞춰 2단계 질문이 자동으로 최적화됩니다.");
    builder.blank();
    builder.label("최종 목표", Field::Goal);
    builder.hint("예: n8n으로 자동화 파이프라인을 JSON 파일로 만들어줘.");
    builder.text(Field::Goal, &app.state().goal_text, "여기에 입력하세요");
    builder.blank();
    builder.hint(&format!("진행률: {}%", app.state().goal_progress()));

    ("1) 최종 목표 한 문장으로 입력", builder.lines, builder.focus_line)
}

fn build_interview_lines(app: &App) -> StepView {
    let state = app.state();
    let questions = app.questions();
    let mut builder = FieldLines::new(app);

    builder.hint(&state.research_summary);
    builder.hint("1단계 정보/모드에 따라 자동으로 질문이 최적화됩니다.");
    if !app.orphaned_answers().is_empty() {
        builder.notice(&format!(
            "질문 목록이 바뀌어 사용되지 않는 답변: {}",
            app.orphaned_answers().join(", ")
        ));
    }
    builder.blank();

    for (index, question) in questions.iter().enumerate() {
        let field = Field::Answer(index);
        let label = if question.is_custom() {
            format!("{}  [사용자 질문 · Ctrl+D 삭제]", question.label)
        } else {
            question.label.clone()
        };
        builder.label(&label, field);

        let answer = state.answer(&question.id).unwrap_or_default();
        match &question.kind {
            QuestionKind::Select { .. } => {
                builder.choice(field, if answer.is_empty() { "선택" } else { answer });
            }
            QuestionKind::Text | QuestionKind::Textarea => {
                builder.text(field, answer, question.placeholder.as_deref().unwrap_or(""));
            }
        }
    }

    builder.blank();
    if state.all_questions_answered(questions) {
        builder.hint("모든 질문에 답변했습니다.");
    } else {
        let remaining = questions.iter().filter(|q| !state.is_answered(&q.id)).count();
        builder.notice(&format!("아직 답변하지 않은 질문이 {}개 있습니다.", remaining));
    }

    builder.blank();
    builder.heading("질문 추가");
    let draft = app.draft();
    builder.label("질문 라벨", Field::DraftLabel);
    builder.text(Field::DraftLabel, &draft.label, "예: 대상 독자는 누구인가요?");
    builder.label("유형", Field::DraftKind);
    builder.choice(Field::DraftKind, draft.kind.label());
    if app.fields().contains(&Field::DraftOptions) {
        builder.label("선택지 (쉼표로 구분)", Field::DraftOptions);
        builder.text(Field::DraftOptions, &draft.options, "예: 개발자, 기획자, 디자이너");
    }
    builder.hint("[Enter/Ctrl+A] 질문 추가");

    ("2) 요건 질문", builder.lines, builder.focus_line)
}

fn build_sections_lines(app: &App) -> StepView {
    let mut builder = FieldLines::new(app);

    for id in SectionId::ALL {
        let field = Field::Section(id);
        builder.label(id.title(), field);
        builder.text(field, app.state().sections.get(id), "");
        builder.blank();
    }
    builder.hint("섹션 톤/길이/예시를 자유롭게 수정하세요.");

    ("3) 섹션별 구성", builder.lines, builder.focus_line)
}

fn build_review_lines(app: &App) -> StepView {
    let quality = app.quality();
    let mut builder = FieldLines::new(app);

    builder.heading(&format!("품질 점수: {} / 100   등급: {}", quality.score, quality.grade));
    if quality.hints.is_empty() {
        builder.hint("개선 제안이 없습니다.");
    } else {
        for hint in &quality.hints {
            builder.notice(&format!("• {}", hint));
        }
    }
    builder.blank();
    builder.document(&app.prompt_text());

    ("4) 조립 & 리뷰", builder.lines, None)
}

fn build_export_lines(app: &App) -> StepView {
    let mut builder = FieldLines::new(app);

    builder.label("출력 언어", Field::Language);
    builder.choice(Field::Language, app.state().language.label());
    builder.blank();
    builder.document(&app.prompt_text());

    ("5) 결과", builder.lines, builder.focus_line)
}

/// 단계 화면의 줄을 쌓으면서 포커스된 필드 위치를 기억한다.
struct FieldLines<'a> {
    app: &'a App,
    focused: Option<Field>,
    lines: Vec<Line<'static>>,
    focus_line: Option<usize>,
}

impl<'a> FieldLines<'a> {
    fn new(app: &'a App) -> Self {
        Self {
            app,
            focused: app.focused_field(),
            lines: Vec::new(),
            focus_line: None,
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn heading(&mut self, text: &str) {
        self.lines.push(Line::from(Span::styled(
            text.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    fn hint(&mut self, text: &str) {
        for line in text.lines() {
            self.lines.push(Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    fn notice(&mut self, text: &str) {
        self.lines.push(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }

    fn document(&mut self, text: &str) {
        for line in text.lines() {
            let style = if line.starts_with('#') {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            self.lines.push(Line::from(Span::styled(line.to_string(), style)));
        }
    }

    fn label(&mut self, text: &str, field: Field) {
        let focused = self.focused == Some(field);
        if focused {
            self.focus_line = Some(self.lines.len());
        }
        let style = if focused {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        self.lines.push(Line::from(Span::styled(text.to_string(), style)));
    }

    fn choice(&mut self, field: Field, value: &str) {
        let line = if self.focused == Some(field) {
            Line::from(vec![
                Span::styled(FOCUS_PREFIX, Style::default().fg(Color::Green)),
                Span::styled(
                    format!("◀ {} ▶", value),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ])
        } else {
            Line::from(format!("{}{}", FIELD_INDENT, value))
        };
        self.lines.push(line);
    }

    fn text(&mut self, field: Field, value: &str, placeholder: &str) {
        let width = editor_width(self.app.terminal_width);

        if self.focused == Some(field)
            && matches!(field_kind(field, self.app.questions()), FieldKind::Text { .. })
        {
            self.push_editor(width);
            return;
        }

        if value.is_empty() {
            self.lines.push(Line::from(Span::styled(
                format!("{}{}", FIELD_INDENT, placeholder),
                Style::default().fg(Color::DarkGray),
            )));
            return;
        }

        for logical in value.split('\n') {
            for visual in wrap_text_by_char_width(logical, width) {
                self.lines.push(Line::from(format!("{}{}", FIELD_INDENT, visual)));
            }
        }
    }

    fn push_editor(&mut self, width: usize) {
        let buffer = &self.app.input_buffer;
        let chars: Vec<char> = buffer.chars().collect();
        let infos = visual_lines(buffer, width);
        let (cursor_line, cursor_col) =
            find_cursor_visual_position(self.app.cursor_position, &infos);

        let text_style = Style::default().fg(Color::Green);
        for (i, info) in infos.iter().enumerate() {
            let line_chars = &chars[info.char_start..info.char_start + info.char_count];
            let prefix = if i == 0 { FOCUS_PREFIX } else { FIELD_INDENT };
            let mut spans = vec![Span::styled(prefix, Style::default().fg(Color::Green))];

            if i == cursor_line {
                let before: String = line_chars[..cursor_col].iter().collect();
                spans.push(Span::styled(before, text_style));

                let at_cursor = line_chars.get(cursor_col).copied();
                if self.app.cursor_visible {
                    match at_cursor {
                        Some(c) => spans.push(Span::styled(
                            c.to_string(),
                            text_style.add_modifier(Modifier::REVERSED),
                        )),
                        None => spans.push(Span::styled("█", text_style)),
                    }
                } else if let Some(c) = at_cursor {
                    spans.push(Span::styled(c.to_string(), text_style));
                }

                let after: String = line_chars.iter().skip(cursor_col + 1).collect();
                spans.push(Span::styled(after, text_style));
            } else {
                let text: String = line_chars.iter().collect();
                spans.push(Span::styled(text, text_style));
            }

            self.lines.push(Line::from(spans));
        }
    }
}

fn render_inspector(frame: &mut Frame, app: &App, area: Rect) {
    let quality = app.quality();
    let ok_style = Style::default().fg(Color::Green);
    let missing_style = Style::default().fg(Color::Red);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "체크리스트",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for item in app.state().checklist(app.questions()) {
        let (mark, style) = if item.ok { ("✔", ok_style) } else { ("✘", missing_style) };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", mark), style),
            Span::raw(item.label),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "품질 점수",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("{} / 100 ({})", quality.score, quality.grade)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("인스펙터");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn build_footer_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let separator_style = Style::default().fg(Color::DarkGray);
    let first = match app.status() {
        Some(status) => {
            let color = if status.is_error { Color::Red } else { Color::Green };
            Line::from(Span::styled(status.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled("─".repeat(width as usize), separator_style)),
    };
    vec![
        first,
        Line::from(Span::styled(app.help_text().to_string(), separator_style)),
    ]
}
