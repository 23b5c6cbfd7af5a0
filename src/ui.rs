pub mod app;
mod error;
mod event;
mod form;
mod renderer;

pub use error::UiError;

use std::io::stdout;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste,
    Event, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal;

use crate::config::Config;
use app::App;
use renderer::TerminalWriter;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(config: &Config) -> Result<(), UiError> {
    terminal::enable_raw_mode()?;
    crossterm::execute!(
        stdout(),
        EnableBracketedPaste,
        cursor::Hide,
        cursor::SetCursorStyle::SteadyBlock,
    )?;

    let keyboard_enhancement_enabled = terminal::supports_keyboard_enhancement()
        .unwrap_or(false);

    if keyboard_enhancement_enabled {
        crossterm::execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let mut app = App::new(config.initial_session(), config.export_dir().to_path_buf());
    app.set_keyboard_enhancement_enabled(keyboard_enhancement_enabled);
    tracing::info!(
        mode = ?app.state().mode,
        tool = %app.state().ai_tool,
        language = ?app.state().language,
        keyboard_enhancement_enabled,
        "위저드 시작"
    );

    let mut writer = TerminalWriter::new()?;
    let result = event_loop(&mut app, &mut writer);
    writer.finalize()?;

    if keyboard_enhancement_enabled {
        crossterm::execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }

    crossterm::execute!(
        stdout(),
        cursor::Show,
        cursor::SetCursorStyle::DefaultUserShape,
        DisableBracketedPaste,
    )?;
    terminal::disable_raw_mode()?;

    tracing::info!(step = app.state().step.get(), "위저드 종료");
    result
}

fn event_loop(app: &mut App, writer: &mut TerminalWriter) -> Result<(), UiError> {
    loop {
        app.tick();
        let (width, height) = writer.terminal_size();
        app.terminal_width = width;
        app.terminal_height = height;
        writer.render(app)?;

        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            match event {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    app.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    app.handle_paste(text);
                }
                Event::Resize(width, height) => {
                    writer.handle_resize()?;
                    app.terminal_width = width;
                    app.terminal_height = height;
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
