use slicetui::app;
use slicetui::ui;

use std::io;
use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use app::{App, Focus};
use slicetui::slice::DisplayMode;
use ui::layout::{create_layout, dropdown_area};
use ui::{FieldKeyResult, InputField, ModeSelector, SlicePane, SuggestionList};

fn main() -> Result<()> {
    // Check if we're in a proper terminal
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("slicetui must be run in an interactive terminal");
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Create app and enter the host lifecycle
    let mut app = App::new().context("Failed to initialize application")?;
    let result = match app.start().context("Failed to start background refresh") {
        Ok(()) => run_app(&mut terminal, &mut app),
        Err(e) => Err(e),
    };

    app.stop();

    // Restore terminal (always try to restore even on error)
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

/// Action returned from key handling
enum KeyAction {
    Continue,
    Quit,
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Marshal suggester and live-binding results onto this thread.
        app.tick();

        // Draw UI
        terminal.draw(|f| draw_ui(f, app))?;

        // Handle events with timeout so live updates keep flowing
        if poll(Duration::from_millis(50))? {
            match read()? {
                Event::Key(key) => match handle_key_event(app, key) {
                    KeyAction::Continue => {}
                    KeyAction::Quit => return Ok(()),
                },
                Event::Resize(_, _) => {
                    // Next draw picks up the new size.
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    // True globals first: quit and mode toggles work from any focus.
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => return KeyAction::Quit,
        (KeyCode::Char('1'), KeyModifiers::ALT) => {
            app.set_mode(DisplayMode::Large);
            return KeyAction::Continue;
        }
        (KeyCode::Char('2'), KeyModifiers::ALT) => {
            app.set_mode(DisplayMode::Small);
            return KeyAction::Continue;
        }
        (KeyCode::Char('3'), KeyModifiers::ALT) => {
            app.set_mode(DisplayMode::Shortcut);
            return KeyAction::Continue;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => app.cycle_focus(),
        KeyCode::Esc => app.suggestion_selected = None,

        // Up/Down drive the dropdown while the authority field is focused,
        // the slice pane otherwise.
        KeyCode::Up if app.focus == Focus::Authority => app.select_prev_suggestion(),
        KeyCode::Down if app.focus == Focus::Authority => app.select_next_suggestion(),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),

        KeyCode::Enter => {
            let _ = app.accept_suggestion();
        }

        _ => {
            let result = match app.focus {
                Focus::Authority => app.authority.handle_key(key),
                Focus::Path => app.path.handle_key(key),
            };
            if let FieldKeyResult::Changed = result {
                match app.focus {
                    Focus::Authority => app.on_authority_changed(),
                    Focus::Path => app.on_path_changed(),
                }
            }
        }
    }
    KeyAction::Continue
}

fn draw_ui(f: &mut Frame, app: &App) {
    let layout = create_layout(f.area());

    f.render_widget(
        InputField::new(&app.authority, "Authority", app.focus == Focus::Authority),
        layout.authority,
    );
    f.render_widget(
        InputField::new(&app.path, "Path", app.focus == Focus::Path),
        layout.path,
    );
    f.render_widget(ModeSelector::new(app.mode), layout.mode);

    let uri = app.binder.bound_uri().map(|u| u.to_string());
    let updated = app.last_update.map(|t| t.format("%H:%M:%S").to_string());
    f.render_widget(
        SlicePane::new(
            app.current.as_ref(),
            app.mode,
            uri.as_deref(),
            updated.as_deref(),
            app.scroll,
        ),
        layout.slice,
    );

    draw_help_bar(f, layout.help, app);

    // Dropdown last so it overlays the path field.
    if app.focus == Focus::Authority {
        let filtered = app.filtered_suggestions();
        if !filtered.is_empty() {
            let area = dropdown_area(layout.authority, f.area(), filtered.len() as u16);
            f.render_widget(SuggestionList::new(&filtered, app.suggestion_selected), area);
        }
    }
}

fn draw_help_bar(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let suggestion_hint = match app.focus {
        Focus::Authority => " suggestions ",
        Focus::Path => " scroll ",
    };
    let help = Paragraph::new(Line::from(vec![
        Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
        Span::raw("field "),
        Span::styled(" M-1/2/3 ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("mode ({}) ", app.mode.label())),
        Span::styled(" Up/Down ", Style::default().fg(Color::Cyan)),
        Span::raw(suggestion_hint),
        Span::styled(" Enter ", Style::default().fg(Color::Cyan)),
        Span::raw("accept "),
        Span::styled(" C-q ", Style::default().fg(Color::Cyan)),
        Span::raw("quit"),
    ]))
    .style(Style::default().bg(Color::DarkGray));
    f.render_widget(help, area);
}
