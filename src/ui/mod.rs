use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::domain::task::Task;
use crate::repo::TaskStorage;
use crate::view::Section;

pub fn run<S: TaskStorage>(mut app: App<S>, tick_rate: Duration) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = loop {
        if let Err(err) = terminal.draw(|f| draw(f, &app)) {
            break Err(err.into());
        }

        match event::poll(tick_rate) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => break Err(err.into()),
        }
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, key.code) {
                    break Ok(());
                }
            }
            Ok(_) => {}
            Err(err) => break Err(err.into()),
        }
    };

    cleanup_terminal(&mut terminal)?;
    res
}

/// Returns `true` when the user asked to quit.
fn handle_key<S: TaskStorage>(app: &mut App<S>, code: KeyCode) -> bool {
    match app.mode {
        InputMode::Normal => match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => app.select_next(),
            KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
            KeyCode::Char('a') | KeyCode::Char('n') => app.start_editing(),
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
            KeyCode::Char('t') => app.move_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
            KeyCode::Char('r') => {
                app.reload();
                app.set_status("Reloaded");
            }
            _ => {}
        },
        InputMode::Editing => match code {
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Enter => app.add_task(),
            KeyCode::Tab => app.toggle_input_today(),
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char(c) => app.input.push(c),
            _ => {}
        },
    }

    false
}

fn draw<S: TaskStorage>(f: &mut ratatui::Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(3),
        ])
        .split(f.area());

    f.render_widget(render_header(app), chunks[0]);

    // `selected` indexes the flattened rows; translate it per section.
    let today_len = app.view.today_tasks().count();
    for (section, area) in Section::ALL.into_iter().zip([chunks[1], chunks[2]]) {
        let offset = match section {
            Section::Today => 0,
            Section::Upcoming => today_len,
        };
        let tasks: Vec<&Task> = app.view.tasks_in(section).collect();
        let mut state = ListState::default();
        if app.mode == InputMode::Normal
            && app.selected >= offset
            && app.selected < offset + tasks.len()
        {
            state.select(Some(app.selected - offset));
        }
        f.render_stateful_widget(render_section(section, &tasks), area, &mut state);
    }

    f.render_widget(render_footer(app), chunks[3]);
}

fn render_header<S: TaskStorage>(app: &App<S>) -> Paragraph<'static> {
    let total = app.row_count();
    let done = app.view.tasks().iter().filter(|t| t.is_done).count();
    let summary = format!("Open: {} / All: {}", total.saturating_sub(done), total);
    let line = Line::from(vec![
        Span::styled("daylist", Style::default().fg(Color::Cyan)),
        Span::raw("  |  "),
        Span::styled(summary, Style::default().fg(Color::Yellow)),
    ]);
    Paragraph::new(line)
        .block(Block::default().title("Overview").borders(Borders::ALL))
        .wrap(Wrap { trim: true })
}

fn render_section<'a>(section: Section, tasks: &[&'a Task]) -> List<'a> {
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let symbol = if task.is_done { "✔" } else { "•" };
            let style = if task.is_done {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(format!(" {symbol} {}", task.detail))).style(style)
        })
        .collect();

    List::new(items)
        .block(
            Block::default()
                .title(format!("{} ({})", section.title(), tasks.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .highlight_symbol("➤ ")
}

fn render_footer<S: TaskStorage>(app: &App<S>) -> Paragraph<'_> {
    match app.mode {
        InputMode::Normal => {
            let msg = app.status.as_deref().unwrap_or(
                "q quit ; a add ; Space done ; t today/upcoming ; d delete done ; r reload",
            );
            Paragraph::new(msg).block(Block::default().title("Normal").borders(Borders::ALL))
        }
        InputMode::Editing => {
            let flag = if app.input_today {
                Span::styled("[today] ", Style::default().fg(Color::Green))
            } else {
                Span::styled("[upcoming] ", Style::default().fg(Color::DarkGray))
            };
            let line = Line::from(vec![
                flag,
                Span::raw("New task: "),
                Span::styled(&app.input, Style::default().fg(Color::Yellow)),
                Span::raw("█"),
            ]);
            Paragraph::new(line).block(
                Block::default()
                    .title("Input (Enter add / Tab today / Esc cancel)")
                    .borders(Borders::ALL),
            )
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
