use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use todo_core::Task;

use crate::app::{App, Focus};

const TITLE: &str = "Add a new task!";
const PLACEHOLDER: &str = "Type your task";

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_title(frame, chunks[0]);
    draw_input(frame, app, chunks[1]);
    draw_tasks(frame, app, chunks[2]);
    draw_status(frame, app, chunks[3]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));
    frame.render_widget(title, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let text = if app.view.pending_input.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.view.pending_input.as_str())
    };
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" New task (Enter to add) ")
            .border_style(focus_style(focused)),
    );
    frame.render_widget(input, area);

    if focused {
        frame.set_cursor(cursor_x(area, &app.view.pending_input), area.y + 1);
    }
}

/// Column after the typed text, pinned inside the input box.
fn cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}

pub fn task_line(task: &Task) -> Line<'_> {
    if task.completed {
        Line::from(vec![
            Span::styled("[x] ", Style::default().fg(Color::Green)),
            Span::styled(
                task.task.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw("[ ] "),
            Span::styled(task.task.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    }
}

fn draw_tasks(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::List;
    let items: Vec<ListItem> = app
        .view
        .tasks
        .iter()
        .map(|task| ListItem::new(task_line(task)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Tasks ({}) ", app.view.tasks.len()))
                .border_style(focus_style(focused)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused && !app.view.tasks.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let refreshed = app
        .last_refresh
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let help = match app.focus {
        Focus::Input => "Tab: list  Esc: quit",
        Focus::List => "Space: done  d: delete  r: refresh  Tab: input  q: quit",
    };
    let status = Line::from(vec![
        Span::styled(app.backend.as_str(), Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            " | {} done | refreshed {} | ",
            app.view.completed_count(),
            refreshed
        )),
        Span::styled(help, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}
