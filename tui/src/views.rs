//! View functions: input header, todo list, footer, status bar.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use tuido_core::Filter;

use crate::app::{App, InputMode};

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // The footer row only exists while there are todos.
    let mut constraints = vec![
        Constraint::Length(3), // Input header
        Constraint::Min(3),    // Todo list
    ];
    if app.state().show_footer() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(3)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    draw_input(frame, app, chunks[0]);
    draw_list(frame, app, chunks[1]);
    if app.state().show_footer() {
        draw_footer(frame, app, chunks[2]);
    }
    draw_status_bar(frame, app, chunks[chunks.len() - 1]);
}

/// The new-todo input, always on top.
fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode() == InputMode::Insert;
    let input = app.state().input();

    let (text, style) = if editing {
        // Trailing underscore stands in for the cursor.
        (format!("{input}_"), Style::default().fg(Color::Yellow))
    } else if input.is_empty() {
        (
            "What needs to be done?".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (input.to_string(), Style::default())
    };

    let block_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(text).style(style).block(
        Block::default()
            .title("todos")
            .borders(Borders::ALL)
            .border_style(block_style),
    );

    frame.render_widget(paragraph, area);
}

/// The filtered todo list, or the loading placeholder.
fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    if app.state().is_loading() {
        let paragraph = Paragraph::new("Loading todos...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let visible = app.state().visible_todos();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|todo| {
            let mark = if todo.completed { "[x]" } else { "[ ]" };
            let item = ListItem::new(format!("{} {}", mark, todo.title));
            if todo.completed {
                item.style(Style::default().fg(Color::DarkGray))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selected()));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Remaining count, filter control and the clear-completed hint.
fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::raw(items_left_text(app.state().items_left())),
        Span::raw("   "),
    ];

    for filter in Filter::ALL {
        let style = if filter == app.state().filter() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
    }

    spans.push(Span::raw("   Clear completed [C]"));

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Error banner when present, key hints otherwise.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.state().banner() {
        Some(banner) => (banner.to_string(), Style::default().fg(Color::Red)),
        None => {
            let hints = match app.mode() {
                InputMode::Normal => {
                    "j/k:move space:toggle d:delete a:add h/l:filter C:clear r:reload q:quit"
                }
                InputMode::Insert => "Enter:add Esc:back",
            };
            (hints.to_string(), Style::default().fg(Color::DarkGray))
        }
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// The footer count never inflects: the word is always "items".
fn items_left_text(n: usize) -> String {
    format!("{n} items left")
}
