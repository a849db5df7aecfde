use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::config::{ColorConfig, KeybindingConfig};
use crate::domain::Filter;
use crate::tui::app::{Dashboard, Status};
use crate::tui::event::Action;

const HELP_WIDTH: u16 = 26;

pub fn render(
    frame: &mut Frame,
    app: &mut Dashboard,
    colors: &ColorConfig,
    keys: &KeybindingConfig,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Posts and help
            Constraint::Length(1), // Filter bar
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(HELP_WIDTH)])
        .split(rows[0]);

    render_posts_pane(frame, app, columns[0], colors);
    render_help_pane(frame, columns[1], colors, keys);
    render_filter_bar(frame, app, rows[1], colors, keys);
    render_status_bar(frame, app, rows[2], colors);
}

fn render_posts_pane(frame: &mut Frame, app: &mut Dashboard, area: Rect, colors: &ColorConfig) {
    let items: Vec<ListItem> = app
        .posts()
        .iter()
        .enumerate()
        .map(|(i, post)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(colors.rank)),
                Span::raw(post.title.clone()),
                Span::raw(" ("),
                Span::styled(post.tally.to_string(), Style::default().fg(colors.tally)),
                Span::raw(")"),
            ]))
        })
        .collect();

    let title = format!(
        " {} [{}/{}] ",
        app.filter().label(),
        if app.posts().is_empty() { 0 } else { app.selection() + 1 },
        app.posts().len()
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_help_pane(frame: &mut Frame, area: Rect, colors: &ColorConfig, keys: &KeybindingConfig) {
    let entries = [
        (Action::MoveDown, "next story"),
        (Action::MoveUp, "previous story"),
        (Action::OpenArticle, "open article"),
        (Action::OpenComments, "open comments"),
        (Action::SwitchFilter(Filter::Front), "front page"),
        (Action::SwitchFilter(Filter::Best), "best"),
        (Action::SwitchFilter(Filter::Newest), "newest"),
        (Action::Quit, "quit"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .filter_map(|(action, label)| {
            let key = keys.first_key(*action)?;
            Some(Line::from(vec![
                Span::styled(format!("{:>5} ", key), Style::default().fg(colors.help_key)),
                Span::raw(*label),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_filter_bar(
    frame: &mut Frame,
    app: &Dashboard,
    area: Rect,
    colors: &ColorConfig,
    keys: &KeybindingConfig,
) {
    let mut spans = Vec::new();
    for filter in Filter::ALL {
        let key = keys
            .first_key(Action::SwitchFilter(filter))
            .unwrap_or("-")
            .to_string();
        spans.push(Span::raw(" "));
        spans.push(Span::styled(key, Style::default().fg(colors.filter_key)));
        let label = format!(" {} ", filter.label());
        if filter == app.filter() {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(colors.active_filter_fg)
                    .bg(colors.active_filter_bg)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(label));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &Dashboard, area: Rect, colors: &ColorConfig) {
    let base = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let (text, style) = if app.is_refreshing {
        ("Loading stories...".to_string(), base)
    } else {
        match &app.status {
            Some(status @ Status::Error(_)) => (status.text().to_string(), base.fg(colors.error_fg)),
            Some(status) => (status.text().to_string(), base),
            None => (
                format!(
                    "{} stories, updated {}",
                    app.posts().len(),
                    app.posts().fetched_at().format("%H:%M")
                ),
                base,
            ),
        }
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
