//! UI rendering

use pkgdock_core::catalog::PackageSource;
use pkgdock_core::view::Tab;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::app::App;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // List + details
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, rows[0]);

    let list_width = app.options.list_width();
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(list_width),
            Constraint::Percentage(100u16.saturating_sub(list_width)),
        ])
        .split(rows[1]);

    render_package_list(frame, app, panes[0]);
    render_details(frame, app, panes[1]);
    render_status_bar(frame, app, rows[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!(" {} {} ", i + 1, tab.label())))
        .collect();
    let selected = Tab::ALL
        .iter()
        .position(|tab| *tab == app.presenter.current_tab())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Package Manager "))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_package_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Packages ");
    let view = app.presenter.view();

    if let Some(message) = view.message() {
        let para = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    // Right-align versions inside the pane's inner width.
    let inner_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = view
        .rows()
        .iter()
        .map(|row| {
            let version_width = row.version.chars().count() + 1;
            let name_width = inner_width.saturating_sub(version_width);
            let name: String = row.display_name.chars().take(name_width).collect();
            let padding = name_width.saturating_sub(name.chars().count());
            Line::from(vec![
                Span::styled(name, Style::default().fg(source_color(row.source))),
                Span::raw(" ".repeat(padding + 1)),
                Span::styled(row.version.clone(), Style::default().fg(Color::DarkGray)),
            ])
            .into()
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let Some(details) = app.presenter.view().details() else {
        frame.render_widget(block, area);
        return;
    };

    let lines = vec![
        Line::from(Span::styled(
            details.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            details.subtitle.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            details.source.label(),
            Style::default().fg(source_color(details.source)),
        )),
        Line::from(""),
        Line::from(details.description.clone()),
    ];

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(52)])
        .split(area);

    let status = app.presenter.view().last_update().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        cols[0],
    );

    let hints = Paragraph::new("r refresh · 1-3/Tab filter · ↑↓ select · q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    frame.render_widget(hints, cols[1]);
}

fn source_color(source: PackageSource) -> Color {
    match source {
        PackageSource::Unity => Color::Cyan,
        PackageSource::Verdaccio => Color::Green,
    }
}
