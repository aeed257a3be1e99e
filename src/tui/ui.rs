use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Tabs, Wrap};

use crate::triage::{ActiveView, Category, EmailRecord, PaneMotion, RenderDecision};

use super::app::{InboxApp, InputMode};
use super::event::UNITS_PER_COLUMN;

pub fn render(frame: &mut Frame, app: &InboxApp, now: Instant) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    render_tabs(frame, app, header);

    match app.decision(now) {
        RenderDecision::SubmissionForm => render_form(frame, app, body),
        RenderDecision::ListOnly { records } => {
            render_list(frame, app, records, Some(app.list_cursor), body);
        }
        RenderDecision::Split { records, selected } => {
            let [list_area, detail_area] =
                Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .areas(body);
            let index = selected
                .and_then(|record| records.iter().position(|r| r.id() == record.id()));
            render_list(frame, app, records, index, list_area);
            match selected {
                Some(record) => render_detail(frame, app, record, detail_area, 0.0),
                None => render_placeholder(frame, detail_area),
            }
        }
        RenderDecision::DetailOnly {
            record,
            offset,
            shadow,
            motion,
        } => {
            let area = displaced(body, offset, motion);
            render_detail(frame, app, record, area, shadow);
        }
    }

    render_footer(frame, app, footer);
}

fn render_tabs(frame: &mut Frame, app: &InboxApp, area: Rect) {
    let titles = vec![
        "New analysis".to_string(),
        format!("Productive ({})", app.store.productive().len()),
        format!("Unproductive ({})", app.store.unproductive().len()),
    ];
    let selected = match app.store.active_view() {
        ActiveView::SubmissionForm => 0,
        ActiveView::ProductiveList => 1,
        ActiveView::UnproductiveList => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(" Automail "),
        )
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_form(frame: &mut Frame, app: &InboxApp, area: Rect) {
    let [input_area, info_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).areas(area);

    let draft = app.submission.draft();
    let loading = app.submission.is_loading();
    let text_style = if loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let text = if draft.text.is_empty() {
        Text::styled(
            "Paste an email, e.g. \"Hello, could you check the status of ticket 12345?\"",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Text::styled(draft.text.as_str(), text_style)
    };
    let input = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Email text "),
    );
    frame.render_widget(input, input_area);

    let file_line = match (&app.input_mode, &draft.file) {
        (InputMode::FilePath, _) => Line::from(vec![
            Span::styled("file path: ", Style::default().fg(Color::Cyan)),
            Span::raw(app.path_input.as_str()),
        ]),
        (InputMode::Normal, Some(file)) => Line::from(format!("attached: {}", file.name)),
        (InputMode::Normal, None) => Line::from(Span::styled(
            "or attach a .txt/.pdf file with Ctrl+O",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let action_line = if loading {
        Line::from(Span::styled("Analyzing...", Style::default().fg(Color::Yellow)))
    } else if app.submission.can_submit() {
        Line::from("Ctrl+S to classify")
    } else {
        Line::from(Span::styled(
            "Ctrl+S to classify",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let mut lines = vec![file_line, action_line];
    if let Some(error) = app.submission.error() {
        lines.push(Line::from(Span::styled(error, Style::default().fg(Color::Red))));
    }
    frame.render_widget(Paragraph::new(lines), info_area);
}

fn render_list(
    frame: &mut Frame,
    app: &InboxApp,
    records: &[EmailRecord],
    highlighted: Option<usize>,
    area: Rect,
) {
    let title = match app.store.active_view() {
        ActiveView::UnproductiveList => format!(" Unproductive ({}) ", records.len()),
        _ => format!(" Productive ({}) ", records.len()),
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .title(title);

    if records.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No emails here.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = records
        .iter()
        .map(|record| ListItem::new(record.subject().to_string()))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().fg(Color::Green));

    let mut state = ListState::default();
    state.select(highlighted);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new(Span::styled(
        "Select an email to see its details.",
        Style::default().fg(Color::DarkGray),
    ))
    .block(Block::bordered().border_type(BorderType::Rounded));
    frame.render_widget(placeholder, area);
}

fn render_detail(
    frame: &mut Frame,
    app: &InboxApp,
    record: &EmailRecord,
    area: Rect,
    shadow: f32,
) {
    if area.width == 0 {
        return;
    }

    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("Original email:", label))];
    match record.original_file_name() {
        Some(name) => {
            let icon = if record.is_text_upload() {
                "[text]"
            } else {
                "[file]"
            };
            lines.push(Line::from(format!(
                "{icon} {name} ({})",
                record.original_file_type().unwrap_or("unknown")
            )));
        }
        None => lines.extend(record.body().lines().map(|line| Line::from(line.to_string()))),
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Category: ", label),
        Span::styled(record.category().as_str(), category_style(record.category())),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Suggested response:", label)));
    lines.extend(
        record
            .suggested_response()
            .lines()
            .map(|line| Line::from(line.to_string())),
    );
    lines.push(Line::default());

    let mut actions = Vec::new();
    if app.store.active_view() == ActiveView::UnproductiveList {
        actions.push("[c] copy reply");
    }
    actions.extend(["[s] send reply", "[d] delete", "[esc] back"]);
    lines.push(Line::from(Span::styled(
        actions.join("  "),
        Style::default().fg(Color::Cyan),
    )));

    let border_style = if shadow > 0.0 {
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(format!(" {} ", record.subject())),
    );
    frame.render_widget(detail, area);
}

fn category_style(category: Category) -> Style {
    match category {
        Category::Productive => Style::default().fg(Color::Green),
        Category::Unproductive => Style::default().fg(Color::Magenta),
    }
}

/// Shifts the compact detail pane right by the drag offset or the exit progress.
fn displaced(area: Rect, offset: f32, motion: PaneMotion) -> Rect {
    let shift = match motion {
        PaneMotion::Exiting { progress } => (f32::from(area.width) * progress) as u16,
        PaneMotion::Dragging | PaneMotion::Resting => (offset / UNITS_PER_COLUMN) as u16,
    };
    let shift = shift.min(area.width);

    Rect {
        x: area.x + shift,
        width: area.width - shift,
        ..area
    }
}

fn render_footer(frame: &mut Frame, app: &InboxApp, area: Rect) {
    let hints = match app.store.active_view() {
        ActiveView::SubmissionForm => "F1 form  F2 productive  F3 unproductive  Ctrl+S classify  Ctrl+O attach  Ctrl+X detach  Ctrl+Q quit",
        _ => "F1 form  F2 productive  F3 unproductive  j/k move  enter open  esc back  q quit",
    };

    let mut lines = Vec::new();
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_offset_shifts_by_columns() {
        let area = Rect::new(0, 0, 40, 10);
        let shifted = displaced(area, 80.0, PaneMotion::Dragging);
        assert_eq!(shifted.x, 10);
        assert_eq!(shifted.width, 30);
    }

    #[test]
    fn finished_exit_pushes_pane_off_screen() {
        let area = Rect::new(2, 0, 40, 10);
        let shifted = displaced(area, 0.0, PaneMotion::Exiting { progress: 1.0 });
        assert_eq!(shifted.width, 0);
    }
}
