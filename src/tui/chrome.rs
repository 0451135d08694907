// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

const FOCUS_COLOR: Color = Color::LightCyan;
const FOOTER_LABEL_COLOR: Color = Color::DarkGray;
const FOOTER_KEY_COLOR: Color = Color::Yellow;
const DRAG_COLOR: Color = Color::LightMagenta;
const CARD_MIN_WIDTH: u16 = 28;

fn panel_border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn cursor_style() -> Style {
    Style::default()
        .fg(FOCUS_COLOR)
        .add_modifier(Modifier::SLOW_BLINK)
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(FOCUS_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::LightBlue,
        Severity::Success => Color::LightGreen,
        Severity::Error => Color::LightRed,
    }
}

fn search_placeholder(engine: crate::model::SearchEngine) -> String {
    format!("Search in {}", engine.label())
}

fn prompt_title(kind: &PromptKind) -> String {
    match kind {
        PromptKind::AddFolder => "New folder name".to_owned(),
        PromptKind::AddTabName { .. } => "New tab name".to_owned(),
        PromptKind::AddTabUrl { name, .. } => format!("URL for \"{name}\""),
        PromptKind::RenameFolder { .. } => "Rename folder".to_owned(),
        PromptKind::EditTab {
            field: TabField::Name,
            ..
        } => "Tab name".to_owned(),
        PromptKind::EditTab {
            field: TabField::Url,
            ..
        } => "Tab URL".to_owned(),
        PromptKind::ImportPath => "Import file path".to_owned(),
    }
}

fn card_widget(card: &FolderCard, selected: Option<TabPosition>) -> Paragraph<'static> {
    let mut lines = Vec::with_capacity(card.tabs.len().max(1));
    for link in &card.tabs {
        let style = if selected == Some(link.position) {
            selected_style()
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(link.name.clone(), style)));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(empty)".to_owned(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style(
            selected.is_some_and(|position| position.folder == card.index),
        ))
        .title(format!(" {} ", card.name));
    Paragraph::new(lines).block(block)
}

/// One line per editor row; `editor.height` lines in total.
fn editor_lines(editor: &EditorView, selected: Option<EditorItem>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default(); usize::from(editor.height)];
    let mut put = |y: u16, line: Line<'static>| {
        if let Some(slot) = lines.get_mut(usize::from(y)) {
            *slot = line;
        }
    };

    for folder in &editor.folders {
        let header_style = if selected == Some(EditorItem::Folder(folder.index)) {
            selected_style()
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let arrow_style = |enabled: bool| {
            if enabled {
                Style::default().fg(FOOTER_KEY_COLOR)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };
        put(
            folder.header.top,
            Line::from(vec![
                Span::styled(format!("▸ {}", folder.name), header_style),
                Span::raw("  "),
                Span::styled("↑".to_owned(), arrow_style(folder.can_move_up)),
                Span::styled("↓".to_owned(), arrow_style(folder.can_move_down)),
            ]),
        );

        if folder.rows.is_empty() {
            put(
                folder.header.bottom(),
                Line::from(Span::styled(
                    "    (empty, drop tabs here)".to_owned(),
                    Style::default().fg(Color::DarkGray),
                )),
            );
        }

        for row in &folder.rows {
            let (marker, name_style) = if row.dragging {
                (
                    "  ⠿ ",
                    Style::default()
                        .fg(DRAG_COLOR)
                        .add_modifier(Modifier::BOLD | Modifier::ITALIC),
                )
            } else if selected == Some(EditorItem::Tab(row.position)) {
                ("  › ", selected_style())
            } else {
                ("    ", Style::default().fg(Color::White))
            };
            put(
                row.bounds.top,
                Line::from(vec![
                    Span::styled(marker.to_owned(), Style::default().fg(DRAG_COLOR)),
                    Span::styled(row.name.clone(), name_style),
                    Span::styled("  ".to_owned(), Style::default()),
                    Span::styled(row.url.clone(), Style::default().fg(Color::DarkGray)),
                ]),
            );
        }
    }

    lines
}

fn footer_line(app: &App) -> Line<'static> {
    if let Some(toast) = app.active_toast() {
        return Line::from(vec![
            Span::styled(
                format!("{}:", toast.severity.as_str()),
                Style::default()
                    .fg(severity_color(toast.severity))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(toast.message.clone()),
        ]);
    }

    let mut spans = Vec::new();
    push_footer_entry(&mut spans, "user", app.session.user().as_str());
    push_footer_entry(&mut spans, "save", app.session.pipeline_state().status().as_str());
    let hints: &[(&str, &str)] = match (&app.input, app.screen) {
        (Input::Search(_), _) => &[("search", "Enter"), ("cancel", "Esc")],
        (Input::Prompt(_), _) | (Input::Confirm(_), _) => &[],
        (Input::Normal, Screen::Start) => &[
            ("open", "Enter"),
            ("search", "/"),
            ("edit", "e"),
            ("engine", "g"),
            ("export", "x"),
            ("import", "i"),
            ("quit", "q"),
        ],
        (Input::Normal, Screen::Editor) => &[
            ("folder", "a"),
            ("tab", "t"),
            ("rename", "r"),
            ("url", "u"),
            ("delete", "d"),
            ("move", "K/J"),
            ("back", "Esc"),
        ],
    };
    for (label, key) in hints {
        push_footer_entry(&mut spans, label, key);
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}
