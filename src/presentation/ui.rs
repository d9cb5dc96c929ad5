use crate::application::{App, AppMode, CommentField, DirectoryView};
use crate::infrastructure::{MapAdapter, Viewport};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match app.mode {
        AppMode::Articles | AppMode::ArticleDetail => render_articles(f, app, chunks[1]),
        _ => match app.view {
            DirectoryView::Grid => render_grid(f, app, chunks[1]),
            DirectoryView::Map => render_map(f, app, chunks[1]),
        },
    }

    render_status_bar(f, app, chunks[2]);

    if matches!(app.mode, AppMode::ArticleDetail) {
        render_article_detail(f, app);
    }
    if app.detail_map.is_some() {
        render_detail_map(f, app);
    }
    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let category = app
        .criteria
        .category
        .as_deref()
        .unwrap_or("all categories");
    let search = if app.criteria.search.is_empty() {
        String::new()
    } else {
        format!(" | search: {}", app.criteria.search)
    };
    let header = Paragraph::new(format!(
        "vitrina - Business Directory | {} results | {}{}",
        app.results_count(),
        category,
        search,
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_grid(f: &mut Frame, app: &mut App, area: Rect) {
    const CARD_HEIGHT: u16 = 7;

    if app.is_empty_state() {
        let empty = Paragraph::new("No results match the current filter")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Directory"));
        f.render_widget(empty, area);
        return;
    }

    let columns = app.grid_columns.max(1) as usize;
    let rows_fit = ((area.height / CARD_HEIGHT) as usize).max(1);
    app.update_viewport_rows(rows_fit);

    let visible = app.visible_businesses();
    let start = app.scroll_row * columns;

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows_fit])
        .split(area);

    for (row_index, row_area) in row_areas.iter().enumerate() {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, columns as u32);
                columns
            ])
            .split(*row_area);

        for (col_index, col_area) in col_areas.iter().enumerate() {
            let index = start + row_index * columns + col_index;
            let Some(business) = visible.get(index) else {
                continue;
            };

            let is_cursor = index == app.cursor;
            let is_selected = app.selected == Some(business.id);

            let border_style = if is_selected {
                Style::default().fg(Color::Yellow)
            } else if is_cursor {
                Style::default().fg(Color::LightBlue)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let title = if business.featured {
                format!("* {}", business.name)
            } else {
                business.name.clone()
            };
            let title_style = if is_cursor {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let lines = vec![
                Line::styled(
                    business.category.clone(),
                    Style::default().fg(Color::Green),
                ),
                Line::raw(format!("tel: {}", business.phone)),
                Line::raw(business.email.clone()),
                Line::raw(business.address.clone()),
            ];

            let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(Line::styled(title, title_style)),
            );
            f.render_widget(card, *col_area);
        }
    }
}

fn render_map(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Map");

    if let Some(error) = &app.map_error {
        let failure = Paragraph::new(format!("Error: {}", error))
            .style(Style::default().fg(Color::Red))
            .block(block);
        f.render_widget(failure, area);
        return;
    }

    let Some(adapter) = &app.map else {
        f.render_widget(block, area);
        return;
    };

    render_map_canvas(f, adapter, app.marker_cursor, block, area);

    if let Some(lines) = open_popup_lines(adapter) {
        render_popup_overlay(f, lines, area);
    }
}

fn render_map_canvas(
    f: &mut Frame,
    adapter: &MapAdapter,
    marker_cursor: usize,
    block: Block,
    area: Rect,
) {
    let viewport = adapter.widget().viewport();
    let (x_bounds, y_bounds) = viewport_bounds(viewport);

    let coords: Vec<(f64, f64)> = adapter
        .widget()
        .markers()
        .iter()
        .map(|m| (m.at.lon, m.at.lat))
        .collect();
    let cursor_coord = coords.get(marker_cursor).copied();

    let canvas = Canvas::default()
        .block(block)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Red,
            });
            if let Some((lon, lat)) = cursor_coord {
                ctx.print(
                    lon,
                    lat,
                    Line::styled("X", Style::default().fg(Color::Yellow)),
                );
            }
        });
    f.render_widget(canvas, area);
}

fn viewport_bounds(viewport: Viewport) -> ([f64; 2], [f64; 2]) {
    // Slippy-map style: each zoom level halves the visible span.
    let lon_span = (360.0 / 2f64.powi(viewport.zoom as i32)).max(0.005);
    let lat_span = lon_span / 2.0;
    (
        [
            viewport.center.lon - lon_span / 2.0,
            viewport.center.lon + lon_span / 2.0,
        ],
        [
            viewport.center.lat - lat_span / 2.0,
            viewport.center.lat + lat_span / 2.0,
        ],
    )
}

fn open_popup_lines(adapter: &MapAdapter) -> Option<Vec<String>> {
    let open = adapter.widget().open_popup_handle()?;
    let marker = adapter
        .widget()
        .markers()
        .iter()
        .find(|m| m.handle == open)?;
    Some(popup_text_lines(&marker.popup))
}

/// Flattens popup markup to plain text lines for the terminal:
/// `<br>` separates lines, the remaining tags are dropped and the
/// escaped entities restored.
pub fn popup_text_lines(markup: &str) -> Vec<String> {
    markup
        .split("<br>")
        .map(|part| {
            let mut text = part.to_string();
            for tag in ["<strong>", "</strong>", "<small>", "</small>"] {
                text = text.replace(tag, "");
            }
            text.replace("&lt;", "<")
                .replace("&gt;", ">")
                .replace("&quot;", "\"")
                .replace("&amp;", "&")
        })
        .collect()
}

fn render_popup_overlay(f: &mut Frame, lines: Vec<String>, area: Rect) {
    if area.width < 20 || area.height < 5 {
        return;
    }
    let width = lines
        .iter()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .max(16)
        .min(area.width.saturating_sub(4))
        + 2;
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };

    let text: Vec<Line> = lines.into_iter().map(Line::raw).collect();
    f.render_widget(Clear, popup_area);
    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        popup_area,
    );
}

fn render_articles(f: &mut Frame, app: &App, area: Rect) {
    let paginator = app.article_paginator();
    let total_pages = paginator.total_pages(app.articles.len());
    let page = app.current_article_page();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Articles (page {}/{})", app.article_page, total_pages));

    let mut lines: Vec<Line> = Vec::new();
    for (index, article) in page.iter().enumerate() {
        let style = if index == app.article_cursor {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::styled(article.title.clone(), style));
        lines.push(Line::styled(
            format!(
                "  {} | {} | {} comments",
                article.date,
                article.category,
                article.comments.len()
            ),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::styled(
            format!("  {}", article.excerpt),
            Style::default().fg(Color::Gray),
        ));
        lines.push(Line::raw(""));
    }

    let list = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    f.render_widget(list, area);
}

fn render_article_detail(f: &mut Frame, app: &App) {
    let Some(article) = app
        .open_article
        .and_then(|id| app.articles.iter().find(|a| a.id == id))
    else {
        return;
    };

    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(article.title.clone())
        .style(Style::default().fg(Color::White));
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(5),
        ])
        .split(inner);

    let meta = Paragraph::new(format!("{} - {}", article.date, article.author))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(meta, sections[0]);

    let mut body: Vec<Line> = vec![Line::raw(article.full_content.clone()), Line::raw("")];
    if article.comments.is_empty() {
        body.push(Line::styled(
            "No comments yet. Be the first!",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        for comment in &article.comments {
            body.push(Line::styled(
                format!("{} <{}>", comment.name, comment.email),
                Style::default().fg(Color::Green),
            ));
            body.push(Line::raw(format!("  {}", comment.text)));
        }
    }
    let content = Paragraph::new(body).wrap(Wrap { trim: false });
    f.render_widget(content, sections[1]);

    render_comment_form(f, app, sections[2]);
}

fn render_comment_form(f: &mut Frame, app: &App, area: Rect) {
    let field_line = |label: &str, value: &str, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::styled(format!("{}: {}", label, value), style)
    };

    let lines = vec![
        field_line(
            "Name",
            &app.comment_name,
            app.comment_focus == CommentField::Name,
        ),
        field_line(
            "Email",
            &app.comment_email,
            app.comment_focus == CommentField::Email,
        ),
        field_line(
            "Comment",
            &app.comment_text,
            app.comment_focus == CommentField::Text,
        ),
    ];
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .title("Leave a comment (Tab: next field, Enter: send)"),
    );
    f.render_widget(form, area);
}

fn render_detail_map(f: &mut Frame, app: &App) {
    let Some(detail) = &app.detail_map else {
        return;
    };
    let Some(business) = app.catalog.get(detail.business_id) else {
        return;
    };

    let area = f.area();
    let popup_area = Rect {
        x: area.width / 8,
        y: area.height / 8,
        width: area.width * 3 / 4,
        height: area.height * 3 / 4,
    };
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("How to get there: {}", business.name));

    match &detail.adapter {
        Ok(adapter) => {
            render_map_canvas(f, adapter, 0, block, popup_area);
            if let Some(lines) = open_popup_lines(adapter) {
                render_popup_overlay(f, lines, popup_area);
            }
        }
        Err(error) => {
            let failure = Paragraph::new(format!("Error: {}", error))
                .style(Style::default().fg(Color::Red))
                .block(block);
            f.render_widget(failure, popup_area);
        }
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Browse => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.view {
                    DirectoryView::Grid => "/: search | c: category | Tab: map | Enter: select | d: directions | 2/3/4: columns | a: articles | Ctrl+E: export | F1: help | q: quit".to_string(),
                    DirectoryView::Map => "arrows: markers | Enter: select | x: clear | Tab: grid | F1: help | q: quit".to_string(),
                }
            }
        }
        AppMode::Search => format!(
            "Search: {} (Enter to keep, Esc to clear)",
            app.criteria.search
        ),
        AppMode::ExportCsv => format!(
            "Export CSV as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        ),
        AppMode::Articles => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "up/down: choose | left/right: page | Enter: read | Esc: back".to_string()
            }
        }
        AppMode::ArticleDetail => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Tab: next field | Enter: send comment | Esc: close".to_string()
            }
        }
        AppMode::Help => "up/down: scroll | Esc/q: close help".to_string(),
    };

    let style = match app.mode {
        AppMode::Browse => Style::default(),
        AppMode::Search => Style::default().fg(Color::Green),
        AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        AppMode::Articles => Style::default().fg(Color::Cyan),
        AppMode::ArticleDetail => Style::default().fg(Color::Green),
        AppMode::Help => Style::default().fg(Color::Cyan),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("vitrina Help")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"VITRINA - TERMINAL BUSINESS DIRECTORY

=== FILTERING ===
/               Focus the search box; every keystroke refilters
                (matches name or address, case-insensitive)
c               Cycle the category filter (all -> each category -> all)
Esc (in search) Clear the search text

=== GRID VIEW ===
Arrow keys      Move between cards
Enter           Select the card under the cursor
2 / 3 / 4       Grid columns (saved across sessions)
d               Open the "how to get there" map for the current card
o               Show the current card on the map view
y               Copy the selected listing's contact info
x               Clear the selection

=== MAP VIEW ===
Tab / m / g     Switch between grid and map views
Left/Right      Move between markers
Enter           Select the marker under the cursor (opens its popup)
x               Clear selection and close the popup

The map keeps its markers in sync with the filter: listings without
coordinates simply never appear on it. With no results the map shows
the regional overview; a single result is centered; several results
are fitted with padding.

=== ARTICLES ===
a               Open the articles view
Left/Right      Previous / next page
Enter           Read the article under the cursor
Tab             Move between comment fields (name, email, text)
Enter           Send the comment (all three fields required)

=== OTHER ===
Ctrl+E          Export the filtered listings to CSV
F1 or ?         Show this help
q               Quit"#
        .to_string()
}
