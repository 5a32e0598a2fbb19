//! Terminal UI rendering.
//!
//! All drawing logic lives here.  It paints the [`Surface`] that the view
//! renderers keep up to date and never looks at application state directly,
//! so what is on screen is exactly what the renderers produced.
//!
//! ## For contributors
//!
//! * Layout, top to bottom: header, URL input, message line, then posts
//!   (left) and feeds (right), and a one-line status bar.  The preview modal
//!   is drawn last, centred over everything.
//! * Colours and styles are defined inline.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::Focus;
use crate::surface::{MessageKind, ModalView, Surface};

/// Draw the complete UI for one frame.
pub fn draw(surface: &Surface, list_state: &mut ListState, focus: Focus, frame: &mut Frame) {
    let [header_area, input_area, message_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [posts_area, feeds_area] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
            .areas(main_area);

    draw_header(surface, frame, header_area);
    draw_input(surface, focus, frame, input_area);
    draw_message(surface, frame, message_area);
    draw_posts(surface, list_state, focus, frame, posts_area);
    draw_feeds(surface, frame, feeds_area);
    draw_status_bar(surface, frame, status_area);

    if let Some(modal) = &surface.modal {
        draw_modal(surface, modal, frame);
    }
}

fn draw_header(surface: &Surface, frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            &surface.labels.header,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            &surface.labels.description,
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(header, area);
}

fn draw_input(surface: &Surface, focus: Focus, frame: &mut Frame, area: Rect) {
    let input = &surface.input;
    let border = if input.invalid {
        Style::default().fg(Color::Red)
    } else if input.disabled {
        Style::default().fg(Color::DarkGray)
    } else if focus == Focus::Input {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let value_width = u16::try_from(Line::raw(input.value.as_str()).width()).unwrap_or(u16::MAX);
    let (scroll, cursor) = input_scroll(value_width, area.width.saturating_sub(2));

    let text = if input.value.is_empty() {
        Span::styled(&surface.labels.example, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(&input.value)
    };

    let block = Block::default()
        .title(format!(" {} ", surface.labels.placeholder))
        .title_bottom(Line::from(format!(" Enter: {} ", surface.labels.add_button)).right_aligned())
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(
        Paragraph::new(Line::from(text)).block(block).scroll((0, scroll)),
        area,
    );

    if focus == Focus::Input && surface.accepts_input() {
        let x = area.x.saturating_add(1).saturating_add(cursor);
        frame.set_cursor_position((x, area.y.saturating_add(1)));
    }
}

/// Horizontal scroll and cursor column for a single-line input.
///
/// Widths are display columns.  The end of the value stays visible with one
/// free cell for the cursor.
fn input_scroll(value_width: u16, inner_width: u16) -> (u16, u16) {
    let room = inner_width.saturating_sub(1);
    let scroll = value_width.saturating_sub(room);
    (scroll, value_width - scroll)
}

fn draw_message(surface: &Surface, frame: &mut Frame, area: Rect) {
    let Some(message) = &surface.message else {
        return;
    };
    let color = match message.kind {
        MessageKind::Info => Color::Yellow,
        MessageKind::Success => Color::Green,
        MessageKind::Danger => Color::Red,
    };
    let line = Line::from(Span::styled(&message.text, Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the scrollable post list.  Unseen posts are bold.
fn draw_posts(
    surface: &Surface,
    list_state: &mut ListState,
    focus: Focus,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", surface.labels.posts_title))
        .borders(Borders::ALL)
        .border_style(if focus == Focus::Posts {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });

    if surface.posts.is_empty() {
        let hint = Paragraph::new(surface.labels.posts_description.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let list_items: Vec<ListItem> = surface
        .posts
        .iter()
        .map(|post| {
            let title_style = if post.seen {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            };
            let date = post.date.as_deref().unwrap_or("");

            ListItem::new(Line::from(vec![
                Span::styled(format!("{date:<17}"), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(&post.title, title_style),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, list_state);
}

fn draw_feeds(surface: &Surface, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", surface.labels.feeds_title))
        .borders(Borders::ALL);

    if surface.feeds.is_empty() {
        let hint = Paragraph::new(surface.labels.feeds_description.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = surface
        .feeds
        .iter()
        .map(|feed| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    &feed.title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    &feed.description,
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

/// Render the bottom status bar.
fn draw_status_bar(surface: &Surface, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{} posts", surface.posts.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} feeds", surface.feeds.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!(
            "  Tab: focus  Enter/p: {}  ↑/↓: scroll  Esc: close  q: quit",
            surface.labels.preview_button
        )),
    ]));
    frame.render_widget(status, area);
}

fn draw_modal(surface: &Surface, modal: &ModalView, frame: &mut Frame) {
    let area = centered(frame.area(), 70, 60);
    let block = Block::default()
        .title(format!(" {} ", modal.title))
        .title_bottom(Line::from(format!(" Esc: {} ", surface.labels.modal_close)).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let body = Paragraph::new(vec![
        Line::from(modal.description.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{}: ", surface.labels.modal_link),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                &modal.link,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    area
}
