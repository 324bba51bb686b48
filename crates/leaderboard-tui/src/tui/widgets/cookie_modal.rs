// Cookie uploader overlay.
//
// Renders a centered modal with two inputs: a path to an exported
// cookies.json and a paste area. The focused input has a yellow border.
// The last upload message is shown at the bottom.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::{Notice, UploaderField, UploaderState};

const DIALOG_WIDTH: u16 = 76;
const DIALOG_HEIGHT: u16 = 16;

/// Render the uploader centered on `area`.
pub fn render(frame: &mut Frame, area: Rect, uploader: &UploaderState) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Upload Cookies ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let [intro, path_area, paste_area, notice_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    let intro_text = Paragraph::new(
        "Export your session cookies as JSON (e.g. EditThisCookie) and enter \
         the file path, or paste the JSON below.",
    )
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(intro_text, intro);

    let path = Paragraph::new(uploader.path_text.as_str())
        .block(field_block("cookies.json path", uploader.focus == UploaderField::FilePath));
    frame.render_widget(path, path_area);

    // Paste areas can hold kilobytes of JSON; show the tail that fits.
    let visible = usize::from(paste_area.width.saturating_sub(2))
        * usize::from(paste_area.height.saturating_sub(2));
    let paste = Paragraph::new(tail(&uploader.paste_text, visible))
        .wrap(Wrap { trim: false })
        .block(field_block(
            &format!("Paste JSON ({} chars)", uploader.paste_text.chars().count()),
            uploader.focus == UploaderField::Paste,
        ));
    frame.render_widget(paste, paste_area);

    if let Some(notice) = &uploader.notice {
        let color = match notice {
            Notice::Info(_) => Color::Yellow,
            Notice::Success(_) => Color::Green,
            Notice::Error(_) => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(Line::styled(notice.text().to_string(), Style::default().fg(color))),
            notice_area,
        );
    }
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {title} "))
}

/// The last `max_chars` characters of `text`.
pub fn tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    match text.char_indices().nth(count - max_chars) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the dialog is clamped to the available space.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
