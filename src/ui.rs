use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::map::{render_overlay, Overlay};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.positions.len() {
        0 => " geoframe ".to_string(),
        n => format!(" geoframe: {n} positions "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.set_size(inner.width as usize * 2, inner.height as usize * 4);

    let overlay = render_overlay(
        inner.width as usize,
        inner.height as usize,
        &viewport,
        &app.positions,
        app.extent.as_ref(),
    );

    // Mark the framed center so it stays visible after panning away
    let center_cell = app
        .last_framing
        .as_ref()
        .and_then(|framing| viewport.project(&framing.center.surface().normalized()))
        .filter(|&(px, py)| px >= 0 && py >= 0)
        .map(|(px, py)| ((px / 2) as u16, (py / 4) as u16))
        .filter(|&(cx, cy)| cx < inner.width && cy < inner.height);

    frame.render_widget(MapWidget { overlay, center_cell }, inner);
}

/// Braille overlay layers plus the framed-center marker
struct MapWidget {
    overlay: Overlay,
    center_cell: Option<(u16, u16)>,
}

impl MapWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(&self, canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front
        self.render_layer(&self.overlay.graticule, Color::DarkGray, area, buf);
        self.render_layer(&self.overlay.extent, Color::Yellow, area, buf);
        self.render_layer(&self.overlay.tracks, Color::Cyan, area, buf);

        if let Some((cx, cy)) = self.center_cell {
            buf[(area.x + cx, area.y + cy)].set_char('╋').set_fg(Color::Red);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled(" ", dim),
        Span::styled(app.center_label(), Style::default().fg(Color::Cyan)),
        Span::styled(" | alt ", dim),
        Span::styled(app.elevation_label(), Style::default().fg(Color::Yellow)),
        Span::styled(" | margin ", dim),
        Span::styled(app.margin_label(), Style::default().fg(Color::Magenta)),
    ];
    if let Some(message) = &app.message {
        spans.push(Span::styled(" | ", dim));
        spans.push(Span::styled(message.clone(), Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(
        " | f:frame [/]:margin hjkl:pan +/-:zoom q:quit",
        dim,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
