//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  ▤ sortviz   Merge   110 bars   12ms/step    │
//! ├──────────────────────────────────────────────┤
//! │        █                    █                │
//! │    █   █ █      █     █     █  █             │
//! │  █ █ █ █ █ █  █ █ █ █ █  █  █  █ █           │
//! ├──────────────────────────────────────────────┤
//! │  compares 612   writes 770                   │
//! ├──────────────────────────────────────────────┤
//! │  space: sort   x: stop   n: new   q: quit    │
//! └──────────────────────────────────────────────┘

use super::app::App;
use ratatui::{prelude::*, widgets::*};
use sortviz_core::{BarColor, Bars, Value, scale_height};

const PRIMARY: Color = Color::Cyan;
const ALERT: Color = Color::Red;
const SORTED: Color = Color::Green;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(6),    // bars
            Constraint::Length(3), // status
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_bars(f, rows[1], app);
    draw_status(f, rows[2], app);
    draw_keys(f, rows[3]);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let config = app.visualizer().config();
    let counts = app
        .visualizer()
        .last_stats()
        .map(|s| format!("{} cmp  {} wr  ", s.compares, s.writes))
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
        .title(Line::from(vec![
            Span::styled(" ▤ sortviz ", Style::default().bold().fg(PRIMARY)),
            Span::raw("  "),
            Span::styled(config.algorithm.name(), Style::default().bold().fg(Color::Yellow)),
            Span::styled(
                format!("  {} bars  {}ms/step  ", config.array_size, config.step_delay_ms),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("{} ", app.state_label()), Style::default().fg(Color::White)),
            Span::styled(counts, Style::default().fg(Color::DarkGray)),
        ]));

    f.render_widget(block, area);
}

fn draw_bars(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(BarsView::new(app.visualizer().bars()), inner);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if let Some(results) = app.self_test() {
        for r in results {
            let (mark, color) = if r.passed { ("✓", SORTED) } else { ("✗", ALERT) };
            spans.push(Span::raw(format!(" {} ", r.algorithm)));
            spans.push(Span::styled(mark, Style::default().bold().fg(color)));
            spans.push(Span::raw(" "));
        }
    } else if let Some(stats) = app.visualizer().last_stats() {
        spans.push(Span::styled(
            format!(" compares {}   writes {}", stats.compares, stats.writes),
            Style::default().fg(Color::Gray),
        ));
    }

    if let Some(status) = app.status() {
        spans.push(Span::styled(format!("   {status}"), Style::default().fg(Color::DarkGray)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(
        " space: sort   x: stop   n: new array   a/1-4: algorithm   +/-: speed   [/]: size   t: self-test   q: quit",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

/// Vertical bars, bottom-aligned, one slot per value.
///
/// With room to spare each bar gets an equal slot with a one-column gap;
/// when there are more bars than columns, columns sample the bars evenly.
pub struct BarsView<'a> {
    bars: &'a Bars,
}

impl<'a> BarsView<'a> {
    pub fn new(bars: &'a Bars) -> Self {
        Self { bars }
    }

    fn color_of(&self, color: BarColor) -> Color {
        if self.bars.is_sorted_emphasis() {
            return SORTED;
        }
        match color {
            BarColor::Primary => PRIMARY,
            BarColor::Alert => ALERT,
        }
    }
}

/// Which bar, if any, column `col` of `width` shows.
fn bar_at_column(col: usize, width: usize, bar_count: usize) -> Option<usize> {
    if bar_count == 0 || col >= width {
        return None;
    }
    let slot = width / bar_count;
    if slot >= 2 {
        let idx = col / slot;
        (idx < bar_count && col % slot != slot - 1).then_some(idx)
    } else {
        Some(col * bar_count / width)
    }
}

impl Widget for BarsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bars: Vec<(Value, BarColor)> = self.bars.iter().collect();
        let width = area.width as usize;

        for x in 0..area.width {
            let Some(&(value, color)) =
                bar_at_column(x as usize, width, bars.len()).and_then(|idx| bars.get(idx))
            else {
                continue;
            };
            let fg = self.color_of(color);
            let height = scale_height(value, area.height).min(area.height);
            for dy in 0..height {
                let y = area.bottom() - 1 - dy;
                if let Some(cell) = buf.cell_mut((area.x + x, y)) {
                    cell.set_symbol("█").set_fg(fg);
                }
            }
        }
    }
}
