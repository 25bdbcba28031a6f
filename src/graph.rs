use std::io::stdout;

use anyhow::Result;
use crossterm::execute;
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block},
    Terminal, TerminalOptions, Viewport,
};

use crate::output::format_cost;
use crate::series::SeriesView;

/// Bar heights are integers, so costs are charted in cents.
fn cents(cost: f64) -> u64 {
    (cost * 100.0).round().max(0.0) as u64
}

/// `2024-03-01` → `03-01`; the year is in the chart title.
fn short_label(label: &str) -> &str {
    label.get(5..).unwrap_or(label)
}

fn chart_title(view: &SeriesView) -> String {
    match (view.labels.first(), view.labels.last()) {
        (Some(first), Some(last)) if first != last => {
            format!("{}: {first} to {last} ({})", view.title, format_cost(view.total))
        }
        (Some(day), _) => format!("{}: {day} ({})", view.title, format_cost(view.total)),
        _ => format!("{}: no data", view.title),
    }
}

pub fn cost_chart(view: &SeriesView) -> BarChart<'_> {
    let bars: Vec<Bar> = view
        .labels
        .iter()
        .zip(view.values.iter())
        .map(|(label, &cost)| {
            Bar::default()
                .value(cents(cost))
                .text_value(format!("{:.2}", cost))
                .label(Line::from(short_label(label)))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    BarChart::default()
        .block(Block::bordered().title(chart_title(view)))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::White))
        .label_style(Style::default().fg(Color::DarkGray))
}

pub fn render(view: &SeriesView) -> Result<()> {
    if view.is_empty() {
        eprintln!("No costs to plot for this selection.");
        return Ok(());
    }

    let chart_height: u16 = 17; // 15 for bars + 2 for border

    let mut terminal = Terminal::with_options(
        CrosstermBackend::new(stdout()),
        TerminalOptions {
            viewport: Viewport::Inline(chart_height),
        },
    )?;

    terminal.draw(|frame| {
        frame.render_widget(cost_chart(view), frame.area());
    })?;

    // Move cursor below the chart
    execute!(stdout(), crossterm::cursor::MoveDown(1))?;

    Ok(())
}
