//! Terminal rendering of the view state

use crate::chart::ChartSpec;
use crate::state::ViewState;
use std::fmt::Write;

const TITLE: &str = "Population Growth Chart";
const BAR_CHAR: char = '█';

/// Terminal drawing options
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Columns used by the longest bar
    pub width: usize,
    /// Emit 24-bit ANSI colours
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 50,
            color: true,
        }
    }
}

/// Render the whole view: loading, error message, or the chart with controls
pub fn render_state(state: &ViewState, options: &RenderOptions) -> String {
    match state {
        ViewState::Loading => "Loading...\n".to_string(),
        ViewState::Error { message } => format!("Error: {message}\n"),
        ViewState::Ready(ready) => {
            let control = if ready.is_playing() { "Pause" } else { "Play" };
            let mut out = format!(
                "{TITLE}  {}  [{control}: p] [year: {}..{}] [quit: q]\n",
                ready.selected_year(),
                ready.dataset().earliest_year(),
                ready.dataset().years().last().copied().unwrap_or_default(),
            );
            out.push_str(&render_chart(&ready.chart(), options));
            out
        }
    }
}

/// Render the bars of a chart, one line per country
pub fn render_chart(chart: &ChartSpec, options: &RenderOptions) -> String {
    let label_width = chart.bars().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let max = chart.max_value();
    let mut out = String::new();

    for bar in chart.bars() {
        let length = scaled_length(bar.value, max, options.width);
        let body: String = std::iter::repeat(BAR_CHAR).take(length).collect();
        let body = match (options.color, hex_to_rgb(bar.color)) {
            (true, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{body}\x1b[0m"),
            _ => body,
        };
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{:<label_width$} {body} {}",
            bar.label, bar.value
        );
    }
    out
}

fn scaled_length(value: i64, max: i64, width: usize) -> usize {
    if max <= 0 || value <= 0 {
        return 0;
    }
    ((value as f64 / max as f64) * width as f64).round() as usize
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
