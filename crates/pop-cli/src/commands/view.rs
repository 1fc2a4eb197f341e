//! View command implementation
//!
//! Fetches the dataset once, then redraws the chart on every year change.
//! Playback ticks and stdin commands are handled in one loop.

use anyhow::{bail, Context, Result};
use pop_client::{render_state, Fetcher, PlaybackController, RenderOptions, ViewState};
use std::io::{BufRead, Write};
use tokio::sync::mpsc;

use crate::cli::{GlobalArgs, ViewArgs, ViewFormat};
use crate::commands::common::load_config;

const HELP: &str = "Commands: p = play/pause, <year> = select year, q = quit";

/// An interactive command read from stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    TogglePlay,
    SelectYear(i32),
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    let input = line.trim().to_ascii_lowercase();
    match input.as_str() {
        "" => None,
        "p" | "play" | "pause" => Some(Command::TogglePlay),
        "q" | "quit" | "exit" => Some(Command::Quit),
        "h" | "?" | "help" => Some(Command::Help),
        other => Some(
            other
                .parse()
                .map(Command::SelectYear)
                .unwrap_or(Command::Help),
        ),
    }
}

/// Read stdin on a dedicated thread so a pending read never holds up exit
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Where and how redraws go
struct Display {
    format: ViewFormat,
    options: RenderOptions,
}

impl Display {
    fn draw(&self, state: &ViewState) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        match self.format {
            ViewFormat::Text => {
                if self.options.color {
                    // Clear screen and home the cursor so redraws animate in place
                    write!(stdout, "\x1b[2J\x1b[H")?;
                }
                write!(stdout, "{}", render_state(state, &self.options))?;
            }
            ViewFormat::Json => {
                if let Some(ready) = state.ready() {
                    writeln!(stdout, "{}", serde_json::to_string(&ready.chart())?)?;
                }
            }
        }
        stdout.flush()?;
        Ok(())
    }
}

/// Execute the view command
pub async fn execute(args: &ViewArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    if let Some(url) = &args.url {
        config.api_url = url.clone();
    }
    if let Some(interval_ms) = args.interval_ms {
        config.play_interval_ms = interval_ms;
    }
    config.validate().context("Invalid configuration")?;

    let display = Display {
        format: args.format,
        options: RenderOptions {
            width: args.width,
            color: !args.no_color,
        },
    };

    let (mut controller, mut ticks) = PlaybackController::new(config.play_interval());
    log::debug!("Playback interval: {:?}", controller.interval());
    display.draw(controller.state())?;

    let fetcher = Fetcher::new(&config.api_url);
    controller.on_loaded(fetcher.load().await);
    if let ViewState::Error { message } = controller.state() {
        bail!("Failed to load {}: {message}", fetcher.url());
    }

    if let Some(year) = args.year {
        if !controller.select_year(year) {
            log::warn!("Year {year} not found; starting at the earliest year");
        }
    }
    if args.play {
        controller.set_playing(true);
    }
    display.draw(controller.state())?;

    let mut input = spawn_stdin_reader();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            Some(tick) = ticks.recv() => {
                if controller.on_tick(tick).is_some() {
                    display.draw(controller.state())?;
                }
            }
            line = input.recv(), if stdin_open => {
                let Some(line) = line else {
                    // Without input only playback can change the view
                    stdin_open = false;
                    if !controller.state().is_playing() {
                        break;
                    }
                    continue;
                };
                match parse_command(&line) {
                    Some(Command::Quit) => break,
                    Some(Command::TogglePlay) => {
                        controller.toggle_play();
                        display.draw(controller.state())?;
                    }
                    Some(Command::SelectYear(year)) => {
                        if controller.select_year(year) {
                            display.draw(controller.state())?;
                        } else {
                            eprintln!("Year {year} is not in the dataset");
                        }
                    }
                    Some(Command::Help) => eprintln!("{HELP}"),
                    None => {}
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("p"), Some(Command::TogglePlay));
        assert_eq!(parse_command(" Pause \n"), Some(Command::TogglePlay));
        assert_eq!(parse_command("2001"), Some(Command::SelectYear(2001)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("?"), Some(Command::Help));
        assert_eq!(parse_command("rewind"), Some(Command::Help));
        assert_eq!(parse_command("   "), None);
    }
}
