//! Live view: re-renders whenever the controller publishes new data.
//!
//! While running, one-letter commands read from stdin drive the view:
//! `r` reloads the sheet, `n`/`p` step a week forwards or back, `t` jumps to
//! the current week and `q` quits. Closing stdin only disables the commands.

use std::{
    io::{self, IsTerminal, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{
    acquire::{AcquisitionState, Controller, Phase},
    cli::WatchArgs,
    output,
    session::Session,
    view,
};

const KEYS: &str = "Commands: r refresh, n next week, p previous week, t this week, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Refresh,
    NextWeek,
    PreviousWeek,
    Today,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "refresh" => Some(Command::Refresh),
            "n" | "next" => Some(Command::NextWeek),
            "p" | "prev" | "previous" => Some(Command::PreviousWeek),
            "t" | "today" => Some(Command::Today),
            "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub async fn execute(args: &WatchArgs) -> Result<()> {
    let interval = Duration::from_secs(args.interval);
    let mut controller = Controller::with_interval(view::http_client()?, interval);
    let mut session = Session::new(args.view.start_date());
    let mut updates = controller.subscribe();

    session.change_source(&mut controller, &args.source.url).await;
    if controller.source().is_none() {
        return output::write_text(io::stdout(), view::INSTRUCTIONS);
    }
    *session.selection_mut() = args.filters.selection();
    info!(
        "Watching {} (refresh every {}s, Ctrl-C to stop)",
        args.source.url,
        controller.interval().as_secs()
    );
    info!("{KEYS}");

    let mut screen = Screen::default();
    let mut commands = Some(BufReader::new(tokio::io::stdin()).lines());
    loop {
        let state = updates.borrow_and_update().clone();
        screen.draw(&mut session, &state, args)?;

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            line = next_line(&mut commands) => {
                let Some(line) = line.context("Reading commands from stdin")? else {
                    debug!("stdin closed; commands disabled");
                    commands = None;
                    continue;
                };
                match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => {
                        run_command(command, &mut session, &controller).await;
                        screen.invalidate();
                    }
                    None if line.trim().is_empty() => {}
                    None => warn!("Unknown command '{}'. {KEYS}", line.trim()),
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("Listening for Ctrl-C")?;
                break;
            }
        }
    }
    info!("Stopping");
    controller.stop_polling();
    Ok(())
}

async fn next_line(
    commands: &mut Option<Lines<BufReader<Stdin>>>,
) -> io::Result<Option<String>> {
    match commands {
        Some(lines) => lines.next_line().await,
        None => std::future::pending().await,
    }
}

async fn run_command(command: Command, session: &mut Session, controller: &Controller) {
    debug!("Running {command:?}");
    match command {
        Command::Refresh => controller.refresh().await,
        Command::NextWeek => session.next_week(),
        Command::PreviousWeek => session.previous_week(),
        Command::Today => session.go_to_today(),
        Command::Quit => {}
    }
}

/// What is currently on screen, so unchanged states are not redrawn.
#[derive(Debug, Default)]
struct Screen {
    shown: Option<Stamp>,
    // Sheet week the view was last moved to; `None` before the first draw.
    synced_week: Option<Option<NaiveDate>>,
}

impl Screen {
    fn invalidate(&mut self) {
        self.shown = None;
    }

    fn draw(
        &mut self,
        session: &mut Session,
        state: &AcquisitionState,
        args: &WatchArgs,
    ) -> Result<()> {
        let stamp = Stamp::of(state);
        if self.shown == Some(stamp) {
            return Ok(());
        }
        match state.phase() {
            Phase::Idle | Phase::Loading => {}
            Phase::Errored => {
                if let Some(message) = &state.error {
                    eprintln!("error: {message}");
                }
                self.shown = Some(stamp);
            }
            Phase::Ready => {
                let Some(dataset) = &state.dataset else {
                    return Ok(());
                };
                if self.synced_week != Some(dataset.week_start_date) {
                    view::position(session, dataset, &args.view);
                    self.synced_week = Some(dataset.week_start_date);
                }
                if args.view.output.is_none() && io::stdout().is_terminal() {
                    let mut stdout = io::stdout();
                    write!(stdout, "\u{1b}[2J\u{1b}[H")
                        .and_then(|()| stdout.flush())
                        .context("Clearing the terminal")?;
                }
                view::write_week(session, dataset, state.last_updated, &args.view)?;
                self.shown = Some(stamp);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stamp {
    Error,
    Data(Option<i64>),
}

impl Stamp {
    fn of(state: &AcquisitionState) -> Self {
        match state.phase() {
            Phase::Errored => Stamp::Error,
            _ => Stamp::Data(state.last_updated.map(|t| t.timestamp_micros())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_accept_letters_and_words() {
        assert_eq!(Command::parse("r"), Some(Command::Refresh));
        assert_eq!(Command::parse(" N \n"), Some(Command::NextWeek));
        assert_eq!(Command::parse("previous"), Some(Command::PreviousWeek));
        assert_eq!(Command::parse("today"), Some(Command::Today));
        assert_eq!(Command::parse("Q"), Some(Command::Quit));
        assert_eq!(Command::parse("x"), None);
        assert_eq!(Command::parse(""), None);
    }
}
