//! Live ceremony loop
//!
//! Stdin is read on a helper thread and forwarded over a channel; the main
//! loop owns the controller, applies commands and ticks the clock between
//! them.

use std::fs;
use std::io::{self, BufRead};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};

use ld_core::export_file_name;
use ld_draw::{CeremonyController, ResetOutcome};
use ld_stage::{AdvanceInput, Scene};

use crate::render;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str = "\
Commands:
  <enter> | next        advance the ceremony
  start                 start a draw immediately
  done                  suspense finished (with --manual)
  pause | resume
  scene <name>          curtain-closed, ready, suspense, reveal, winners-wall, thank-you
  winners               list winners
  export                write winners CSV to the current directory
  reset | reset!        clear winners (reset! skips the confirmation)
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Advance,
    StartDraw,
    Done,
    Pause,
    Resume,
    Scene(Scene),
    Winners,
    Export,
    Reset { confirmed: bool },
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        match words.next() {
            None | Some("n") | Some("next") => Self::Advance,
            Some("s") | Some("start") => Self::StartDraw,
            Some("d") | Some("done") => Self::Done,
            Some("p") | Some("pause") => Self::Pause,
            Some("resume") => Self::Resume,
            Some("scene") => match words.next().and_then(Scene::from_type_name) {
                Some(scene) => Self::Scene(scene),
                None => Self::Unknown(line.trim().to_string()),
            },
            Some("w") | Some("winners") => Self::Winners,
            Some("x") | Some("export") => Self::Export,
            Some("reset") => Self::Reset { confirmed: false },
            Some("reset!") => Self::Reset { confirmed: true },
            Some("h") | Some("help") | Some("?") => Self::Help,
            Some("q") | Some("quit") | Some("exit") => Self::Quit,
            Some(_) => Self::Unknown(line.trim().to_string()),
        }
    }
}

/// Whole milliseconds, saturating
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn run(mut controller: CeremonyController) -> Result<()> {
    let settings = controller.draw().settings();
    println!(
        "{} | tickets {}..={} | {} prizes",
        settings.custom_message,
        settings.ticket_start,
        settings.ticket_end,
        settings.number_of_prizes
    );
    println!("{HELP}");

    let lines = spawn_stdin_reader();
    let started = Instant::now();
    let clock = || millis(started.elapsed());

    loop {
        match lines.recv_timeout(TICK_INTERVAL) {
            Ok(line) => {
                let command = Command::parse(&line);
                if command == Command::Quit {
                    break;
                }
                apply(&mut controller, command, clock())?;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        controller.tick(clock());
        for event in controller.drain_events() {
            if let Some(line) = render::describe(&event.event) {
                println!("{line}");
            }
        }
    }

    log::info!("Leaving with {} winners", controller.winners().len());
    Ok(())
}

fn apply(controller: &mut CeremonyController, command: Command, now_ms: u64) -> Result<()> {
    match command {
        Command::Advance => {
            if !controller.advance_input(&AdvanceInput::key("Enter"), now_ms) {
                log::debug!("Advance ignored in {}", controller.scene().type_name());
            }
        }
        Command::StartDraw => report(controller.start_draw_now(now_ms)),
        Command::Done => report(controller.presentation_complete(now_ms).map(|_| ())),
        Command::Pause => {
            controller.pause(now_ms);
        }
        Command::Resume => {
            controller.resume(now_ms);
        }
        Command::Scene(scene) => report(controller.set_scene(scene, now_ms)),
        Command::Winners => println!("{}", render::winners_table(controller.winners())),
        Command::Export => match controller.export_csv() {
            Ok(text) => {
                let path = export_file_name(Local::now().date_naive());
                fs::write(&path, text).with_context(|| format!("Failed to write {path}"))?;
                println!("Winners written to {path}");
                if let Ok(summary) = controller.clipboard_text() {
                    println!("{summary}");
                }
            }
            Err(e) => println!("! {e}"),
        },
        Command::Reset { confirmed } => {
            if controller.reset_all(confirmed, now_ms) == ResetOutcome::NeedsConfirmation {
                println!("This clears all winners. Type `reset!` to confirm.");
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Unknown(text) => println!("Unknown command: {text} (try `help`)"),
        Command::Quit => {}
    }
    Ok(())
}

fn report(result: ld_core::LdResult<()>) {
    if let Err(e) = result {
        println!("! {e}");
    }
}
