//! Terminal demo for the dungeon engine.
//!
//! Reads one instruction per line from stdin, then runs the queued commands
//! through a paced session runner and prints the dungeon after every step.
//!
//! Accepted lines: `<command> <direction>` (e.g. `move right`, `attack up`),
//! `unlock <command>`, `buy <product>` (`extra-command`, `health-potion`,
//! `extinction-book`). Empty lines and lines starting with `#` are skipped.
//! Set `DUNGEON_OUTPUT=json` to print every update as a JSON line.

use std::io::{self, BufRead};
use std::time::Duration;

use actix::Actor;
use log::{info, warn};

use code_dungeon::config::GameConfig;
use code_dungeon::config::session::{COMMAND_DELAY_MS, json_output_from_env};
use code_dungeon::game::observer::EventBuffer;
use code_dungeon::game::session::GameSession;
use code_dungeon::game::types::{Command, CommandKind, Purchase};
use code_dungeon::runner::console::ConsoleRenderer;
use code_dungeon::runner::messages::{ApplyPurchase, EnqueueCommand, IsRunning, StartRun, Subscribe, UnlockCommand};
use code_dungeon::runner::server::SessionRunner;

enum Instruction {
    Queue(Command),
    Unlock(CommandKind),
    Buy(Purchase),
}

fn parse_instruction(line: &str) -> Result<Instruction, code_dungeon::game::GameError> {
    match line.split_once(char::is_whitespace) {
        Some(("unlock", kind)) => Ok(Instruction::Unlock(kind.parse()?)),
        Some(("buy", product)) => Ok(Instruction::Buy(product.parse()?)),
        _ => Ok(Instruction::Queue(line.parse()?)),
    }
}

#[actix::main]
async fn main() -> io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let session = GameSession::with_observer(GameConfig::default(), EventBuffer::new()).map_err(io::Error::other)?;

    // Read the whole script first; the runner paces execution afterwards.
    let mut instructions = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_instruction(line) {
            Ok(instruction) => instructions.push(instruction),
            Err(err) => warn!("[Main] Skipping `{}`: {}", line, err),
        }
    }

    let renderer = ConsoleRenderer::new(json_output_from_env()).start();
    let runner = SessionRunner::new(session, Duration::from_millis(COMMAND_DELAY_MS)).start();
    runner
        .send(Subscribe { recipient: renderer.recipient() })
        .await
        .map_err(io::Error::other)?;

    for instruction in instructions {
        match instruction {
            Instruction::Queue(command) => {
                if let Err(err) = runner.send(EnqueueCommand { command }).await.map_err(io::Error::other)? {
                    warn!("[Main] `{}` not queued: {}", command, err);
                }
            }
            Instruction::Unlock(kind) => {
                runner.send(UnlockCommand { kind }).await.map_err(io::Error::other)?;
            }
            Instruction::Buy(purchase) => {
                runner.send(ApplyPurchase { purchase }).await.map_err(io::Error::other)?;
            }
        }
    }

    let scheduled = runner.send(StartRun).await.map_err(io::Error::other)?;
    info!("[Main] Running {} command(s)", scheduled);

    while runner.send(IsRunning).await.map_err(io::Error::other)? {
        actix::clock::sleep(Duration::from_millis(50)).await;
    }
    // Let the renderer print the last updates.
    actix::clock::sleep(Duration::from_millis(50)).await;
    Ok(())
}
