mod helper;
mod render;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use coach_application::SessionController;
use coach_core::session::InterviewMode;
use coach_core::{CoachConfig, CoachError};
use coach_infrastructure::TomlConfigRepository;

use helper::{COMMANDS, CliHelper};

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Interview Coach - practice interviews in your terminal", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// What the input loop should do after a line has been handled.
enum Flow {
    Continue,
    Prefill(String),
    Quit,
}

fn load_config(path: Option<PathBuf>) -> Result<CoachConfig> {
    let repository = match path {
        Some(path) => TomlConfigRepository::with_path(path),
        None => TomlConfigRepository::new()?,
    };
    repository
        .load()
        .with_context(|| format!("Failed to load config from {:?}", repository.path()))
}

fn print_help() {
    println!("{}", "Commands:".bright_yellow());
    for (name, description) in COMMANDS {
        println!("  {} {}", format!("{:<12}", name).bright_cyan(), description.bright_black());
    }
    println!("  {} {}", format!("{:<12}", "quit").bright_cyan(), "leave the coach".bright_black());
    println!("{}", "Anything else is sent to the coach as your answer.".bright_black());
}

async fn handle_command(controller: &SessionController, command: &str, arg: Option<&str>) -> Result<Flow> {
    match command {
        "/mock" => {
            if !controller.start_mock_interview().await {
                println!("{}", "Already in a mock interview.".bright_black());
            }
        }
        "/practice" | "/chat" => {
            let mode = if command == "/practice" {
                InterviewMode::Practice
            } else {
                InterviewMode::Chat
            };
            // The renderer announces an effective switch with the mode header.
            if !controller.set_mode(mode).await {
                println!("{}", format!("Already in {} mode.", mode).bright_black());
            }
        }
        "/reset" => controller.reset_session().await,
        "/record" => {
            if controller.toggle_recording().await {
                println!("{}", "Recording... type /record again to stop.".red());
            } else if let Some(text) = controller.take_input_buffer().await {
                println!("{}", "Recording stopped. Edit the transcription and press Enter.".bright_yellow());
                return Ok(Flow::Prefill(text));
            }
        }
        "/stats" => render::print_statistics(&controller.snapshot().await),
        "/transcript" => {
            let session = controller.snapshot().await;
            render::print_mode_header(session.mode());
            println!(
                "{}",
                format!("--- transcript ({} turns) ---", session.transcript().len()).bright_black()
            );
            for turn in session.transcript().all() {
                render::print_turn(turn);
            }
        }
        "/export" => {
            let json = serde_json::to_string_pretty(&controller.snapshot().await)?;
            match arg {
                Some(path) => {
                    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
                    println!("{}", format!("Session exported to {}", path).bright_green());
                }
                None => println!("{}", json),
            }
        }
        "/help" => print_help(),
        _ => println!("{}", format!("Unknown command: {} (try /help)", command).bright_black()),
    }
    Ok(Flow::Continue)
}

async fn handle_line(controller: &SessionController, line: &str) -> Result<Flow> {
    if line == "quit" || line == "exit" {
        return Ok(Flow::Quit);
    }

    if line.starts_with('/') {
        let mut parts = line.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());
        return handle_command(controller, command, arg).await;
    }

    match controller.submit_user_turn(line).await {
        Ok(pending) => {
            println!("{}", format!("> {}", line).green());
            tracing::debug!("[Repl] Reply pending for turn {}", pending.turn_id());
        }
        Err(CoachError::SessionBusy) => {
            println!("{}", "The coach is still thinking. Please wait for the reply.".yellow());
        }
        Err(CoachError::EmptyInput) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(Flow::Continue)
}

/// The main entry point for the interview coach REPL.
///
/// Sets up logging and configuration, spawns the snapshot renderer, and then
/// reads lines until `quit`, `exit`, or EOF.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend Initialization =====
    let config = load_config(cli.config)?;
    let controller = SessionController::with_stub(&config)?;
    let renderer = tokio::spawn(render::render_updates(controller.subscribe()));

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Interview Coach ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    let mut prefill: Option<String> = None;

    // ===== Main REPL Loop =====
    loop {
        let readline = match prefill.take() {
            Some(text) => rl.readline_with_initial(">> ", (&text, "")),
            None => rl.readline(">> "),
        };

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match handle_line(&controller, trimmed).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Prefill(text)) => prefill = Some(text),
                    Ok(Flow::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => eprintln!("{}", format!("Error: {:#}", e).red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // The renderer stops once the controller and any in-flight reply tasks are gone.
    drop(controller);
    let _ = renderer.await;

    Ok(())
}
