// src/cli/handlers/session.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::{App, dispatcher};
use crate::constants::{CONTEXT_KEY_CLEAR_MODE, CONTEXT_KEY_SUDO_MODE, TERMINAL_ENV};
use crate::system::prompt::ContextIndicators;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct SessionArgs {
    /// The script to focus when the session starts.
    file: Option<PathBuf>,
}

/// What the loop should do after a line has been handled.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Entry point for the 'session' action.
pub fn handle(args: Vec<String>, app: &mut App) -> Result<()> {
    // 1. Parse args.
    let session_args = SessionArgs::try_parse_from(&args)?;

    // 2. Robustness: prevent a session inside one of our own terminals.
    if env::var(TERMINAL_ENV).is_ok() {
        return Err(anyhow!(t!("session.error.nested")));
    }

    // 3. Focus the starting script, if any.
    if let Some(file) = &session_args.file {
        app.controller.open(file);
    }

    // 4. Read commands until `exit` or end of input.
    println!("{}", t!("session.info.started"));
    let stdin = io::stdin();
    run_loop(stdin.lock(), app)?;
    println!("{}", t!("session.info.ended"));
    Ok(())
}

/// Reads commands one line at a time until `exit` or end of input.
///
/// Lines are handled strictly in order; a failing command is reported and the
/// loop keeps going.
fn run_loop(input: impl BufRead, app: &mut App) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if app.controller.poll_terminal() {
            println!("{}", t!("session.info.terminal_closed").dimmed());
        }

        print!("{}", render_prompt(&app.indicators));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        match handle_line(&line?, app) {
            Ok(Flow::Exit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => app.controller.report_error(&e.to_string()),
        }
    }
}

fn handle_line(line: &str, app: &mut App) -> Result<Flow> {
    let words = shlex::split(line).ok_or_else(|| anyhow!(t!("session.error.unbalanced_quotes")))?;
    log::debug!("Session line: {:?}", words);

    let Some((command, rest)) = words.split_first() else {
        return Ok(Flow::Continue);
    };
    let (command, rest) = (command.clone(), rest.to_vec());

    match command.as_str() {
        "exit" | "quit" => return Ok(Flow::Exit),
        "help" => println!("{}", t!("session.help")),
        "status" => print_status(app),
        "session" | "s" => return Err(anyhow!(t!("session.error.nested"))),
        "open" => {
            let [file] = rest.as_slice() else {
                return Err(anyhow!(t!("session.error.open_usage")));
            };
            app.controller.open(Path::new(file));
            if let Some(active) = app.controller.active_file() {
                println!(
                    "{}",
                    format!(t!("session.info.opened"), file = active.display()).green()
                );
            }
        }
        _ => dispatcher::dispatch(words, app)?,
    }
    Ok(Flow::Continue)
}

/// `[sudo] [clear] shrun> `, showing only the toggles that are on.
fn render_prompt(indicators: &ContextIndicators) -> String {
    let mut prompt = String::new();
    if indicators.is_set(CONTEXT_KEY_SUDO_MODE) {
        prompt.push_str(&format!("{} ", "[sudo]".red().bold()));
    }
    if indicators.is_set(CONTEXT_KEY_CLEAR_MODE) {
        prompt.push_str(&format!("{} ", "[clear]".blue()));
    }
    prompt.push_str(&format!("{} ", "shrun>".bold()));
    prompt
}

fn print_status(app: &App) {
    let file = app
        .controller
        .active_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| t!("session.status.none").to_string());
    let flags = app.controller.flags();
    let on_off = |enabled: bool| {
        if enabled {
            t!("toggle.status.enabled")
        } else {
            t!("toggle.status.disabled")
        }
    };

    println!(t!("session.status.file"), file = file);
    println!(t!("session.status.sudo"), status = on_off(flags.sudo_mode));
    println!(t!("session.status.clear"), status = on_off(flags.clear_before_run));
    println!(
        t!("session.status.terminal"),
        status = on_off(app.controller.has_terminal())
    );
}
