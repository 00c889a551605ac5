// src/cli/handlers/recent.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use crate::cli::App;
use crate::core::controller::file_key;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true)]
struct RecentArgs {
    /// Print the entries as JSON.
    #[arg(long)]
    json: bool,
}

/// One remembered argument set, as listed by `recent`.
#[derive(Serialize, Debug, PartialEq, Eq)]
struct RecentEntry<'a> {
    path: &'a str,
    args: &'a str,
    #[serde(rename = "lastUsed")]
    last_used: u64,
    active: bool,
}

fn collect_entries(app: &App) -> (Vec<RecentEntry<'_>>, Option<String>) {
    let active = app.controller.active_file().map(|p| file_key(&p));
    let entries = app
        .controller
        .cache()
        .recent()
        .into_iter()
        .map(|(path, entry)| RecentEntry {
            path,
            args: &entry.args,
            last_used: entry.last_used,
            active: active.as_deref() == Some(path),
        })
        .collect();
    (entries, active)
}

/// Entry point for the 'recent' action.
pub fn handle(args: Vec<String>, app: &mut App) -> Result<()> {
    let recent_args = RecentArgs::try_parse_from(&args)?;
    let (entries, _) = collect_entries(app);

    if recent_args.json {
        let json = serde_json::to_string_pretty(&entries)
            .with_context(|| t!("recent.error.json_failed"))?;
        println!("{}", json);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", t!("recent.info.empty"));
        return Ok(());
    }

    println!("{}", t!("recent.header").bold());
    for entry in &entries {
        let marker = if entry.active { "*" } else { " " };
        let args = if entry.args.is_empty() {
            t!("recent.label.no_args").dimmed().to_string()
        } else {
            entry.args.to_string()
        };
        println!("{} {}  {}", marker.green(), entry.path.cyan(), args);
    }
    Ok(())
}
