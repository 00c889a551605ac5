// src/system/prompt.rs

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Interactive prompt failed: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

/// Prompt and notification surface.
///
/// `Ok(None)` from a question means the user dismissed it, which callers
/// treat as a no-op rather than an error.
pub trait Prompter {
    /// Asks for a line of text, pre-filled with `prefill`.
    fn input(
        &mut self,
        prompt: &str,
        prefill: &str,
        placeholder: &str,
    ) -> Result<Option<String>, PromptError>;

    /// Shows a warning and lets the user pick one of `choices`.
    fn choose(&mut self, message: &str, choices: &[&str]) -> Result<Option<String>, PromptError>;

    /// Shows an informational notification.
    fn info(&mut self, message: &str);

    /// Shows a warning that needs no answer.
    fn warn(&mut self, message: &str);

    /// Shows the failure of an action.
    fn error(&mut self, message: &str);
}

/// Terminal prompts backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter {
    assume_yes: bool,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every `choose` with its first choice instead of asking.
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }
}

/// Ctrl+C or Esc inside a prompt is a dismissal, not a failure.
fn dismissed_or<T>(result: Result<T, dialoguer::Error>) -> Result<Option<T>, PromptError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Prompter for DialoguerPrompter {
    fn input(
        &mut self,
        prompt: &str,
        prefill: &str,
        placeholder: &str,
    ) -> Result<Option<String>, PromptError> {
        let prompt = if prefill.is_empty() && !placeholder.is_empty() {
            format!("{} ({})", prompt, placeholder)
        } else {
            prompt.to_string()
        };
        dismissed_or(
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .with_initial_text(prefill)
                .allow_empty(true)
                .interact_text(),
        )
    }

    fn choose(&mut self, message: &str, choices: &[&str]) -> Result<Option<String>, PromptError> {
        if self.assume_yes {
            return Ok(choices.first().map(|c| c.to_string()));
        }
        println!("{}", message.yellow());
        let selection = dismissed_or(
            Select::with_theme(&ColorfulTheme::default())
                .items(choices)
                .default(0)
                .interact_opt(),
        )?;
        Ok(selection
            .flatten()
            .and_then(|index| choices.get(index))
            .map(|c| c.to_string()))
    }

    fn info(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{}", message.yellow());
    }

    fn error(&mut self, message: &str) {
        eprintln!("{}: {}", "Error".red().bold(), message);
    }
}

/// Fire-and-forget UI state signalling (e.g. which toggles show as checked).
pub trait UiContext {
    fn set_context(&mut self, key: &str, value: bool);
}

/// Records context keys so the interactive session can render them in its prompt.
/// Clones share the same values.
#[derive(Debug, Default, Clone)]
pub struct ContextIndicators {
    values: Rc<RefCell<BTreeMap<String, bool>>>,
}

impl ContextIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.values.borrow().get(key).copied().unwrap_or(false)
    }
}

impl UiContext for ContextIndicators {
    fn set_context(&mut self, key: &str, value: bool) {
        log::debug!("setContext {} = {}", key, value);
        self.values.borrow_mut().insert(key.to_string(), value);
    }
}
