// src/core/command.rs

use crate::models::SessionFlags;
use std::path::{Path, PathBuf};

/// The path written into the command line: the file's own path when it is
/// absolute, otherwise `./<basename>` relative to the terminal's directory.
pub fn executable_path(file: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    match file.file_name() {
        Some(name) => Path::new(".").join(name),
        None => file.to_path_buf(),
    }
}

/// Builds the lines sent to the terminal for one run: an optional `clear`,
/// then `[sudo ]"<path>"[ <args>]`. Blank arguments are left out.
pub fn compose_command(flags: SessionFlags, file: &Path, args: Option<&str>) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if flags.clear_before_run {
        lines.push("clear".to_string());
    }

    let exec_path = executable_path(file);
    let mut command = if flags.sudo_mode {
        format!("sudo \"{}\"", exec_path.display())
    } else {
        format!("\"{}\"", exec_path.display())
    };

    if let Some(args) = args.filter(|a| !a.trim().is_empty()) {
        command.push(' ');
        command.push_str(args);
    }
    lines.push(command);
    lines
}

/// Whether `args` would split into words the way a POSIX shell reads them.
/// Unbalanced quotes make this `false`.
pub fn args_are_well_formed(args: &str) -> bool {
    shlex::split(args).is_some()
}
