use crate::config::LaunchConfig;
use crate::error::LauncherError;
use crate::model::Entry;
use log::info;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

/// The shell command line for `entry`, wrapped in the terminal when needed.
pub fn command_line(entry: &Entry, config: &LaunchConfig) -> String {
    if entry.open_in_terminal() {
        [
            config.terminal.as_str(),
            config.terminal_flag.as_str(),
            entry.command(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    } else {
        entry.command().to_string()
    }
}

/// `sh -c <cmd_line>` with null stdio, in a process group of its own so
/// signals aimed at the launcher's terminal job do not reach it.
fn shell_command(cmd_line: &str) -> Command {
    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg(cmd_line)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0);
    command
}

/// Starts `entry` detached from the launcher and does not wait for it.
pub fn launch(entry: &Entry, config: &LaunchConfig) -> Result<(), LauncherError> {
    if entry.command().trim().is_empty() {
        return Err(LauncherError::EmptyCommand);
    }
    let cmd_line = command_line(entry, config);

    let child = shell_command(&cmd_line)
        .spawn()
        .map_err(|source| LauncherError::Launch {
            command: cmd_line.clone(),
            source,
        })?;
    info!("Launched `{}` (pid {})", cmd_line, child.id());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryType;
    use std::ffi::OsStr;

    fn config() -> LaunchConfig {
        LaunchConfig {
            terminal: "alacritty".into(),
            terminal_flag: "-e".into(),
        }
    }

    fn entry(command: &str, terminal: bool) -> Entry {
        Entry::synthetic("App".into(), command.into(), EntryType::Custom, terminal).unwrap()
    }

    #[test]
    fn plain_command_is_unchanged() {
        let entry = entry("nautilus --new-window", false);
        assert_eq!(command_line(&entry, &config()), "nautilus --new-window");
    }

    #[test]
    fn terminal_command_is_wrapped() {
        let entry = entry("htop -d 10", true);
        assert_eq!(command_line(&entry, &config()), "alacritty -e htop -d 10");

        let bare = LaunchConfig {
            terminal: "foot".into(),
            terminal_flag: String::new(),
        };
        assert_eq!(command_line(&entry, &bare), "foot htop -d 10");
    }

    #[test]
    fn runs_through_the_shell() {
        let command = shell_command("alacritty -e htop");
        assert_eq!(command.get_program(), OsStr::new("sh"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args, vec![OsStr::new("-c"), OsStr::new("alacritty -e htop")]);
    }

    #[test]
    fn blank_command_is_refused() {
        let entry = entry("   ", false);
        assert!(matches!(
            launch(&entry, &config()),
            Err(LauncherError::EmptyCommand)
        ));
    }
}
