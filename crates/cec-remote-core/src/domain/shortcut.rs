//! Desktop shortcut (`.desktop` launcher) parsing.
//!
//! Only the launch command matters here.  It is taken from the first line that
//! starts with `Exec=`; the rest of that line is split on whitespace into the
//! executable and its arguments.  Field codes such as `%U` are passed through
//! untouched.
//!
//! ```text
//! [Desktop Entry]
//! Name=Kodi
//! Exec=kodi --standalone
//! ```
//!
//! yields the program `kodi` with the single argument `--standalone`.

/// Marker of the line carrying the launch command.
pub const EXEC_MARKER: &str = "Exec=";

/// A parsed launch command: executable plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchCommand {
    /// Extracts the launch command from the contents of a shortcut file.
    ///
    /// Returns `None` when there is no `Exec=` line or it has no tokens.
    pub fn from_desktop_entry(contents: &str) -> Option<Self> {
        let line = contents
            .lines()
            .find_map(|line| line.strip_prefix(EXEC_MARKER))?;
        Self::from_command_line(line)
    }

    /// Splits a command line on whitespace.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let program = tokens.next()?;
        Some(Self {
            program,
            args: tokens.collect(),
        })
    }

    /// The command line as it would be typed, used for notifications.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_exec_line_yields_program_and_args() {
        let cmd = LaunchCommand::from_desktop_entry("Exec=chromium-browser --kiosk https://tv.example\n")
            .expect("exec line must parse");
        assert_eq!(cmd.program, "chromium-browser");
        assert_eq!(cmd.args, vec!["--kiosk", "https://tv.example"]);
    }

    #[test]
    fn test_exec_line_inside_full_desktop_entry() {
        let contents = "[Desktop Entry]\nType=Application\nName=Kodi\nExec=kodi --standalone\nIcon=kodi\n";
        let cmd = LaunchCommand::from_desktop_entry(contents).unwrap();
        assert_eq!(cmd.program, "kodi");
        assert_eq!(cmd.args, vec!["--standalone"]);
    }

    #[test]
    fn test_first_exec_line_wins() {
        let contents = "Exec=first\nExec=second --flag\n";
        let cmd = LaunchCommand::from_desktop_entry(contents).unwrap();
        assert_eq!(cmd.program, "first");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_empty_exec_line_yields_none() {
        assert_eq!(LaunchCommand::from_desktop_entry("Exec=\n"), None);
        assert_eq!(LaunchCommand::from_desktop_entry("Exec=   \n"), None);
    }

    #[test]
    fn test_missing_exec_line_yields_none() {
        assert_eq!(LaunchCommand::from_desktop_entry("[Desktop Entry]\nName=Nothing\n"), None);
    }

    #[test]
    fn test_indented_exec_is_not_a_marker() {
        assert_eq!(LaunchCommand::from_desktop_entry("  Exec=vlc\n"), None);
    }

    #[test]
    fn test_crlf_line_endings_are_not_part_of_args() {
        let cmd = LaunchCommand::from_desktop_entry("Exec=vlc --fullscreen\r\n").unwrap();
        assert_eq!(cmd.args, vec!["--fullscreen"]);
    }

    #[test]
    fn test_display_joins_tokens_with_spaces() {
        let cmd = LaunchCommand::from_command_line("vlc  --fullscreen   movie.mkv").unwrap();
        assert_eq!(cmd.display(), "vlc --fullscreen movie.mkv");
    }
}
