/// Platform terminal detection
///
/// Works out which terminal emulator service commands should be opened in.

use crate::catalog::CommandTerminal;
use std::env;
use std::path::Path;

/// Platforms we know a default terminal for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    /// Platform this binary was built for, if supported
    pub fn current() -> Option<Platform> {
        if cfg!(target_os = "macos") {
            Some(Platform::MacOs)
        } else if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else {
            None
        }
    }

    /// Identifier stored in `CommandTerminal::platform_id`
    pub fn id(&self) -> &'static str {
        match self {
            Platform::MacOs => "macosx",
            Platform::Linux => "linux",
            Platform::Windows => "win32",
        }
    }

    /// Canonical terminal for this platform
    pub fn default_terminal(&self) -> CommandTerminal {
        match self {
            Platform::MacOs => CommandTerminal::new(
                self.id(),
                "/usr/bin/osascript",
                &["-e", "tell application \"Terminal\" to do script"],
            ),
            Platform::Linux => {
                // $TERMINAL wins, then the Debian alternatives link, then xterm
                let path = env::var("TERMINAL")
                    .ok()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| {
                        if Path::new("/usr/bin/x-terminal-emulator").exists() {
                            "/usr/bin/x-terminal-emulator".to_string()
                        } else {
                            "/usr/bin/xterm".to_string()
                        }
                    });
                CommandTerminal::new(self.id(), &path, &["-e"])
            }
            Platform::Windows => {
                CommandTerminal::new(self.id(), "cmd.exe", &["/c", "start", "cmd.exe", "/k"])
            }
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Terminal detector
pub struct TerminalDetector;

impl TerminalDetector {
    /// Default terminal for the running platform
    ///
    /// Returns `None` on platforms we have no terminal for.
    pub fn detect() -> Option<CommandTerminal> {
        Platform::current().map(|p| p.default_terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_ids() {
        assert_eq!(Platform::MacOs.id(), "macosx");
        assert_eq!(Platform::Linux.id(), "linux");
        assert_eq!(Platform::Windows.id(), "win32");
        assert_eq!(Platform::Linux.to_string(), "linux");
    }

    #[test]
    fn test_windows_terminal() {
        let terminal = Platform::Windows.default_terminal();
        assert_eq!(terminal.path, "cmd.exe");
        assert_eq!(terminal.args, vec!["/c", "start", "cmd.exe", "/k"]);
    }

    #[test]
    fn test_linux_terminal_uses_exec_flag() {
        let terminal = Platform::Linux.default_terminal();
        assert_eq!(terminal.platform_id, "linux");
        assert_eq!(terminal.args, vec!["-e"]);
        assert!(!terminal.path.is_empty());
    }

    #[test]
    fn test_detect_matches_current_platform() {
        let detected = TerminalDetector::detect();
        match Platform::current() {
            Some(platform) => assert_eq!(detected.unwrap().platform_id, platform.id()),
            None => assert!(detected.is_none()),
        }
    }
}
