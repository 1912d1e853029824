// Platform-aware executable name resolution

/// Host operating system family, as far as command naming is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Posix,
    Windows,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else {
            HostOs::Posix
        }
    }

    /// Line terminator written by console programs on this platform
    pub fn newline(self) -> &'static str {
        match self {
            HostOs::Posix => "\n",
            HostOs::Windows => "\r\n",
        }
    }
}

/// Tools installed as batch scripts with a `.cmd` wrapper on Windows
const CMD_TOOLS: &[&str] = &[
    "npm", "bundle", "bundler", "racc", "rake", "rdoc", "ri", "ridk", "erb", "irb", "gem",
];

/// Tools installed as `.bat` wrappers on Windows
const BAT_TOOLS: &[&str] = &["gradle", "mix"];

/// Resolve a logical tool name to the name that can actually be spawned.
///
/// On POSIX hosts this is the identity. On Windows, `CreateProcess` does not
/// consult `PATHEXT`, so script wrappers must be named with their extension.
/// Names that already carry an extension or a directory component are left
/// untouched.
pub fn resolve_executable(name: &str, os: HostOs) -> String {
    match os {
        HostOs::Posix => name.to_string(),
        HostOs::Windows => {
            if name.contains(['/', '\\']) || has_extension(name) {
                return name.to_string();
            }

            let suffix = if CMD_TOOLS.contains(&name) {
                ".cmd"
            } else if BAT_TOOLS.contains(&name) {
                ".bat"
            } else {
                ".exe"
            };
            format!("{name}{suffix}")
        }
    }
}

fn has_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    [".exe", ".cmd", ".bat", ".com"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_is_identity() {
        for name in ["npm", "gradle", "cargo", "python3", "mix"] {
            assert_eq!(resolve_executable(name, HostOs::Posix), name);
        }
    }

    #[test]
    fn test_windows_cmd_tools() {
        for name in CMD_TOOLS {
            assert_eq!(
                resolve_executable(name, HostOs::Windows),
                format!("{name}.cmd")
            );
        }
    }

    #[test]
    fn test_windows_bat_tools() {
        assert_eq!(resolve_executable("gradle", HostOs::Windows), "gradle.bat");
        assert_eq!(resolve_executable("mix", HostOs::Windows), "mix.bat");
    }

    #[test]
    fn test_windows_default_exe() {
        assert_eq!(resolve_executable("cargo", HostOs::Windows), "cargo.exe");
        assert_eq!(resolve_executable("dotnet", HostOs::Windows), "dotnet.exe");
        assert_eq!(resolve_executable("dub", HostOs::Windows), "dub.exe");
    }

    #[test]
    fn test_windows_keeps_explicit_names() {
        assert_eq!(resolve_executable("node.exe", HostOs::Windows), "node.exe");
        assert_eq!(
            resolve_executable(r"env\Scripts\python.exe", HostOs::Windows),
            r"env\Scripts\python.exe"
        );
        assert_eq!(resolve_executable("gradlew.BAT", HostOs::Windows), "gradlew.BAT");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for os in [HostOs::Posix, HostOs::Windows] {
            for name in ["npm", "gradle", "go", "ruby"] {
                assert_eq!(resolve_executable(name, os), resolve_executable(name, os));
            }
        }
    }

    #[test]
    fn test_newline() {
        assert_eq!(HostOs::Posix.newline(), "\n");
        assert_eq!(HostOs::Windows.newline(), "\r\n");
    }
}
