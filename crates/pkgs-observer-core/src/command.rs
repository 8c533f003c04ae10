//! Command dispatch
//!
//! Maps a package manager to the argv that lists its upgradable packages.
//! Nothing here executes; see [`crate::normalizer`].

use std::fmt;

use crate::error::Result;
use crate::manager::PackageManagerId;

/// An executable plus a literal argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name, looked up in `PATH`
    pub program: String,
    /// Arguments, passed verbatim (never through a shell)
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command spec
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The upgradable-list command for a package manager
pub fn dispatch(id: PackageManagerId) -> Result<CommandSpec> {
    let spec = match id {
        PackageManagerId::Apt => CommandSpec::new("apt", ["list", "--upgradable"]),
        PackageManagerId::Apk => CommandSpec::new("apk", ["list", "--upgradable"]),
        PackageManagerId::Pacman => CommandSpec::new("pacman", ["-Qu"]),
        PackageManagerId::Yum => CommandSpec::new("yum", ["list", "updates"]),
        PackageManagerId::Homebrew => CommandSpec::new("brew", ["outdated", "--verbose"]),
    };
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_table() {
        let table: [(PackageManagerId, &str, &[&str]); 5] = [
            (PackageManagerId::Apt, "apt", &["list", "--upgradable"]),
            (PackageManagerId::Apk, "apk", &["list", "--upgradable"]),
            (PackageManagerId::Pacman, "pacman", &["-Qu"]),
            (PackageManagerId::Yum, "yum", &["list", "updates"]),
            (PackageManagerId::Homebrew, "brew", &["outdated", "--verbose"]),
        ];

        for (id, program, args) in table {
            let spec = dispatch(id).unwrap();
            assert!(!spec.program.is_empty());
            assert_eq!(spec.program, program);
            assert_eq!(spec.args, args);
        }
    }

    #[test]
    fn test_every_manager_dispatches() {
        for id in PackageManagerId::ALL {
            assert!(dispatch(id).is_ok(), "no command for {}", id);
        }
    }

    #[test]
    fn test_command_spec_display() {
        let spec = dispatch(PackageManagerId::Homebrew).unwrap();
        assert_eq!(spec.to_string(), "brew outdated --verbose");
    }
}
