//! Terminal output control for the command handlers

/// Output level for CLI handlers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Resolve the level from the global `--verbose`/`--quiet` flags
    ///
    /// Quiet wins when both flags are set: a caller silencing a scripted run
    /// expects no output regardless of what else is on the command line.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Whether a message requiring `required` is printed at this level
    fn permits(self, required: LogLevel) -> bool {
        self != LogLevel::Quiet && (self == required || required == LogLevel::Normal)
    }

    /// Print a message if this level permits it
    pub fn log(self, required: LogLevel, msg: &str) {
        if self.permits(required) {
            println!("{msg}");
        }
    }
}
