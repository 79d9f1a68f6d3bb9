use clap::ValueEnum;
use reorder_engine::Mode;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum ModeFlag {
    Strict,
    Warn,
    Append,
    Drop,
}

impl ModeFlag {
    pub(crate) const fn as_domain(self) -> Mode {
        match self {
            ModeFlag::Strict => Mode::Strict,
            ModeFlag::Warn => Mode::Warn,
            ModeFlag::Append => Mode::Append,
            ModeFlag::Drop => Mode::Drop,
        }
    }
}

/// What to do with each reordered file
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum OutputMode {
    /// Print the reordered source
    Stdout,
    /// Rewrite changed files in place
    Write,
    /// Report changed files and fail if any
    Check,
    /// Print a unified diff
    Diff,
}

impl OutputMode {
    pub(crate) const fn from_flags(write: bool, check: bool, diff: bool) -> Self {
        if check {
            OutputMode::Check
        } else if diff {
            OutputMode::Diff
        } else if write {
            OutputMode::Write
        } else {
            OutputMode::Stdout
        }
    }
}
