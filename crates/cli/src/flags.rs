use clap::ValueEnum;

/// What a run is allowed to write
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    /// Color map and Markdown report only
    Report,
    /// Report plus patch preview and generated token file
    DryRun,
    /// Dry run plus source rewrites and token file update
    Apply,
}

impl Mode {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Mode::Report => "report",
            Mode::DryRun => "dry-run",
            Mode::Apply => "apply",
        }
    }

    pub(crate) const fn writes_preview(self) -> bool {
        matches!(self, Mode::DryRun | Mode::Apply)
    }

    pub(crate) const fn writes_sources(self) -> bool {
        matches!(self, Mode::Apply)
    }
}
