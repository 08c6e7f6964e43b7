//! Command-line interface definitions for `sample-guide`.

use std::fmt;

use camino::Utf8PathBuf;
use clap::Parser;

/// Guide flavours that can be built in one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavour {
    /// Development guide.
    Dev,
    /// Production guide.
    Prod,
}

impl Flavour {
    /// Name used for the configuration profile and output subdirectory.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed CLI arguments for `sample-guide`.
#[derive(Debug, Parser)]
#[command(name = "sample-guide")]
#[command(about = "Write styleguide example files from component samples")]
#[command(version)]
pub struct Args {
    /// Build the development guide.
    #[arg(short = 'd', long = "dev")]
    pub should_build_dev: bool,
    /// Build the production guide.
    #[arg(short = 'p', long = "prod")]
    pub should_build_prod: bool,
    /// TOML configuration file with optional `[profiles.dev]` and
    /// `[profiles.prod]` tables.
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Root directory for generated guides. Defaults to the configured
    /// `doc.output_dir`, then `styleguide`.
    #[arg(long, value_name = "path")]
    pub out_dir: Option<Utf8PathBuf>,
    /// Sample file (`.json` or `.toml`) holding `components` and `sections`.
    #[arg(value_name = "samples")]
    pub samples: Utf8PathBuf,
}

impl Args {
    /// Flavours requested on the command line, development first.
    #[must_use]
    pub fn requested(&self) -> Vec<Flavour> {
        [
            (self.should_build_dev, Flavour::Dev),
            (self.should_build_prod, Flavour::Prod),
        ]
        .into_iter()
        .filter_map(|(is_requested, flavour)| is_requested.then_some(flavour))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, Flavour};
    use clap::Parser;
    use rstest::rstest;

    #[rstest]
    #[case(&["sample-guide", "s.json"], &[])]
    #[case(&["sample-guide", "-p", "s.json"], &[Flavour::Prod])]
    #[case(&["sample-guide", "--prod", "--dev", "s.json"], &[Flavour::Dev, Flavour::Prod])]
    #[case(&["sample-guide", "-dp", "s.json"], &[Flavour::Dev, Flavour::Prod])]
    fn flavours_are_built_dev_first(#[case] argv: &[&str], #[case] expected: &[Flavour]) {
        let args = Args::try_parse_from(argv).expect("valid arguments");
        assert_eq!(args.requested(), expected);
    }

    #[rstest]
    fn samples_argument_is_required() {
        assert!(Args::try_parse_from(["sample-guide", "--dev"]).is_err());
    }
}
