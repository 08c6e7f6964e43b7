//! CLI entrypoint for `sample-guide`.

use clap::Parser;
use sample_guide::{Args, GuideError};

fn main() -> Result<(), GuideError> {
    sample_guide::run(&Args::parse())
}
