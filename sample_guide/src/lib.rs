//! Library interface for the `sample-guide` command.
//!
//! The binary reads a sample file, loads harness configuration for each
//! requested flavour (`dev`, `prod`) and writes one markdown example file per
//! component under `<out_dir>/<flavour>/`.

pub mod cli;
pub mod error;
pub mod guide;
pub mod samples;

pub use cli::{Args, Flavour};
pub use error::GuideError;
pub use guide::run;
pub use samples::SampleFile;
