//! Reading sample files.
//!
//! A sample file carries the component catalog next to the section tree:
//!
//! ```json
//! {
//!   "components": {"Button": {"requiredProps": ["label"]}},
//!   "sections": {"Buttons": {"sectionComponents": {"Button": {"samples": {}}}}}
//! }
//! ```
//!
//! JSON and TOML are accepted, chosen by file extension. Declaration order
//! of sections, components and attributes is kept.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use sample_harness::{ComponentCatalog, Sections};
use serde::Deserialize;
use tracing::debug;

use crate::error::GuideError;

/// Decoded contents of a sample file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SampleFile {
    /// Components the samples may render.
    pub components: ComponentCatalog,
    /// Section tree to traverse.
    pub sections: Sections,
}

impl SampleFile {
    /// Reads and decodes the sample file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GuideError::UnsupportedFormat`] for extensions other than
    /// `json` and `toml`, [`GuideError::Io`] when the file cannot be read and
    /// a decoding error when its contents do not match the sample layout.
    pub fn load(path: &Utf8Path) -> Result<Self, GuideError> {
        let format = SampleFormat::from_path(path)?;
        let text = read_text(path)?;
        debug!(path = %path, "decoding sample file");
        format.decode(path, &text)
    }
}

#[derive(Debug, Clone, Copy)]
enum SampleFormat {
    Json,
    Toml,
}

impl SampleFormat {
    fn from_path(path: &Utf8Path) -> Result<Self, GuideError> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(GuideError::UnsupportedFormat(
                other.unwrap_or_default().to_owned(),
            )),
        }
    }

    fn decode(self, path: &Utf8Path, text: &str) -> Result<SampleFile, GuideError> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(|source| GuideError::Json {
                path: path.to_owned(),
                source,
            }),
            Self::Toml => toml::from_str(text).map_err(|source| GuideError::Toml {
                path: path.to_owned(),
                source: Box::new(source),
            }),
        }
    }
}

fn read_text(path: &Utf8Path) -> Result<String, GuideError> {
    let io_error = |source| GuideError::Io {
        path: path.to_owned(),
        source,
    };
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
    let file_name = path.file_name().ok_or_else(|| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "sample path has no file name",
        ))
    })?;
    let dir = Dir::open_ambient_dir(&parent, ambient_authority()).map_err(io_error)?;
    dir.read_to_string(file_name).map_err(io_error)
}
