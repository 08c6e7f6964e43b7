//! Per-component example buffers and the files they are flushed to.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use tracing::warn;

use crate::error::{HarnessError, HarnessResult};
use crate::model::GroupTag;

/// In-memory example document of one component.
///
/// The header is always the first line; groups and examples follow in the
/// order they are pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleBuffer {
    text: String,
}

impl ExampleBuffer {
    /// Starts a document with `header` as its first line.
    #[must_use]
    pub fn with_header(header: &str) -> Self {
        let mut text = String::with_capacity(header.len() + 1);
        text.push_str(header);
        text.push('\n');
        Self { text }
    }

    /// Appends the heading of an attribute group.
    pub fn push_group(&mut self, group: GroupTag) {
        self.text.push_str("\n### ");
        self.text.push_str(group.as_str());
        self.text.push('\n');
    }

    /// Appends one fenced example block.
    pub fn push_example(&mut self, display_name: &str, preamble: Option<&str>, body: &str) {
        self.text.push_str("\n#### ");
        self.text.push_str(display_name);
        self.text.push_str("\n```js\n");
        if let Some(script) = preamble {
            self.text.push_str(script);
            self.text.push('\n');
        }
        self.text.push_str(body);
        self.text.push_str("\n```\n");
    }

    /// Document text so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Target file `<dir>/<component>.md` of one component's examples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFile {
    dir: Utf8PathBuf,
    file_name: String,
}

impl ExampleFile {
    /// Target for `component` inside `dir`.
    #[must_use]
    pub fn new(dir: &Utf8Path, component: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            file_name: format!("{component}.md"),
        }
    }

    /// Full path of the file.
    #[must_use]
    pub fn path(&self) -> Utf8PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Creates the directory if needed and truncates any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] when the directory or file cannot be
    /// created.
    pub fn reset(&self) -> HarnessResult<()> {
        let dir = ensure_dir(&self.dir)?;
        dir.open_with(
            &self.file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|err| HarnessError::io(self.path(), err))?;
        Ok(())
    }

    /// Replaces the file content with `buffer` in one step.
    ///
    /// The text is written to a sibling temporary file first and renamed over
    /// the target, so readers see either the old or the complete new content.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] when writing or renaming fails; the target
    /// is left untouched and the temporary file is removed in that case.
    pub fn flush(&self, buffer: &ExampleBuffer) -> HarnessResult<()> {
        let dir = ensure_dir(&self.dir)?;
        let staging = format!(".{}.tmp", self.file_name);
        let staging_path = self.dir.join(&staging);
        let mut file = dir
            .open_with(
                &staging,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .map_err(|err| HarnessError::io(&staging_path, err))?;
        let written = file
            .write_all(buffer.as_str().as_bytes())
            .and_then(|()| file.sync_all());
        drop(file);
        written
            .map_err(|err| HarnessError::io(&staging_path, err))
            .and_then(|()| {
                dir.rename(&staging, &dir, &self.file_name)
                    .map_err(|err| HarnessError::io(self.path(), err))
            })
            .inspect_err(|_| {
                if let Err(cleanup) = dir.remove_file(&staging) {
                    warn!(path = %staging_path, error = %cleanup, "could not remove staging file");
                }
            })
    }
}

fn ensure_dir(path: &Utf8Path) -> HarnessResult<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|err| HarnessError::io(path, err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|err| HarnessError::io(path, err))
        }
        Err(open_err) => Err(HarnessError::io(path, open_err)),
    }
}
