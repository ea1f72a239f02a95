//! Manual page retrieval and the suffix retry policy.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Something that can produce the rendered text of a manual page.
pub trait ManualSource {
    /// Fetch the page for `name`. `Ok(None)` means there is no such page.
    fn fetch(&self, name: &str) -> Result<Option<String>>;
}

/// Runs an external viewer (`man 2 <name>`) and captures its output.
pub struct ManualViewer {
    pub program: String,
    pub section: String,
}

impl ManualSource for ManualViewer {
    fn fetch(&self, name: &str) -> Result<Option<String>> {
        let output = Command::new(&self.program)
            .arg(&self.section)
            .arg(name)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("failed to run {} {} {}", self.program, self.section, name))?;

        if !output.status.success() {
            tracing::debug!(name, status = %output.status, "no manual entry");
            return Ok(None);
        }

        let text = String::from_utf8(output.stdout)
            .with_context(|| format!("manual page for {} is not valid UTF-8", name))?;
        Ok(Some(text))
    }
}

/// Suffixes some platforms leave undocumented (`chown32`, `fstatat64`).
const WIDTH_SUFFIXES: &[&str] = &["32", "64"];

/// The name to retry with when `name`'s page comes back empty.
pub fn fallback_name(name: &str) -> Option<&str> {
    WIDTH_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .filter(|base| !base.is_empty())
}

/// Fetch a page, retrying without a `32`/`64` suffix when the first page is empty.
///
/// An empty page with no suffix to strip counts as no page at all.
pub fn retrieve(source: &dyn ManualSource, name: &str) -> Result<Option<String>> {
    match source.fetch(name)? {
        Some(text) if text.trim().is_empty() => match fallback_name(name) {
            Some(base) => {
                tracing::debug!(name, retry = base, "empty manual page, retrying without suffix");
                Ok(source.fetch(base)?.filter(|text| !text.trim().is_empty()))
            }
            None => Ok(None),
        },
        other => Ok(other),
    }
}
